use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    food::place_food,
    level::Level,
    state::{CollisionType, Phase, Position, SessionState, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Every this many points the tick interval shrinks by the level's increment
pub const SPEED_UP_EVERY: u32 = 3;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the snake moved this step
    pub advanced: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// The tick interval shrank; the tick timer must be replaced
    pub interval_changed: bool,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.collision_type.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh session on `level`: centred snake heading right, new food
    pub fn new_session(&mut self, level: Level) -> Result<SessionState, GameError> {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );
        let food = self.spawn_food(&snake)?;

        tracing::info!(
            level = level.id(),
            width = self.config.grid_width,
            height = self.config.grid_height,
            "new session"
        );

        Ok(SessionState::new(
            snake,
            Direction::Right,
            food,
            level,
            self.config.grid_width,
            self.config.grid_height,
        ))
    }

    /// Execute one tick.
    ///
    /// Does nothing unless the session is running. Collisions end the session
    /// through `state.phase`; an `Err` means food could not be placed, in
    /// which case the session is also over.
    pub fn step(&mut self, state: &mut SessionState) -> Result<StepResult, GameError> {
        if state.phase != Phase::Running {
            return Ok(StepResult::default());
        }

        if let Some(turn) = state.pending_heading.take() {
            if !state.heading.is_opposite(turn) {
                state.heading = turn;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.heading);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            tracing::info!(
                score = state.score,
                level = state.level.id(),
                cause = ?collision_type,
                "game over"
            );
            return Ok(StepResult {
                collision_type: Some(collision_type),
                ..Default::default()
            });
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        let mut interval_changed = false;
        if ate_food {
            state.score += 1;
            state.food = match self.spawn_food(&state.snake) {
                Ok(food) => food,
                Err(err) => {
                    state.phase = Phase::GameOver;
                    return Err(err);
                }
            };
            interval_changed = Self::speed_up(state);
        }

        Ok(StepResult {
            advanced: true,
            ate_food,
            collision_type: None,
            interval_changed,
        })
    }

    /// Check if the new head position causes a collision.
    ///
    /// The body is the one before this tick's move, so the tail cell still
    /// counts as occupied even though it would be vacated.
    fn check_collision(&self, state: &SessionState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Shrink the interval on every third point, never below half the base
    fn speed_up(state: &mut SessionState) -> bool {
        if state.score % SPEED_UP_EVERY != 0 {
            return false;
        }

        let spec = state.level_spec();
        let Some(next) = state.tick_interval_ms.checked_sub(spec.speed_increment_ms) else {
            return false;
        };
        if next < spec.floor_interval_ms() {
            return false;
        }

        tracing::debug!(
            from_ms = state.tick_interval_ms,
            to_ms = next,
            score = state.score,
            "speed up"
        );
        state.tick_interval_ms = next;
        true
    }

    /// Spawn food at a random empty position
    fn spawn_food(&mut self, snake: &Snake) -> Result<Position, GameError> {
        place_food(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            snake.cells(),
            self.config.food_sample_attempts,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(width: usize, height: usize) -> GameEngine<StdRng> {
        GameEngine::with_rng(GameConfig::new(width, height), StdRng::seed_from_u64(11))
    }

    fn state_with(
        cells: &[(i32, i32)],
        heading: Direction,
        food: (i32, i32),
        level: Level,
        size: usize,
    ) -> SessionState {
        let snake =
            Snake::from_cells(cells.iter().map(|&(x, y)| Position::new(x, y)).collect()).unwrap();
        SessionState::new(
            snake,
            heading,
            Position::new(food.0, food.1),
            level,
            size,
            size,
        )
    }

    #[test]
    fn test_new_session() {
        let mut engine = engine(20, 20);
        let state = engine.new_session(Level::Easy).unwrap();

        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.heading, Direction::Right);
        assert_eq!(state.tick_interval_ms, 200);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_eating_grows_and_places_new_food() {
        let mut engine = engine(5, 5);
        let mut state = state_with(&[(2, 2)], Direction::Right, (3, 2), Level::Medium, 5);

        let result = engine.step(&mut state).unwrap();

        assert!(result.advanced);
        assert!(result.ate_food);
        assert_eq!(
            state.snake.cells(),
            &[Position::new(3, 2), Position::new(2, 2)]
        );
        assert_eq!(state.score, 1);
        assert!(!state.snake.occupies(state.food));
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_basic_movement_keeps_length() {
        let mut engine = engine(10, 10);
        let mut state = state_with(
            &[(5, 5), (4, 5), (3, 5)],
            Direction::Right,
            (0, 0),
            Level::Medium,
            10,
        );

        let result = engine.step(&mut state).unwrap();

        assert!(result.advanced);
        assert!(!result.ate_food);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.snake.tail(), Position::new(4, 5));
        assert_eq!(state.food, Position::new(0, 0));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine(5, 5);
        let mut state = state_with(&[(0, 2), (1, 2)], Direction::Left, (4, 4), Level::Medium, 5);
        let before = state.snake.clone();

        let result = engine.step(&mut state).unwrap();

        assert!(result.terminated());
        assert!(!result.advanced);
        assert_eq!(result.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_moving_into_tail_cell_is_a_collision() {
        let mut engine = engine(10, 10);
        let mut state = state_with(
            &[(5, 5), (6, 5), (6, 6), (5, 6)],
            Direction::Down,
            (0, 0),
            Level::Medium,
            10,
        );

        let result = engine.step(&mut state).unwrap();

        // (5,6) is the tail and would be vacated this tick, yet still blocks.
        assert_eq!(result.collision_type, Some(CollisionType::SelfCollision));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_self_collision_after_turning() {
        let mut engine = engine(10, 10);
        let mut state = state_with(
            &[(5, 5), (4, 5), (3, 5), (2, 5), (1, 5)],
            Direction::Right,
            (0, 0),
            Level::Medium,
            10,
        );

        // Right: (6,5); Down: (6,6); Left: (5,6); Up: (5,5) is still body
        engine.step(&mut state).unwrap();
        state.pending_heading = Some(Direction::Down);
        engine.step(&mut state).unwrap();
        state.pending_heading = Some(Direction::Left);
        engine.step(&mut state).unwrap();
        state.pending_heading = Some(Direction::Up);
        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.collision_type, Some(CollisionType::SelfCollision));
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_pending_turn_applies_on_step() {
        let mut engine = engine(10, 10);
        let mut state = state_with(&[(5, 5)], Direction::Right, (0, 0), Level::Medium, 10);
        state.pending_heading = Some(Direction::Up);

        engine.step(&mut state).unwrap();

        assert_eq!(state.heading, Direction::Up);
        assert_eq!(state.pending_heading, None);
        assert_eq!(state.snake.head(), Position::new(5, 4));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine(10, 10);
        let mut state = state_with(&[(5, 5), (4, 5)], Direction::Right, (0, 0), Level::Medium, 10);
        state.pending_heading = Some(Direction::Left);

        let result = engine.step(&mut state).unwrap();

        assert!(!result.terminated());
        assert_eq!(state.heading, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_no_update_unless_running() {
        let mut engine = engine(10, 10);
        for phase in [Phase::Paused, Phase::GameOver] {
            let mut state = state_with(&[(5, 5)], Direction::Right, (6, 5), Level::Medium, 10);
            state.phase = phase;
            state.pending_heading = Some(Direction::Up);
            let before = state.clone();

            let result = engine.step(&mut state).unwrap();

            assert_eq!(result, StepResult::default());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_speed_up_every_third_point() {
        let mut engine = engine(20, 20);
        let mut state = state_with(&[(5, 5)], Direction::Right, (6, 5), Level::Medium, 20);
        state.score = 2;

        let result = engine.step(&mut state).unwrap();

        assert_eq!(state.score, 3);
        assert!(result.interval_changed);
        assert_eq!(state.tick_interval_ms, 145);
    }

    #[test]
    fn test_no_speed_up_off_multiple() {
        let mut engine = engine(20, 20);
        let mut state = state_with(&[(5, 5)], Direction::Right, (6, 5), Level::Medium, 20);
        state.score = 3;

        let result = engine.step(&mut state).unwrap();

        assert_eq!(state.score, 4);
        assert!(!result.interval_changed);
        assert_eq!(state.tick_interval_ms, 150);
    }

    #[test]
    fn test_speed_floor_reached_exactly() {
        let mut engine = engine(20, 20);
        let mut state = state_with(&[(5, 5)], Direction::Right, (6, 5), Level::Hard, 20);
        state.score = 5;
        state.tick_interval_ms = 58;

        let result = engine.step(&mut state).unwrap();

        assert!(result.interval_changed);
        assert_eq!(state.tick_interval_ms, 50);
    }

    #[test]
    fn test_speed_floor_never_crossed() {
        let mut engine = engine(20, 20);
        let mut state = state_with(&[(5, 5)], Direction::Right, (6, 5), Level::Hard, 20);
        state.score = 5;
        state.tick_interval_ms = 52;

        let result = engine.step(&mut state).unwrap();

        assert!(result.ate_food);
        assert!(!result.interval_changed);
        assert_eq!(state.tick_interval_ms, 52);
    }

    #[test]
    fn test_filling_the_grid_ends_the_session() {
        let mut engine = GameEngine::with_rng(GameConfig::new(2, 1), StdRng::seed_from_u64(5));
        let mut state = state_with(&[(0, 0)], Direction::Right, (1, 0), Level::Easy, 2);
        state.grid_height = 1;

        let err = engine.step(&mut state).unwrap_err();

        assert_eq!(err, GameError::GridFull { width: 2, height: 1 });
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_invariants_hold_over_a_long_run() {
        let mut engine = engine(12, 12);
        let mut turns = StdRng::seed_from_u64(99);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        for _ in 0..20 {
            let mut state = engine.new_session(Level::Hard).unwrap();
            let floor = state.level_spec().floor_interval_ms();

            for _ in 0..5_000 {
                if state.phase != Phase::Running {
                    break;
                }
                let previous_heading = state.heading;
                let previous_len = state.snake.len();
                let previous_score = state.score;
                let previous_interval = state.tick_interval_ms;

                if turns.gen_range(0..4) == 0 {
                    state.pending_heading = Some(directions[turns.gen_range(0..4)]);
                }
                let result = engine.step(&mut state).unwrap();

                assert!(!state.heading.is_opposite(previous_heading));
                assert!(state.score >= previous_score);
                assert!(state.tick_interval_ms <= previous_interval);
                assert!(state.tick_interval_ms >= floor);
                if result.advanced {
                    let expected = previous_len + usize::from(result.ate_food);
                    assert_eq!(state.snake.len(), expected);
                    assert!(!state.snake.occupies(state.food));
                } else {
                    assert_eq!(state.phase, Phase::GameOver);
                }
            }
        }
    }
}
