use rand::Rng;
use rand::rngs::ThreadRng;

use super::pulse::{GameOverPulse, PulseFrame};
use super::timer::TickSchedule;
use crate::game::{
    Command, Direction, GameConfig, GameEngine, GameError, Level, Phase, SessionState, Snapshot,
    StepResult,
};

/// Owns the one live session and drives it from commands and ticks.
///
/// Phase transitions:
///
/// | from     | input         | to                   |
/// |----------|---------------|----------------------|
/// | Running  | tick          | Running or GameOver  |
/// | Running  | toggle pause  | Paused               |
/// | Paused   | toggle pause  | Running              |
/// | Running  | select level  | Running (new session)|
/// | GameOver | restart, turn | Running (new session)|
///
/// Everything else is ignored.
pub struct SessionController<R = ThreadRng> {
    engine: GameEngine<R>,
    state: SessionState,
    selected_level: Level,
    schedule: TickSchedule,
    pulse: GameOverPulse,
    sessions_started: u64,
}

impl SessionController<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_engine(GameEngine::new(config))
    }
}

impl<R: Rng> SessionController<R> {
    /// Start the first session on the configured level
    pub fn with_engine(mut engine: GameEngine<R>) -> Result<Self, GameError> {
        engine.config().validate()?;
        let level = engine.config().level;
        let state = engine.new_session(level)?;
        let mut schedule = TickSchedule::default();
        schedule.start(state.tick_interval());

        Ok(Self {
            engine,
            state,
            selected_level: level,
            schedule,
            pulse: GameOverPulse::default(),
            sessions_started: 1,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn pulse(&self) -> &GameOverPulse {
        &self.pulse
    }

    /// Level the next reset will use
    pub fn selected_level(&self) -> Level {
        self.selected_level
    }

    /// Number of sessions created so far, the first one included
    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Advance the simulation by one tick if the session is running.
    ///
    /// A failed food placement aborts the session: it is logged and the
    /// session ends as if the snake had crashed.
    pub fn tick(&mut self) -> StepResult {
        if self.state.phase != Phase::Running {
            tracing::trace!(phase = ?self.state.phase, "tick ignored");
            return StepResult::default();
        }

        match self.engine.step(&mut self.state) {
            Ok(result) => {
                if result.terminated() {
                    self.enter_game_over();
                } else if result.interval_changed {
                    self.schedule.start(self.state.tick_interval());
                }
                result
            }
            Err(err) => {
                tracing::error!(score = self.state.score, "session aborted: {err}");
                self.enter_game_over();
                StepResult::default()
            }
        }
    }

    /// Apply one input command
    pub fn handle_command(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::Turn(direction) => self.turn(direction),
            Command::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            Command::SelectLevel(level) => self.select_level(level),
            Command::Restart => {
                if self.state.phase == Phase::GameOver {
                    self.reset(self.selected_level)
                } else {
                    tracing::trace!("restart ignored while session is live");
                    Ok(())
                }
            }
        }
    }

    /// Step the game-over animation one frame
    pub fn advance_animation(&mut self) -> Option<PulseFrame> {
        self.pulse.advance(self.state.phase)
    }

    fn turn(&mut self, direction: Direction) -> Result<(), GameError> {
        match self.state.phase {
            Phase::Running => {
                // Only the first accepted turn between two ticks counts.
                if self.state.pending_heading.is_none() && !self.state.heading.is_parallel(direction)
                {
                    self.state.pending_heading = Some(direction);
                }
                Ok(())
            }
            Phase::Paused => Ok(()),
            Phase::GameOver => self.reset(self.selected_level),
        }
    }

    fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.schedule.stop();
                tracing::debug!(score = self.state.score, "paused");
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.schedule.start(self.state.tick_interval());
                tracing::debug!(interval_ms = self.state.tick_interval_ms, "resumed");
            }
            Phase::GameOver => {}
        }
    }

    fn select_level(&mut self, level: Level) -> Result<(), GameError> {
        self.selected_level = level;
        if self.state.phase == Phase::Running {
            self.reset(level)
        } else {
            tracing::debug!(
                level = level.id(),
                phase = ?self.state.phase,
                "level stored for the next session"
            );
            Ok(())
        }
    }

    fn reset(&mut self, level: Level) -> Result<(), GameError> {
        self.state = self.engine.new_session(level)?;
        self.sessions_started += 1;
        self.pulse.cancel();
        self.schedule.start(self.state.tick_interval());
        Ok(())
    }

    fn enter_game_over(&mut self) {
        self.schedule.stop();
        self.pulse.start();
    }
}
