use super::action::Direction;
use super::level::{Level, LevelSpec};
use std::time::Duration;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake whose segments trail behind `head` opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();
        Self { body }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self { body: cells })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    /// Check whether any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front; drop the tail unless growing
    pub(crate) fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete state of one session.
///
/// Replaced wholesale on restart and on a level change; never partially reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub snake: Snake,
    pub heading: Direction,
    /// Turn accepted since the last tick, applied by the next one
    pub pending_heading: Option<Direction>,
    pub food: Position,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub level: Level,
    pub phase: Phase,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl SessionState {
    /// Create a running session at the level's base interval
    pub fn new(
        snake: Snake,
        heading: Direction,
        food: Position,
        level: Level,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            snake,
            heading,
            pending_heading: None,
            food,
            score: 0,
            tick_interval_ms: level.spec().base_interval_ms,
            level,
            phase: Phase::Running,
            grid_width,
            grid_height,
        }
    }

    pub fn level_spec(&self) -> &'static LevelSpec {
        self.level.spec()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Read-only view handed to renderers
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: self.snake.cells(),
            food: self.food,
            score: self.score,
            phase: self.phase,
            level: self.level,
            level_label: self.level.label(),
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }
}

/// Borrowed, immutable projection of a session for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub snake: &'a [Position],
    pub food: Position,
    pub score: u32,
    pub phase: Phase,
    pub level: Level,
    pub level_label: &'static str,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
