use thiserror::Error;

/// Errors raised by the game core.
///
/// Collisions are not errors; they only move the session to game over.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Food placement found no free cell. Reaching this means the snake
    /// covers the whole grid, which normal play cannot produce.
    #[error("no free cell left for food on a {width}x{height} grid")]
    GridFull { width: usize, height: usize },

    #[error("unknown level '{0}' (expected easy, medium or hard)")]
    UnknownLevel(String),

    #[error("invalid grid configuration: {0}")]
    InvalidGrid(String),
}
