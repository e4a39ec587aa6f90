//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Sessions are driven by [`crate::session::SessionController`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod level;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use error::GameError;
pub use food::place_food;
pub use level::{Level, LevelSpec};
pub use state::{CollisionType, Phase, Position, SessionState, Snake, Snapshot};
