//! Level Snake - a terminal Snake game with selectable difficulty
//!
//! This library provides:
//! - Core game logic: engine, difficulty table, food placement (game module)
//! - Session lifecycle: pause, game over, restart, tick timing (session module)
//! - TUI rendering of session snapshots (render module)
//! - Keyboard mapping to game commands (input module)
//! - In-memory play statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
