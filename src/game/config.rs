use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;
use super::level::Level;

/// Side length of one grid cell in display units
pub const CELL_SIZE: usize = 20;
/// Width of the play field in display units
pub const DISPLAY_WIDTH: usize = 400;
/// Height of the play field in display units
pub const DISPLAY_HEIGHT: usize = 400;

/// Random draws attempted before food placement scans the grid instead
pub const DEFAULT_FOOD_SAMPLE_ATTEMPTS: usize = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Length of the snake at the start of every session
    pub initial_snake_length: usize,
    /// Difficulty the first session starts on
    pub level: Level,
    /// Upper bound on rejection-sampling draws per food placement
    pub food_sample_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DISPLAY_WIDTH / CELL_SIZE,
            grid_height: DISPLAY_HEIGHT / CELL_SIZE,
            initial_snake_length: 1,
            level: Level::default(),
            food_sample_attempts: DEFAULT_FOOD_SAMPLE_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Reject grids the snake cannot start on
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidGrid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err(GameError::InvalidGrid("grid is too large".to_string()));
        }
        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidGrid(
                "initial snake length must be at least 1".to_string(),
            ));
        }
        // The snake starts at the centre facing right with its body trailing left.
        if self.initial_snake_length > self.grid_width / 2 + 1 {
            return Err(GameError::InvalidGrid(format!(
                "initial snake length {} does not fit a grid {} cells wide",
                self.initial_snake_length, self.grid_width
            )));
        }
        if self.grid_width * self.grid_height <= self.initial_snake_length {
            return Err(GameError::InvalidGrid(
                "grid leaves no room for food".to_string(),
            ));
        }
        Ok(())
    }
}
