//! Difficulty table
//!
//! Each level fixes the starting tick interval, how much the interval shrinks
//! on every speed-up, and the label shown to the player. The table is static;
//! sessions only ever hold a copy of the identifier.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::error::GameError;

/// Difficulty identifier
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Timing parameters attached to a [`Level`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub level: Level,
    /// Tick interval a fresh session starts with
    pub base_interval_ms: u64,
    /// Amount the interval shrinks on each speed-up
    pub speed_increment_ms: u64,
    pub label: &'static str,
}

static LEVELS: [LevelSpec; 3] = [
    LevelSpec {
        level: Level::Easy,
        base_interval_ms: 200,
        speed_increment_ms: 3,
        label: "Easy",
    },
    LevelSpec {
        level: Level::Medium,
        base_interval_ms: 150,
        speed_increment_ms: 5,
        label: "Medium",
    },
    LevelSpec {
        level: Level::Hard,
        base_interval_ms: 100,
        speed_increment_ms: 8,
        label: "Hard",
    },
];

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Look up the timing parameters for this level
    pub fn spec(self) -> &'static LevelSpec {
        match self {
            Level::Easy => &LEVELS[0],
            Level::Medium => &LEVELS[1],
            Level::Hard => &LEVELS[2],
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl LevelSpec {
    /// Starting tick interval as a [`Duration`]
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    /// Fastest interval a session on this level may reach
    pub fn floor_interval_ms(&self) -> u64 {
        self.base_interval_ms / 2
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownLevel(s.to_string()))
    }
}
