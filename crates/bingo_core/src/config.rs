//! Game-wide win-condition configuration.
//!
//! Holds the defaults a fresh [`WinConditionChecker`](crate::WinConditionChecker)
//! starts from, plus the race-mode bonus which cannot be changed mid-game.
//!
//! ## Presets
//!
//! | Profile | Mode | Notes |
//! |---------|------|-------|
//! | classic | 1 line | first-past-the-post |
//! | race | 1 line, race | first team to a line gets the Golden Snitch bonus |
//! | blackout | full card | every cell must be collected |
//!
//! ## Usage
//!
//! ```rust
//! use bingo_core::config::WinConditionConfig;
//!
//! let config = WinConditionConfig::default();
//! let race = WinConditionConfig::race();
//! let from_env = WinConditionConfig::from_env_or_default();
//! ```
//!
//! ## Environment Variables
//!
//! - `BINGO_WIN_PROFILE`: Select preset (classic, race, blackout)

use crate::error::{Result, WinConditionError};
use crate::win_condition::VictoryMode;
use serde::{Deserialize, Serialize};
use std::env;

pub const PROFILE_ENV_VAR: &str = "BINGO_WIN_PROFILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinConditionConfig {
    /// Lines needed to win at game start
    pub default_num_lines_complete: u32,
    /// Start in race mode instead of plain lines
    pub default_race_mode: bool,
    /// Start with a full-card objective, overrides the line settings
    pub default_full_card: bool,
    /// Extra score for the first team to reach the line threshold in race mode
    pub golden_snitch_bonus: u32,
    /// Width and height of the card
    pub grid_size: usize,
}

impl Default for WinConditionConfig {
    fn default() -> Self {
        Self {
            default_num_lines_complete: 1,
            default_race_mode: false,
            default_full_card: false,
            golden_snitch_bonus: 3,
            grid_size: 5,
        }
    }
}

impl WinConditionConfig {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn race() -> Self {
        Self { default_race_mode: true, ..Self::default() }
    }

    pub fn blackout() -> Self {
        Self { default_full_card: true, ..Self::default() }
    }

    pub fn from_profile(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "classic" | "default" => Some(Self::classic()),
            "race" | "quidditch" => Some(Self::race()),
            "blackout" | "full_card" => Some(Self::blackout()),
            _ => None,
        }
    }

    /// Load from environment variable or use default
    pub fn from_env_or_default() -> Self {
        let profile = env::var(PROFILE_ENV_VAR).unwrap_or_default();
        Self::from_profile(&profile).unwrap_or_default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| WinConditionError::invalid_argument(format!("bad config yaml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| WinConditionError::invalid_argument(format!("bad config json: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(WinConditionError::invalid_argument("grid_size must be at least 1"));
        }
        self.default_mode().map(|_| ())
    }

    /// The victory mode a new game starts in.
    pub fn default_mode(&self) -> Result<VictoryMode> {
        if self.default_full_card {
            return Ok(VictoryMode::FullCard);
        }
        if self.default_race_mode {
            VictoryMode::race(self.default_num_lines_complete)
        } else {
            VictoryMode::lines(self.default_num_lines_complete)
        }
    }
}
