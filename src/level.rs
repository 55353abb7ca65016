//! Difficulty levels
//!
//! A level is plain data handed to the simulation at session start. Presets
//! cover the menu choices; custom levels can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::SNAKE_SPEED;
use crate::error::ConfigError;
use crate::sim::Grid;

/// Named difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn level(&self) -> LevelConfig {
        match self {
            Difficulty::Easy => LevelConfig {
                food_count: 6,
                win_score: 15,
                border_is_lethal: false,
                self_collision_is_lethal: false,
                initial_length: 1,
                moves_per_second: 6,
            },
            Difficulty::Normal => LevelConfig::default(),
            Difficulty::Hard => LevelConfig {
                food_count: 3,
                win_score: 40,
                border_is_lethal: true,
                self_collision_is_lethal: true,
                initial_length: 1,
                moves_per_second: 10,
            },
        }
    }
}

/// Difficulty parameters consumed by a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Food items kept on the board
    pub food_count: usize,
    /// Score that wins the session
    pub win_score: u64,
    /// Leaving the board ends the game (otherwise the head wraps)
    pub border_is_lethal: bool,
    /// Running into the body ends the game (otherwise the snake may cross itself)
    pub self_collision_is_lethal: bool,
    /// Starting segments, head included
    pub initial_length: usize,
    /// Movement ticks per second at normal speed
    pub moves_per_second: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            food_count: 4,
            win_score: 25,
            border_is_lethal: false,
            self_collision_is_lethal: true,
            initial_length: 1,
            moves_per_second: SNAKE_SPEED,
        }
    }
}

impl LevelConfig {
    /// Preset by menu name ("easy", "normal", "hard")
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        Difficulty::from_str(name)
            .map(|d| d.level())
            .ok_or_else(|| ConfigError::UnknownLevel(name.to_string()))
    }

    /// Parse a level file. Missing fields fall back to the Normal preset.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: LevelConfig = serde_json::from_str(json)?;
        Ok(level)
    }

    /// Reject parameters the simulation cannot run with on `grid`
    pub fn validate(&self, grid: &Grid) -> Result<(), ConfigError> {
        if grid.side <= 0 || grid.cols() <= 0 || grid.rows() <= 0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "board {}x{} with cell side {} has no cells",
                grid.width, grid.height, grid.side
            )));
        }
        if self.win_score == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "win_score must be at least 1".to_string(),
            ));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "initial_length must be at least 1".to_string(),
            ));
        }
        if self.moves_per_second == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "moves_per_second must be positive".to_string(),
            ));
        }
        // The starting body trails left from the centre cell
        let room = grid.center().col as usize + 1;
        if self.initial_length > room {
            return Err(ConfigError::InvalidConfiguration(format!(
                "initial_length {} does not fit left of centre ({} cells)",
                self.initial_length, room
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_levels() {
        assert_eq!(LevelConfig::named("easy").unwrap(), Difficulty::Easy.level());
        assert_eq!(LevelConfig::named("Medium").unwrap(), LevelConfig::default());
        assert!(LevelConfig::named("HARD").unwrap().border_is_lethal);
    }

    #[test]
    fn test_unknown_level() {
        assert_eq!(
            LevelConfig::named("nightmare"),
            Err(ConfigError::UnknownLevel("nightmare".to_string()))
        );
    }

    #[test]
    fn test_presets_validate() {
        let grid = Grid::default();
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert!(d.level().validate(&grid).is_ok(), "{}", d.as_str());
        }
    }

    #[test]
    fn test_from_json_partial() {
        let level = LevelConfig::from_json(r#"{ "food_count": 9, "border_is_lethal": true }"#)
            .unwrap();
        assert_eq!(level.food_count, 9);
        assert!(level.border_is_lethal);
        assert_eq!(level.win_score, LevelConfig::default().win_score);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            LevelConfig::from_json("{ food_count: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let grid = Grid::default();
        let bad = [
            LevelConfig {
                win_score: 0,
                ..Default::default()
            },
            LevelConfig {
                initial_length: 0,
                ..Default::default()
            },
            LevelConfig {
                moves_per_second: 0,
                ..Default::default()
            },
            LevelConfig {
                initial_length: 100,
                ..Default::default()
            },
        ];
        for level in bad {
            assert!(matches!(
                level.validate(&grid),
                Err(ConfigError::InvalidConfiguration(_))
            ));
        }
        assert!(LevelConfig::default().validate(&Grid::new(10, 10, 30)).is_err());
    }
}
