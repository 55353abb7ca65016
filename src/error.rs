//! Configuration errors
//!
//! The simulation itself never fails: exhausted grids, dropped inputs and
//! collisions are all ordinary state transitions. Only bad level data is an error.

/// Errors raised while building a level or a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown level: {0}")]
    UnknownLevel(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Level file parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
