//! Error types for the fallible edges of the game
//!
//! The tick itself never fails; only level acquisition and tuning loads do.

use thiserror::Error;

/// Failure to obtain a playable level configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelLoadError {
    /// The level source could not produce a config (retry later)
    #[error("level {level} unavailable: {reason}")]
    Unavailable { level: u32, reason: String },
    /// A config was produced but cannot be simulated
    #[error("invalid config for level {level}: {reason}")]
    Invalid { level: u32, reason: String },
}

/// Failure to load balance data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
