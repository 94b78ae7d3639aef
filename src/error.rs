//! Construction-time configuration errors
//!
//! The running engine has no recoverable error surface; only building a
//! table from bad numbers can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("restitution must be within [0, 1], got {0}")]
    RestitutionOutOfRange(f32),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("ball count must be at least 1, got {0}")]
    InvalidBallCount(u32),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Check a restitution coefficient
pub fn check_restitution(restitution: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&restitution) {
        Ok(restitution)
    } else {
        Err(ConfigError::RestitutionOutOfRange(restitution))
    }
}

/// Check that a tuning value is strictly positive
pub fn check_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
