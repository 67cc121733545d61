//! Error types for the optibody_core library.

use crate::types::ActivityLevel;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for optibody_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value required by the selected calculation is missing or out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No formula in the strategy list accepted the given metrics
    #[error("No applicable formula found for the given metrics")]
    NoApplicableFormula,

    /// Activity level has no entry in the multiplier table
    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(ActivityLevel),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
