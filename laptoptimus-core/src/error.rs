//! Core error types for `LaptOptimus`.

use thiserror::Error;

/// Core error type for `LaptOptimus` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration (e.g. a non-positive exchange rate).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid caller input (e.g. a negative parcel weight).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
