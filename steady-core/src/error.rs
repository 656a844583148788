//! Error types for steady-core

use thiserror::Error;

/// Main error type for the steady-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Calendar date that could not be parsed as YYYY-MM-DD
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Metric key or value outside the expected domain
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
}

/// Result type alias for steady-core
pub type Result<T> = std::result::Result<T, Error>;
