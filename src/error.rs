//! Error types for terra-atlas

use thiserror::Error;

/// Main error type for terra-atlas operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Occurrence API error: {0}")]
    Occurrence(String),

    #[error("Climate API error: {0}")]
    Climate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for terra-atlas operations
pub type Result<T> = std::result::Result<T, Error>;
