//! Error types for the wardstat library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wardstat operations.
#[derive(Debug, Error)]
pub enum WardstatError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no columns to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An analyzer referenced a column the table does not have.
    #[error("Missing column '{column}' in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for wardstat operations.
pub type Result<T> = std::result::Result<T, WardstatError>;
