//! Common error types for the photo album services

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for album operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across album crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Date store file exists but does not hold a JSON object of strings
    #[error("Date store {path} is corrupt: {source}")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Photo directory missing or not a directory
    #[error("Photo directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
