//! Core error types for tminus-core.
//!
//! Every fallible operation in the library reports through [`CoreError`].
//! Conditions the engine can recover from (malformed blobs, oracle failures,
//! write failures) are logged and degraded instead of surfacing here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tminus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// User input that must be corrected before saving
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Category/image oracle errors
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Image upload errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Write rejected by the backing store
    #[error("Write rejected for key '{0}'")]
    WriteRejected(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors surfaced to the user as blocking messages.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Title, date or time left blank
    #[error("Title, date, and time fields are required (missing: {0})")]
    MissingField(&'static str),

    /// New countdowns must target the current minute or later
    #[error("The selected date and time must be in the future")]
    NotInFuture,

    /// No event with this id
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Category name blank after trimming
    #[error("Category name cannot be empty")]
    EmptyCategory,

    /// Category collides case-insensitively with an existing one
    #[error("Category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// Category not in the set
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The category set must never become empty
    #[error("Cannot delete the last remaining category \"{0}\"")]
    LastCategory(String),
}

/// Errors from the category/image oracle backend.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Oracle is switched off in configuration
    #[error("Oracle is disabled")]
    Disabled,

    /// API key environment variable not set
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with an error payload
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Backend answered without any text candidate
    #[error("Empty response from model")]
    EmptyResponse,
}

/// Image upload errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Image exceeds the configured ceiling
    #[error("Image size ({size} bytes) cannot exceed {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    /// Not one of the accepted image types
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    /// Stored image reference is not a base64 `data:` URL
    #[error("Invalid image data URL")]
    InvalidDataUrl,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
