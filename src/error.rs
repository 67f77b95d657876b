//! Error types for stash.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for stash operations
pub type StashResult<T> = Result<T, StashError>;

/// Main error type for stash operations
#[derive(Error, Debug)]
pub enum StashError {
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StashError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StashError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StashError::Conflict(message.into())
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        StashError::NotFound(message.into())
    }
}
