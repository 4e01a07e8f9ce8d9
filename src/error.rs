//! Error types for dbseed.

use std::io;

/// Result type alias for dbseed operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for dbseed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown schema variant name.
    #[error("Unknown variant: {0} (expected 'basic' or 'full')")]
    UnknownVariant(String),

    /// Database file has no fixture tables yet.
    #[error("No fixture tables found. Run `dbseed seed` first")]
    NotInitialized,

    /// User row not found by the given key.
    #[error("User '{0}' not found")]
    UserNotFound(String),

    /// A `remove` invocation with the wrong key shape for the variant.
    #[error("Variant '{0}' identifies users by {1}")]
    BadUserKey(&'static str, &'static str),
}
