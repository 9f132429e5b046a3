//! Error types for the catalog engine.

use thiserror::Error;

/// All possible errors from the catalog engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // State errors
    #[error("invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    // Storage blob errors
    #[error("invalid blob under '{key}': {reason}")]
    InvalidBlob { key: String, reason: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
