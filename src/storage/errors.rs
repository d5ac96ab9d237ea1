//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Collection storage errors
///
/// Read-side problems never surface here: an unreadable or undecodable
/// collection loads as empty. Only writes report failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("I/O error on collection '{name}': {message}")]
    Io { name: String, message: String },

    #[error("Failed to serialize collection '{name}': {message}")]
    Serialize { name: String, message: String },

    #[error("Invalid collection name: '{0}'")]
    InvalidName(String),
}

impl StorageError {
    pub fn io(name: &str, err: impl ToString) -> Self {
        StorageError::Io {
            name: name.to_string(),
            message: err.to_string(),
        }
    }

    pub fn serialize(name: &str, err: impl ToString) -> Self {
        StorageError::Serialize {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}
