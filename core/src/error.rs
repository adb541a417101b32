//! Error types for todo operations and the backing store.

use crate::types::TodoId;
use thiserror::Error;

/// Result type alias for todo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Failures of the backing store.
///
/// These are not recovered from: the CLI exits with them and the HTTP API
/// answers with a server error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing object failed.
    #[error("failed to access todo storage: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not a valid todo collection.
    #[error("todo storage contains invalid data: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The collection could not be serialized.
    #[error("failed to encode todo collection: {0}")]
    Encode(#[source] serde_json::Error),

    /// An in-memory store's lock was poisoned by a panicking writer.
    #[error("todo storage lock poisoned")]
    Poisoned,
}

/// Why a todo action was rejected.
///
/// `EmptyText` is the validation kind; `InvalidPosition` and `NotFound` are
/// the not-found kind for the CLI and HTTP addressing schemes respectively.
/// A rejected action never mutates the collection.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Text was missing, empty, or only whitespace.
    #[error("Task text is required")]
    EmptyText,

    /// 1-based position outside the collection.
    #[error("Invalid task number.")]
    InvalidPosition(usize),

    /// No item carries this id.
    #[error("Todo not found")]
    NotFound(TodoId),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TodoError {
    /// Returns true for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyText)
    }

    /// Returns true when the referenced position or id does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::InvalidPosition(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(TodoError::EmptyText.is_validation());
        assert!(TodoError::InvalidPosition(3).is_not_found());
        assert!(TodoError::NotFound(TodoId::new(7)).is_not_found());

        let storage = TodoError::from(StorageError::Poisoned);
        assert!(!storage.is_validation());
        assert!(!storage.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TodoError::EmptyText.to_string(), "Task text is required");
        assert_eq!(
            TodoError::InvalidPosition(0).to_string(),
            "Invalid task number."
        );
        assert_eq!(TodoError::NotFound(TodoId::new(1)).to_string(), "Todo not found");
    }
}
