//! Persistence for the todo collection.
//!
//! The collection is always read and written whole. [`Storage`] abstracts
//! the byte sink so the same code runs against a file in production and an
//! in-memory buffer in tests.
//!
//! There is no locking and no atomic rename: concurrent writers race and the
//! last save wins, and a crash mid-write can leave a truncated file.

use crate::error::StorageError;
use crate::types::TodoList;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Byte-level backing store for the todo collection.
pub trait Storage: Send + Sync {
    /// Reads the full contents.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing object exists but cannot
    /// be read.
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the full contents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the write fails.
    fn write(&self, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(bytes)
    }
}

/// Loads the collection, or an empty one if nothing is stored.
///
/// # Errors
///
/// Returns [`StorageError::Corrupt`] if the stored bytes are not a JSON
/// array of todo items, or any error from [`Storage::read`].
pub fn load<S: Storage + ?Sized>(storage: &S) -> Result<TodoList, StorageError> {
    let Some(bytes) = storage.read()? else {
        tracing::debug!("todo storage empty, starting with no items");
        return Ok(TodoList::new());
    };

    let todos: TodoList = serde_json::from_slice(&bytes).map_err(StorageError::Corrupt)?;
    tracing::debug!(items = todos.len(), bytes = bytes.len(), "loaded todo list");
    Ok(todos)
}

/// Serializes the whole collection and overwrites the store.
///
/// Output is pretty-printed with two-space indentation so the file diffs
/// cleanly.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if serialization fails, or any error
/// from [`Storage::write`].
pub fn save<S: Storage + ?Sized>(storage: &S, todos: &TodoList) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(todos).map_err(StorageError::Encode)?;
    storage.write(&bytes)?;
    tracing::debug!(items = todos.len(), bytes = bytes.len(), "saved todo list");
    Ok(())
}

/// Stores the collection in a single file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a file-backed store. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// In-memory store.
///
/// Clones share the same buffer, so a test can keep a handle and inspect
/// what a service wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    bytes: Arc<Mutex<Option<Vec<u8>>>>,
}

impl InMemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with raw bytes.
    #[must_use]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Arc::new(Mutex::new(Some(bytes.into()))),
        }
    }

    /// Creates a store preloaded with a serialized collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if serialization fails.
    pub fn with_todos(todos: &TodoList) -> Result<Self, StorageError> {
        let storage = Self::new();
        save(&storage, todos)?;
        Ok(storage)
    }

    /// Returns a copy of the stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Option<Vec<u8>>, StorageError> {
        self.read()
    }
}

impl Storage for InMemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let guard = self.bytes.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let mut guard = self.bytes.lock().map_err(|_| StorageError::Poisoned)?;
        *guard = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::types::{TodoId, TodoItem};

    fn sample() -> TodoList {
        let mut done = TodoItem::with_id(TodoId::new(2), "B");
        done.done = true;
        TodoList::from(vec![
            TodoItem::with_id(TodoId::new(1), "A"),
            done,
            TodoItem::new("from cli"),
        ])
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = InMemoryStorage::new();
        let todos = load(&storage).unwrap();
        assert!(todos.is_empty());
    }

    #[test]
    fn test_round_trip_in_memory() {
        let storage = InMemoryStorage::new();
        let todos = sample();
        save(&storage, &todos).unwrap();
        assert_eq!(load(&storage).unwrap(), todos);
    }

    #[test]
    fn test_pretty_printed_with_two_spaces() {
        let storage = InMemoryStorage::new();
        save(&storage, &TodoList::from(vec![TodoItem::with_id(TodoId::new(1), "A")])).unwrap();
        let text = String::from_utf8(storage.snapshot().unwrap().unwrap()).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"id\": 1,\n    \"text\": \"A\",\n    \"done\": false\n  }\n]"
        );
    }

    #[test]
    fn test_empty_list_serializes_as_empty_array() {
        let storage = InMemoryStorage::new();
        save(&storage, &TodoList::new()).unwrap();
        assert_eq!(storage.snapshot().unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_corrupt_data_is_an_error() {
        let storage = InMemoryStorage::with_bytes("{not json");
        let err = load(&storage).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let storage = InMemoryStorage::with_bytes(r#"{"text":"not an array"}"#);
        assert!(matches!(load(&storage), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_clones_share_buffer() {
        let storage = InMemoryStorage::new();
        let handle = storage.clone();
        save(&storage, &sample()).unwrap();
        assert_eq!(load(&handle).unwrap(), sample());
    }

    #[test]
    fn test_file_storage_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("todos.json"));
        assert!(storage.read().unwrap().is_none());
        assert!(load(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("todos.json"));
        save(&storage, &sample()).unwrap();
        assert!(storage.path().exists());
        assert_eq!(load(&storage).unwrap(), sample());
    }

    #[test]
    fn test_file_storage_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("todos.json"));
        save(&storage, &sample()).unwrap();
        save(&storage, &TodoList::new()).unwrap();
        let raw = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(raw, "[]");
    }
}
