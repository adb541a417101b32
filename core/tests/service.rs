//! Load/reduce/save cycle against injected storage.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use std::sync::Arc;
use tasklist_core::store::{self, Storage};
use tasklist_core::{
    FileStorage, InMemoryStorage, StorageError, TodoAction, TodoError, TodoId, TodoList,
    TodoOutcome, TodoService,
};
use tasklist_testing::fixtures::{seeded_service, test_environment, test_service, todo, two_todos};

#[test]
fn test_list_on_empty_storage_does_not_write() {
    let (service, storage) = test_service();
    assert!(service.list().unwrap().is_empty());
    assert!(storage.snapshot().unwrap().is_none());
}

#[test]
fn test_send_persists_outcome() {
    let (service, storage) = test_service();
    service
        .send(TodoAction::Add {
            text: "Buy milk".to_string(),
        })
        .unwrap();

    let stored = store::load(&storage).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.items()[0].text, "Buy milk");
}

#[test]
fn test_rejected_action_does_not_write() {
    let (service, storage) = seeded_service(&two_todos());
    let before = storage.snapshot().unwrap();

    let err = service.send(TodoAction::Delete { id: TodoId::new(42) }).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(storage.snapshot().unwrap(), before);
}

#[test]
fn test_clear_writes_even_when_empty() {
    let (service, storage) = test_service();
    service.send(TodoAction::Clear).unwrap();
    assert_eq!(storage.snapshot().unwrap().unwrap(), b"[]");

    service.send(TodoAction::Clear).unwrap();
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn test_corrupt_storage_propagates() {
    let storage = InMemoryStorage::with_bytes("not json at all");
    let service = TodoService::new(Arc::new(storage), test_environment());

    let err = service.send(TodoAction::Clear).unwrap_err();
    assert!(matches!(err, TodoError::Storage(StorageError::Corrupt(_))));
    assert!(matches!(
        service.list(),
        Err(TodoError::Storage(StorageError::Corrupt(_)))
    ));
}

#[test]
fn test_clear_without_load_replaces_corrupt_storage() {
    let storage = InMemoryStorage::with_bytes("[{");
    let service = TodoService::new(Arc::new(storage.clone()), test_environment());

    service.clear().unwrap();
    assert_eq!(storage.snapshot().unwrap().unwrap(), b"[]");
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn test_each_call_sees_storage_changes() {
    let (service, storage) = test_service();
    service
        .send(TodoAction::Create {
            text: "via service".to_string(),
        })
        .unwrap();

    // Another writer replaces the file behind the service's back
    store::save(&storage, &TodoList::from(vec![todo(7, "external", true)])).unwrap();

    let todos = service.list().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos.items()[0].id, Some(TodoId::new(7)));
}

#[test]
fn test_services_share_storage() {
    let (first, storage) = seeded_service(&two_todos());
    let second = TodoService::new(Arc::new(storage.clone()), test_environment());

    first.send(TodoAction::Complete { id: TodoId::new(1) }).unwrap();
    second.send(TodoAction::Delete { id: TodoId::new(2) }).unwrap();

    let stored = store::load(&storage).unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored.items()[0].done);
}

#[test]
fn test_clear_completed_example() {
    let (service, _storage) = seeded_service(&TodoList::from(vec![
        todo(1, "a", true),
        todo(2, "b", false),
        todo(3, "c", true),
    ]));

    let outcome = service.send(TodoAction::ClearCompleted).unwrap();
    assert_eq!(outcome, TodoOutcome::CompletedCleared { removed: 2 });
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn test_file_backed_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    let service = TodoService::new(Arc::new(FileStorage::new(&path)), test_environment());

    service
        .send(TodoAction::Add {
            text: "on disk".to_string(),
        })
        .unwrap();
    service.send(TodoAction::CompleteAt { position: 1 }).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        raw,
        "[\n  {\n    \"text\": \"on disk\",\n    \"done\": true\n  }\n]"
    );
}

#[test]
fn test_unreadable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file
    let storage = FileStorage::new(dir.path());
    assert!(matches!(storage.read(), Err(StorageError::Io(_))));
}
