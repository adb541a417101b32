//! Load, reduce, save.
//!
//! [`TodoService`] is the imperative shell around [`TodoReducer`]: it reads
//! the whole collection, applies one action, and writes the whole collection
//! back. Nothing is cached between calls, so every call sees what is on disk.

use crate::error::{Result, StorageError};
use crate::reducer::Reducer;
use crate::store::{self, Storage};
use crate::todo_reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoList, TodoOutcome};
use std::sync::Arc;

/// Runs todo actions against a backing store.
///
/// Holds no lock across the load/save cycle. Two callers racing on the same
/// storage can lose one of their updates.
///
/// Every call does synchronous I/O on the calling thread, including from
/// async handlers. The store is one small file read and written whole.
#[derive(Clone)]
pub struct TodoService {
    storage: Arc<dyn Storage>,
    reducer: TodoReducer,
    env: TodoEnvironment,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl TodoService {
    /// Creates a service over the given storage
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, env: TodoEnvironment) -> Self {
        Self {
            storage,
            reducer: TodoReducer::new(),
            env,
        }
    }

    /// Returns the current collection
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read or parsed.
    pub fn list(&self) -> Result<TodoList> {
        Ok(self.load()?)
    }

    /// Applies one action and persists the result
    ///
    /// The collection is only written when the action succeeds.
    ///
    /// # Errors
    ///
    /// Returns the reducer's rejection (validation or not-found) without
    /// touching storage, or a storage error from loading or saving.
    pub fn send(&self, action: TodoAction) -> Result<TodoOutcome> {
        let mut todos = self.load()?;

        let outcome = match self.reducer.reduce(&mut todos, action, &self.env) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::debug!(%error, "todo action rejected");
                return Err(error);
            }
        };

        self.save(&todos)?;
        tracing::info!(outcome = outcome_name(&outcome), items = todos.len(), "todo list updated");
        Ok(outcome)
    }

    /// Overwrites the store with an empty collection without reading it
    ///
    /// Unlike sending [`TodoAction::Clear`], this succeeds on a store that
    /// cannot be parsed, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the empty collection cannot be written.
    pub fn clear(&self) -> Result<()> {
        self.save(&TodoList::new())?;
        tracing::info!(outcome = "cleared", items = 0, "todo list updated");
        Ok(())
    }

    fn load(&self) -> std::result::Result<TodoList, StorageError> {
        store::load(self.storage.as_ref())
    }

    fn save(&self, todos: &TodoList) -> std::result::Result<(), StorageError> {
        store::save(self.storage.as_ref(), todos)
    }
}

const fn outcome_name(outcome: &TodoOutcome) -> &'static str {
    match outcome {
        TodoOutcome::Added(_) => "added",
        TodoOutcome::Created(_) => "created",
        TodoOutcome::Completed(_) => "completed",
        TodoOutcome::Updated(_) => "updated",
        TodoOutcome::Removed(_) => "removed",
        TodoOutcome::Cleared { .. } => "cleared",
        TodoOutcome::CompletedCleared { .. } => "completed_cleared",
        TodoOutcome::Reordered(_) => "reordered",
    }
}
