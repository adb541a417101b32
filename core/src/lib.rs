//! # Tasklist Core
//!
//! Domain types and business logic shared by the tasklist CLI and HTTP API.
//!
//! Both front ends work against the same persisted collection: a JSON array
//! of todo items stored in a single file. Every operation loads the whole
//! collection, applies one action through the [`TodoReducer`], and writes the
//! whole collection back.
//!
//! ## Core Concepts
//!
//! - **State**: [`TodoList`], the ordered collection of [`TodoItem`]s
//! - **Action**: [`TodoAction`], one variant per CLI command or HTTP endpoint
//! - **Reducer**: `(State, Action, Environment) → Result<Outcome, Error>`
//! - **Storage**: [`Storage`], an injectable byte sink (file or memory)
//! - **Environment**: injected dependencies, currently just a [`Clock`](environment::Clock)
//!
//! ## Addressing
//!
//! The CLI addresses items by 1-based position, the HTTP API by numeric id.
//! The two schemes are kept as distinct action variants. Items created by the
//! CLI carry no id, so id-based operations never match them.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tasklist_core::environment::SystemClock;
//! use tasklist_core::{InMemoryStorage, TodoAction, TodoEnvironment, TodoService};
//!
//! # fn main() -> Result<(), tasklist_core::TodoError> {
//! let service = TodoService::new(
//!     Arc::new(InMemoryStorage::new()),
//!     TodoEnvironment::new(Arc::new(SystemClock)),
//! );
//!
//! service.send(TodoAction::Add { text: "Buy milk".to_string() })?;
//! service.send(TodoAction::CompleteAt { position: 1 })?;
//!
//! let todos = service.list()?;
//! assert_eq!(todos.len(), 1);
//! assert!(todos.items()[0].done);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;
pub mod store;
pub mod todo_reducer;
pub mod types;

pub use error::{Result, StorageError, TodoError};
pub use service::TodoService;
pub use store::{FileStorage, InMemoryStorage, Storage};
pub use todo_reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoList, TodoOutcome};

/// Reducer module - the core trait for business logic
///
/// Reducers take the current state and an action, mutate the state in place
/// and report what happened. A reducer that returns an error must leave the
/// state exactly as it found it, so callers can skip persisting it.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Output`: What a successful reduction reports back to the caller
    /// - `Error`: Why an action was rejected
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The result of a successfully applied action
        type Output;

        /// The rejection type for invalid actions
        type Error;

        /// Reduce an action into a state change
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is rejected. The state is
        /// left untouched in that case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> std::result::Result<Self::Output, Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// New todo ids are derived from the clock, so tests inject a fixed
    /// clock to get predictable ids.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
