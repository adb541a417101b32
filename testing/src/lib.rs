//! # Tasklist Testing
//!
//! Testing utilities and helpers for tasklist.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Test fixtures for todo items and services
//! - Property-based testing strategies
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```
//! use tasklist_core::{TodoAction, TodoList, TodoReducer};
//! use tasklist_testing::{ReducerTest, fixtures};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(fixtures::test_environment())
//!     .given_state(TodoList::new())
//!     .when_action(TodoAction::Add { text: "Buy milk".to_string() })
//!     .then_state(|state| assert_eq!(state.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::Clock;


/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// Its millisecond timestamp is [`TEST_TIMESTAMP_MILLIS`].
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Unix milliseconds of [`test_clock`], the id its first created todo gets
    pub const TEST_TIMESTAMP_MILLIS: i64 = 1_735_689_600_000;
}

/// Test fixtures for todo items, environments and services.
pub mod fixtures {
    use super::mocks::test_clock;
    use std::sync::Arc;
    use tasklist_core::{
        InMemoryStorage, TodoEnvironment, TodoId, TodoItem, TodoList, TodoService,
    };

    /// Environment with the fixed test clock
    #[must_use]
    pub fn test_environment() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()))
    }

    /// An item with an id, as the HTTP API creates them
    #[must_use]
    pub fn todo(id: i64, text: &str, done: bool) -> TodoItem {
        let mut item = TodoItem::with_id(TodoId::new(id), text);
        item.done = done;
        item
    }

    /// An item without an id, as the CLI creates them
    #[must_use]
    pub fn cli_todo(text: &str, done: bool) -> TodoItem {
        let mut item = TodoItem::new(text);
        item.done = done;
        item
    }

    /// The two-item list used throughout the reorder examples
    #[must_use]
    pub fn two_todos() -> TodoList {
        TodoList::from(vec![todo(1, "A", false), todo(2, "B", false)])
    }

    /// A service over fresh in-memory storage, plus a handle to that storage
    #[must_use]
    pub fn test_service() -> (TodoService, InMemoryStorage) {
        let storage = InMemoryStorage::new();
        let service = TodoService::new(Arc::new(storage.clone()), test_environment());
        (service, storage)
    }

    /// A service whose storage already holds `todos`
    ///
    /// # Panics
    ///
    /// Panics if the fixture list cannot be serialized.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn seeded_service(todos: &TodoList) -> (TodoService, InMemoryStorage) {
        let storage =
            InMemoryStorage::with_todos(todos).expect("fixture todos should serialize");
        let service = TodoService::new(Arc::new(storage.clone()), test_environment());
        (service, storage)
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use tasklist_core::{TodoId, TodoItem, TodoList};

    /// Any todo item, with or without an id
    pub fn arb_todo() -> impl Strategy<Value = TodoItem> {
        (proptest::option::of(0i64..1_000), "[a-zA-Z0-9 ]{1,16}", any::<bool>()).prop_map(
            |(id, text, done)| TodoItem {
                id: id.map(TodoId::new),
                text,
                done,
            },
        )
    }

    /// A list whose ids are unique, mixing id-less items in
    pub fn arb_todo_list() -> impl Strategy<Value = TodoList> {
        vec(arb_todo(), 0..12).prop_map(|items| {
            let mut seen = std::collections::HashSet::new();
            items
                .into_iter()
                .map(|mut item| {
                    if let Some(id) = item.id {
                        if !seen.insert(id) {
                            item.id = None;
                        }
                    }
                    item
                })
                .collect()
        })
    }

    /// An order list drawn from the same id range, so it hits and misses
    pub fn arb_order() -> impl Strategy<Value = Vec<TodoId>> {
        vec((0i64..1_000).prop_map(TodoId::new), 0..16)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, TEST_TIMESTAMP_MILLIS, test_clock};
pub use reducer_test::{ReducerTest, assertions};
