//! Reducer behavior for both addressing schemes.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use tasklist_core::{TodoAction, TodoError, TodoId, TodoItem, TodoList, TodoOutcome, TodoReducer};
use tasklist_testing::fixtures::{cli_todo, test_environment, todo, two_todos};
use tasklist_testing::{ReducerTest, TEST_TIMESTAMP_MILLIS, assertions};

fn reducer_test() -> ReducerTest<TodoReducer> {
    ReducerTest::new(TodoReducer::new()).with_env(test_environment())
}

fn ids(state: &TodoList) -> Vec<Option<i64>> {
    state.items().iter().map(|t| t.id.map(TodoId::get)).collect()
}

// ========== Positional (CLI) ==========

#[test]
fn test_add_appends_without_id() {
    reducer_test()
        .given_state(TodoList::from(vec![cli_todo("first", false)]))
        .when_action(TodoAction::Add {
            text: "Buy milk".to_string(),
        })
        .then_state(|state| {
            assert_eq!(state.len(), 2);
            assert_eq!(state.items()[1], TodoItem::new("Buy milk"));
        })
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::Added(item)) if item.id.is_none()));
        })
        .run();
}

#[test]
fn test_add_empty_text_rejected() {
    for text in ["", "   ", "\t\n"] {
        reducer_test()
            .given_state(TodoList::new())
            .when_action(TodoAction::Add {
                text: text.to_string(),
            })
            .then_state(|state| assert!(state.is_empty()))
            .then_result(|result| assert!(matches!(result, Err(TodoError::EmptyText))))
            .run();
    }
}

#[test]
fn test_complete_at_position() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::CompleteAt { position: 2 })
        .then_state(|state| {
            assert!(!state.items()[0].done);
            assert!(state.items()[1].done);
        })
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::Completed(item)) if item.text == "B"));
        })
        .run();
}

#[test]
fn test_complete_at_out_of_range() {
    for position in [0, 3, usize::MAX] {
        let expected = two_todos();
        reducer_test()
            .given_state(two_todos())
            .when_action(TodoAction::CompleteAt { position })
            .then_state(move |state| assertions::assert_state_eq(state, &expected))
            .then_result(move |result| {
                assert!(matches!(result, Err(TodoError::InvalidPosition(p)) if *p == position));
            })
            .run();
    }
}

#[test]
fn test_remove_at_position() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::RemoveAt { position: 1 })
        .then_state(|state| assert_eq!(ids(state), vec![Some(2)]))
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::Removed(item)) if item.text == "A"));
        })
        .run();
}

#[test]
fn test_remove_at_out_of_range() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::RemoveAt { position: 5 })
        .then_state(|state| assert_eq!(state.len(), 2))
        .then_result(assertions::assert_rejected)
        .run();
}

#[test]
fn test_clear_is_idempotent() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::Clear)
        .then_state(|state| assert!(state.is_empty()))
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::Cleared { removed: 2 })));
        })
        .run();

    reducer_test()
        .given_state(TodoList::new())
        .when_action(TodoAction::Clear)
        .then_state(|state| assert!(state.is_empty()))
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::Cleared { removed: 0 })));
        })
        .run();
}

// ========== Id-based (HTTP) ==========

#[test]
fn test_create_assigns_clock_id() {
    reducer_test()
        .given_state(TodoList::new())
        .when_action(TodoAction::Create {
            text: "Write docs".to_string(),
        })
        .then_state(|state| {
            let item = &state.items()[0];
            assert_eq!(item.id, Some(TodoId::new(TEST_TIMESTAMP_MILLIS)));
            assert_eq!(item.text, "Write docs");
            assert!(!item.done);
        })
        .then_result(assertions::assert_ok)
        .run();
}

#[test]
fn test_create_avoids_id_collision() {
    reducer_test()
        .given_state(TodoList::from(vec![todo(TEST_TIMESTAMP_MILLIS, "existing", false)]))
        .when_action(TodoAction::Create {
            text: "second".to_string(),
        })
        .then_state(|state| {
            assert_eq!(
                ids(state),
                vec![Some(TEST_TIMESTAMP_MILLIS), Some(TEST_TIMESTAMP_MILLIS + 1)]
            );
        })
        .run();
}

#[test]
fn test_create_whitespace_rejected() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::Create {
            text: "  ".to_string(),
        })
        .then_state(|state| assert_eq!(state.len(), 2))
        .then_result(|result| assert!(matches!(result, Err(TodoError::EmptyText))))
        .run();
}

#[test]
fn test_complete_by_id() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::Complete { id: TodoId::new(1) })
        .then_state(|state| assert!(state.items()[0].done))
        .then_result(assertions::assert_ok)
        .run();
}

#[test]
fn test_complete_by_id_never_matches_cli_items() {
    reducer_test()
        .given_state(TodoList::from(vec![cli_todo("no id", false)]))
        .when_action(TodoAction::Complete { id: TodoId::new(0) })
        .then_state(|state| assert!(!state.items()[0].done))
        .then_result(|result| assert!(matches!(result, Err(TodoError::NotFound(_)))))
        .run();
}

#[test]
fn test_update_trims_text() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::UpdateText {
            id: TodoId::new(2),
            text: "  Renamed  ".to_string(),
        })
        .then_state(|state| {
            assert_eq!(state.items()[1].text, "Renamed");
            assert_eq!(state.items()[1].id, Some(TodoId::new(2)));
        })
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::Updated(item)) if item.text == "Renamed"));
        })
        .run();
}

#[test]
fn test_update_validates_before_lookup() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::UpdateText {
            id: TodoId::new(99),
            text: " ".to_string(),
        })
        .then_result(|result| assert!(matches!(result, Err(TodoError::EmptyText))))
        .run();
}

#[test]
fn test_update_unknown_id() {
    let expected = two_todos();
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::UpdateText {
            id: TodoId::new(99),
            text: "new".to_string(),
        })
        .then_state(move |state| assertions::assert_state_eq(state, &expected))
        .then_result(|result| assert!(matches!(result, Err(TodoError::NotFound(_)))))
        .run();
}

#[test]
fn test_delete_by_id() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::Delete { id: TodoId::new(1) })
        .then_state(|state| assert_eq!(ids(state), vec![Some(2)]))
        .then_result(assertions::assert_ok)
        .run();
}

#[test]
fn test_clear_completed_reports_count() {
    reducer_test()
        .given_state(TodoList::from(vec![
            todo(1, "a", true),
            todo(2, "b", false),
            todo(3, "c", true),
        ]))
        .when_action(TodoAction::ClearCompleted)
        .then_state(|state| assert_eq!(ids(state), vec![Some(2)]))
        .then_result(|result| {
            assert!(matches!(result, Ok(TodoOutcome::CompletedCleared { removed: 2 })));
        })
        .run();
}

#[test]
fn test_reorder_partial() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::Reorder {
            order: vec![TodoId::new(2)],
        })
        .then_state(|state| assert_eq!(ids(state), vec![Some(2), Some(1)]))
        .then_result(|result| {
            let Ok(TodoOutcome::Reordered(list)) = result else {
                panic!("expected reorder outcome, got {result:?}");
            };
            assert_eq!(ids(list), vec![Some(2), Some(1)]);
        })
        .run();
}

#[test]
fn test_reorder_with_unknown_id() {
    reducer_test()
        .given_state(two_todos())
        .when_action(TodoAction::Reorder {
            order: vec![TodoId::new(2), TodoId::new(1), TodoId::new(5)],
        })
        .then_state(|state| assert_eq!(ids(state), vec![Some(2), Some(1)]))
        .run();
}
