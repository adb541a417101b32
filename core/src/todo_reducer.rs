//! Reducer logic for the todo list.
//!
//! Validate the action, then apply it. Every rejection happens before the
//! list is touched, so a failed action leaves the state unchanged.

use crate::environment::Clock;
use crate::error::TodoError;
use crate::reducer::Reducer;
use crate::types::{TodoAction, TodoId, TodoItem, TodoList, TodoOutcome};
use std::sync::Arc;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for generating ids
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates text for a new item
    fn validate_text(text: &str) -> Result<(), TodoError> {
        if text.trim().is_empty() {
            return Err(TodoError::EmptyText);
        }
        Ok(())
    }

    fn complete_at(state: &mut TodoList, position: usize) -> Result<TodoOutcome, TodoError> {
        let todo = state
            .get_position_mut(position)
            .ok_or(TodoError::InvalidPosition(position))?;
        todo.done = true;
        Ok(TodoOutcome::Completed(todo.clone()))
    }

    fn complete(state: &mut TodoList, id: TodoId) -> Result<TodoOutcome, TodoError> {
        let todo = state.find_mut(id).ok_or(TodoError::NotFound(id))?;
        todo.done = true;
        Ok(TodoOutcome::Completed(todo.clone()))
    }

    fn update_text(state: &mut TodoList, id: TodoId, text: &str) -> Result<TodoOutcome, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }
        let todo = state.find_mut(id).ok_or(TodoError::NotFound(id))?;
        text.clone_into(&mut todo.text);
        Ok(TodoOutcome::Updated(todo.clone()))
    }

    fn delete(state: &mut TodoList, id: TodoId) -> Result<TodoOutcome, TodoError> {
        state
            .index_of(id)
            .and_then(|index| state.remove_index(index))
            .map(TodoOutcome::Removed)
            .ok_or(TodoError::NotFound(id))
    }
}

impl Reducer for TodoReducer {
    type State = TodoList;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Output = TodoOutcome;
    type Error = TodoError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<Self::Output, Self::Error> {
        match action {
            // ========== Positional ==========
            TodoAction::Add { text } => {
                Self::validate_text(&text)?;
                let item = TodoItem::new(text);
                state.push(item.clone());
                Ok(TodoOutcome::Added(item))
            }

            TodoAction::CompleteAt { position } => Self::complete_at(state, position),

            TodoAction::RemoveAt { position } => state
                .remove_position(position)
                .map(TodoOutcome::Removed)
                .ok_or(TodoError::InvalidPosition(position)),

            // ========== Shared ==========
            TodoAction::Clear => Ok(TodoOutcome::Cleared {
                removed: state.clear(),
            }),

            // ========== Id-based ==========
            TodoAction::Create { text } => {
                Self::validate_text(&text)?;
                let id = state.next_id(env.clock.now().timestamp_millis());
                let item = TodoItem::with_id(id, text);
                state.push(item.clone());
                Ok(TodoOutcome::Created(item))
            }

            TodoAction::Complete { id } => Self::complete(state, id),

            TodoAction::UpdateText { id, text } => Self::update_text(state, id, &text),

            TodoAction::Delete { id } => Self::delete(state, id),

            TodoAction::ClearCompleted => Ok(TodoOutcome::CompletedCleared {
                removed: state.remove_completed(),
            }),

            TodoAction::Reorder { order } => {
                state.reorder(&order);
                Ok(TodoOutcome::Reordered(state.clone()))
            }
        }
    }
}
