//! Todo endpoints.
//!
//! Every handler loads the whole collection through [`TodoService`], applies
//! one action, saves, and answers with JSON. Items are addressed by numeric
//! id; a path segment that is not a number matches nothing.
//!
//! [`TodoService`]: tasklist_core::TodoService

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tasklist_core::{TodoAction, TodoError, TodoId, TodoItem, TodoList, TodoOutcome};

const NOT_FOUND: &str = "Todo not found";
const ORDER_REQUIRED: &str = "order (array of ids) is required";

/// Body of create and update requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextRequest {
    /// Task text; required and non-blank
    #[serde(default)]
    pub text: Option<String>,
}

/// Body of a reorder request.
///
/// `order` is kept as raw JSON so a non-array can be answered with a 400
/// rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderRequest {
    /// Desired id order
    #[serde(default)]
    pub order: Option<Value>,
}

/// Confirmation body for deletions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Confirmation body for clearing completed todos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClearCompletedResponse {
    /// Human-readable confirmation
    pub message: String,
    /// How many todos were removed
    pub removed: usize,
}

/// List all todos in stored order.
///
/// ```text
/// GET /todos
/// ```
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
#[allow(clippy::unused_async)]
pub async fn list_todos(State(state): State<AppState>) -> WebResult<Json<TodoList>> {
    Ok(Json(state.service.list()?))
}

/// Create a todo with a fresh id.
///
/// ```text
/// POST /todos
/// { "text": "Buy milk" }
/// ```
///
/// Responds 201 with the created item.
///
/// # Errors
///
/// Returns 400 if `text` is missing or blank, 500 on storage failure.
#[allow(clippy::unused_async)]
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<TodoItem>)> {
    let text = required_text(body)?;
    match state.service.send(TodoAction::Create { text })? {
        TodoOutcome::Created(item) => {
            tracing::info!(id = ?item.id, "todo created");
            Ok((StatusCode::CREATED, Json(item)))
        }
        other => Err(unexpected(&other)),
    }
}

/// Mark a todo as done.
///
/// ```text
/// PUT /todos/:id/done
/// ```
///
/// # Errors
///
/// Returns 404 if no todo has this id, 500 on storage failure.
#[allow(clippy::unused_async)]
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<Json<TodoItem>> {
    let id = path_id(&raw_id)?;
    match state.service.send(TodoAction::Complete { id })? {
        TodoOutcome::Completed(item) => Ok(Json(item)),
        other => Err(unexpected(&other)),
    }
}

/// Replace a todo's text.
///
/// ```text
/// PUT /todos/:id
/// { "text": "  New text " }
/// ```
///
/// The stored text is trimmed.
///
/// # Errors
///
/// Returns 400 if `text` is missing or blank (checked before the lookup),
/// 404 if no todo has this id, 500 on storage failure.
#[allow(clippy::unused_async)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> WebResult<Json<TodoItem>> {
    let text = required_text(body)?;
    let id = path_id(&raw_id)?;
    match state.service.send(TodoAction::UpdateText { id, text })? {
        TodoOutcome::Updated(item) => Ok(Json(item)),
        other => Err(unexpected(&other)),
    }
}

/// Delete one todo.
///
/// ```text
/// DELETE /todos/:id
/// ```
///
/// # Errors
///
/// Returns 404 if no todo has this id, 500 on storage failure.
#[allow(clippy::unused_async)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<Json<MessageResponse>> {
    let id = path_id(&raw_id)?;
    state.service.send(TodoAction::Delete { id })?;
    Ok(Json(MessageResponse {
        message: "Todo removed".to_string(),
    }))
}

/// Delete every completed todo.
///
/// ```text
/// DELETE /todos/completed
/// ```
///
/// Always succeeds; reports how many were removed.
///
/// # Errors
///
/// Returns 500 on storage failure.
#[allow(clippy::unused_async)]
pub async fn clear_completed(
    State(state): State<AppState>,
) -> WebResult<Json<ClearCompletedResponse>> {
    match state.service.send(TodoAction::ClearCompleted)? {
        TodoOutcome::CompletedCleared { removed } => Ok(Json(ClearCompletedResponse {
            message: "Completed todos cleared".to_string(),
            removed,
        })),
        other => Err(unexpected(&other)),
    }
}

/// Rearrange todos.
///
/// ```text
/// PUT /todos/reorder
/// { "order": [3, 1, 2] }
/// ```
///
/// Listed ids come first in the given order; unknown ids are ignored and
/// unlisted todos follow in their previous order. Responds with the new
/// collection.
///
/// # Errors
///
/// Returns 400 if `order` is not an array, 500 on storage failure.
#[allow(clippy::unused_async)]
pub async fn reorder_todos(
    State(state): State<AppState>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> WebResult<Json<TodoList>> {
    let order = body.ok().and_then(|Json(request)| request.order);
    let order = parse_order(order.as_ref()).ok_or_else(|| AppError::bad_request(ORDER_REQUIRED))?;

    match state.service.send(TodoAction::Reorder { order })? {
        TodoOutcome::Reordered(todos) => Ok(Json(todos)),
        other => Err(unexpected(&other)),
    }
}

/// Delete every todo.
///
/// ```text
/// DELETE /todos
/// ```
///
/// The store is overwritten without being read, so this also replaces a
/// file that no longer parses.
///
/// # Errors
///
/// Returns 500 if the store cannot be written.
#[allow(clippy::unused_async)]
pub async fn clear_todos(State(state): State<AppState>) -> WebResult<Json<MessageResponse>> {
    state.service.clear()?;
    Ok(Json(MessageResponse {
        message: "All todos cleared".to_string(),
    }))
}

/// Answers other methods on `/todos/completed` and `/todos/reorder`.
///
/// Those segments read as an id that matches nothing.
#[allow(clippy::unused_async)]
pub async fn unknown_todo() -> AppError {
    AppError::not_found(NOT_FOUND)
}

/// Missing bodies, malformed JSON and non-string text all count as missing
/// text. Blank text is left to the reducer.
fn required_text(body: Result<Json<TextRequest>, JsonRejection>) -> WebResult<String> {
    match body {
        Ok(Json(TextRequest { text: Some(text) })) => Ok(text),
        Ok(_) => Err(TodoError::EmptyText.into()),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable todo body");
            Err(TodoError::EmptyText.into())
        }
    }
}

fn path_id(raw: &str) -> WebResult<TodoId> {
    TodoId::parse_lenient(raw).ok_or_else(|| AppError::not_found(NOT_FOUND))
}

/// Coerces a JSON `order` into ids.
///
/// Returns `None` unless `order` is an array. Integers, integral floats and
/// numeric strings become ids; other entries are skipped.
#[must_use]
pub fn parse_order(order: Option<&Value>) -> Option<Vec<TodoId>> {
    let Some(Value::Array(entries)) = order else {
        return None;
    };
    Some(entries.iter().filter_map(coerce_id).collect())
}

#[allow(clippy::cast_possible_truncation)] // range checked before the cast
fn coerce_id(value: &Value) -> Option<TodoId> {
    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e18)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.map(TodoId::new)
}

fn unexpected(outcome: &TodoOutcome) -> AppError {
    AppError::internal("An internal error occurred")
        .with_source(anyhow::anyhow!("unexpected outcome {outcome:?}"))
}
