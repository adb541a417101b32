//! Route table.
//!
//! Composes the todo and health handlers into a single Axum router.

use crate::config::ServerConfig;
use crate::handlers::{health, todos};
use crate::middleware::{cors_layer, with_request_tracking};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, put},
};

/// Create the API router.
///
/// # Routes
///
/// - `GET /health` - Liveness probe
/// - `GET /todos` - List todos
/// - `POST /todos` - Create a todo
/// - `DELETE /todos` - Delete every todo
/// - `DELETE /todos/completed` - Delete completed todos
/// - `PUT /todos/reorder` - Rearrange todos
/// - `PUT /todos/:id` - Replace a todo's text
/// - `DELETE /todos/:id` - Delete a todo
/// - `PUT /todos/:id/done` - Mark a todo as done
///
/// The static `completed` and `reorder` segments win over `:id`. Other
/// methods on them answer 404 `Todo not found`, as an unknown id would.
pub fn todo_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/todos",
            get(todos::list_todos)
                .post(todos::create_todo)
                .delete(todos::clear_todos),
        )
        .route(
            "/todos/completed",
            delete(todos::clear_completed).fallback(todos::unknown_todo),
        )
        .route(
            "/todos/reorder",
            put(todos::reorder_todos).fallback(todos::unknown_todo),
        )
        .route(
            "/todos/:id",
            put(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/todos/:id/done", put(todos::complete_todo))
        .with_state(state)
}

/// Create the full application: routes, request tracking and CORS.
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(TodoService::new(storage, env));
/// let app = app(state, &ServerConfig::from_env());
/// axum::serve(listener, app).await?;
/// ```
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    with_request_tracking(todo_router(state)).layer(cors_layer(&config.cors_policy()))
}
