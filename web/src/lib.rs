//! Axum HTTP API for the tasklist todo store.
//!
//! The "Functional Core, Imperative Shell" split: handlers parse requests,
//! build a [`TodoAction`](tasklist_core::TodoAction), hand it to the shared
//! [`TodoService`](tasklist_core::TodoService), and map the outcome or
//! rejection to a JSON response.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from the path and JSON body
//! 3. **Build Action** from extracted data
//! 4. **Dispatch** the action: load, reduce, save
//! 5. **Map result** to an HTTP response
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist_core::{FileStorage, TodoEnvironment, TodoService, environment::SystemClock};
//! use tasklist_web::{AppState, ServerConfig, app};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env();
//! let service = TodoService::new(
//!     Arc::new(FileStorage::new(&config.todo_file)),
//!     TodoEnvironment::new(Arc::new(SystemClock)),
//! );
//! let router = app(AppState::new(service), &config);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()?).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::{CorsPolicy, Environment, ServerConfig};
pub use error::AppError;
pub use middleware::{REQUEST_ID_HEADER, cors_layer, with_request_tracking};
pub use router::{app, todo_router};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
