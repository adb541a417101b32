//! Axum middleware for cross-origin access and request tracking.
//!
//! - **CORS**: permissive in development, an origin allow-list in production
//! - **Request ids**: generated when absent, echoed back in `x-request-id`
//! - **Tracing**: one span per request carrying method, uri and request id
//!
//! # Example
//!
//! ```ignore
//! use tasklist_web::middleware::{cors_layer, with_request_tracking};
//!
//! let app = with_request_tracking(todo_routes(state))
//!     .layer(cors_layer(&config.cors_policy()));
//! ```

use crate::config::CorsPolicy;
use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, header},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Header name for request ids.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the CORS layer for a policy.
///
/// Origins in an allow-list that are not valid header values are skipped
/// with a warning.
#[must_use]
pub fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::Permissive => CorsLayer::very_permissive(),
        CorsPolicy::AllowList(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true)
        }
    }
}

/// Wrap a router with request id assignment, propagation and a trace span.
///
/// Incoming `x-request-id` headers are kept; otherwise a UUID is generated.
#[must_use]
pub fn with_request_tracking(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}
