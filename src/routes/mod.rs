//! HTTP route handlers.
//!
//! Probe routes carry `Cache-Control: no-store` so intermediaries never answer
//! a liveness or readiness check from cache.
//!
//! Request tracing is enabled via middleware that assigns or propagates a request
//! ID for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod ready;

use axum::{middleware, routing::get, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_PROBE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and the correlation middleware.
pub fn create_router(state: AppState) -> Router {
    let probe_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(ready::ready))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PROBE),
        ));

    with_request_id(probe_routes.with_state(state))
}

/// Wrap a router in the request ID middleware.
///
/// Applied last, so it is the outermost layer and also sees requests that
/// match no route.
pub fn with_request_id(router: Router) -> Router {
    router.layer(middleware::from_fn(request_id_layer))
}
