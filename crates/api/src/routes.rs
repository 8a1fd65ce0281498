use crate::handlers;
use crate::state::AppState;
use axum::{routing::any, Router};

/// Method dispatch happens inside the DoH handler so that unsupported
/// methods get the gateway's own 405 diagnostic rather than the router's
/// bare rejection.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::homepage))
        .route("/dns-query", any(handlers::dns_query))
        .route("/{host}", any(handlers::dns_query_with_host))
        .with_state(state)
}
