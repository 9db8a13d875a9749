//! Router assembly

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::catalog::router())
        .merge(crate::api::checkout::router())
        .merge(crate::api::inventory::router())
        .merge(crate::api::orders::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Build the complete application with state attached
pub fn build_app(state: ServerState) -> Router {
    build_router().with_state(state)
}
