//! Catalog API handlers

use axum::{Json, extract::State};

use crate::catalog::Catalog;
use crate::core::ServerState;

/// GET /api/catalog - the full ingredient registry with unit prices
pub async fn get_catalog(State(state): State<ServerState>) -> Json<Catalog> {
    Json((*state.catalog).clone())
}
