//! Inventory API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::InventoryRepository;
use shared::error::{AppError, AppResult};
use shared::models::InventoryItem;

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub stock: i64,
}

/// GET /api/inventory - all tracked ingredients with current stock
///
/// Seeds the inventory from the catalog on first read, so a fresh store
/// always reports a full shelf.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryItem>>> {
    let repo = InventoryRepository::new(state.db.clone());
    repo.seed_if_empty(&state.catalog).await?;
    let items = repo.find_all().await?;
    Ok(Json(items))
}

/// PUT /api/inventory/:id - set an absolute stock level
pub async fn adjust(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AdjustStockRequest>,
) -> AppResult<Json<InventoryItem>> {
    if payload.stock < 0 {
        return Err(AppError::invalid_stock(format!(
            "Stock cannot be negative, got {}",
            payload.stock
        )));
    }
    let repo = InventoryRepository::new(state.db.clone());
    let item = repo.adjust(&id, payload.stock).await?;
    Ok(Json(item))
}
