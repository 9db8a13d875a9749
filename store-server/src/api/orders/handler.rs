//! Order API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/orders/recent - most recent orders for the admin dashboard
pub async fn list_recent(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_recent().await?;
    Ok(Json(orders))
}

/// GET /api/orders/user/:user_id - a customer's order history
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user_id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - move an order through the fulfillment flow
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let status = OrderStatus::parse(&payload.status).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidOrderStatus,
            format!("Unknown order status: {}", payload.status),
        )
    })?;
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_status(&id, status).await?;
    Ok(Json(order))
}
