//! Checkout API handlers

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use uuid::Uuid;

use crate::checkout::CheckoutService;
use crate::core::ServerState;
use crate::db::repository::{InventoryRepository, OrderRepository};
use crate::payment::PaymentIntent;
use crate::pricing::price_cart;
use shared::error::{AppError, AppResult};
use shared::models::{Order, PizzaConfig};

const CURRENCY: &str = "USD";

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub cart: Vec<PizzaConfig>,
}

#[derive(Debug, Deserialize)]
pub struct CommitOrderRequest {
    pub user_id: String,
    pub cart: Vec<PizzaConfig>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_id: String,
}

/// POST /api/checkout/intent - create a payment intent for the cart
///
/// The amount is recomputed from the catalog on the server. The client's
/// prices never reach the gateway.
pub async fn create_intent(
    State(state): State<ServerState>,
    Json(payload): Json<CreateIntentRequest>,
) -> AppResult<Json<PaymentIntent>> {
    if payload.cart.is_empty() {
        return Err(AppError::invalid_order_data("Cart is empty"));
    }
    let total = price_cart(&state.catalog, &payload.cart)
        .map_err(|e| AppError::invalid_order_data(e.to_string()))?;
    let amount_minor_units = (total * Decimal::from(100))
        .to_i64()
        .ok_or_else(|| AppError::internal("Cart total out of range"))?;

    let receipt = format!("receipt_{}", Uuid::new_v4());
    let intent = state
        .payment
        .create_intent(amount_minor_units, CURRENCY, &receipt)
        .await?;
    Ok(Json(intent))
}

/// POST /api/checkout/commit - record a paid order
pub async fn commit(
    State(state): State<ServerState>,
    Json(payload): Json<CommitOrderRequest>,
) -> AppResult<Json<Order>> {
    let service = CheckoutService::new(
        state.catalog.clone(),
        InventoryRepository::new(state.db.clone()),
        OrderRepository::new(state.db.clone()),
        state.notifier.clone(),
    );
    let order = service
        .commit_order(
            &payload.user_id,
            &payload.cart,
            payload.total_price,
            &payload.payment_id,
        )
        .await?;
    Ok(Json(order))
}
