//! Payment gateway adapter
//!
//! Creates payment intents with the external gateway. The charge amount is
//! always the server-recomputed total; a gateway failure aborts checkout
//! before the commit pipeline runs.

use crate::core::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment gateway unreachable: {0}")]
    Unreachable(String),

    #[error("Payment gateway rejected the request: {0}")]
    Rejected(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Unreachable(msg) => {
                AppError::with_message(ErrorCode::PaymentGatewayUnavailable, msg)
            }
            PaymentError::Rejected(msg) => AppError::with_message(ErrorCode::PaymentFailed, msg),
        }
    }
}

/// A charge handle created with the gateway before the commit pipeline runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Amount in minor units (cents)
    pub amount: i64,
    pub currency: String,
}

/// External payment collaborator
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for the given amount in minor units
    async fn create_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Razorpay Orders API client
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: config.razorpay_key_id.clone(),
            key_secret: config.razorpay_key_secret.clone(),
            base_url: config.razorpay_base_url.clone(),
        }
    }
}

#[derive(Serialize)]
struct GatewayOrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct GatewayOrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[async_trait]
impl PaymentProvider for RazorpayClient {
    async fn create_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/orders", self.base_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&GatewayOrderRequest {
                amount: amount_minor_units,
                currency,
                receipt,
            })
            .send()
            .await
            .map_err(|e| PaymentError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Rejected(format!("{status}: {body}")));
        }

        let order: GatewayOrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Rejected(format!("Malformed gateway response: {e}")))?;

        Ok(PaymentIntent {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }
}
