//! Unified error codes for the store
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart or price does not reconcile with the catalog
    InvalidOrderData = 4002,
    /// Payment captured but the order write failed
    OrderNotRecorded = 4003,
    /// Unrecognized order status value
    InvalidOrderStatus = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment gateway rejected the request
    PaymentFailed = 5001,
    /// Payment gateway could not be reached
    PaymentGatewayUnavailable = 5002,

    // ==================== 6xxx: Inventory ====================
    /// Ingredient not found in the catalog or inventory
    IngredientNotFound = 6001,
    /// Stock value rejected (negative or malformed)
    InvalidStock = 6002,
    /// Requested units exceed remaining stock
    Oversold = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
}

/// Error returned when a u16 value does not map to a known error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            4001 => Self::OrderNotFound,
            4002 => Self::InvalidOrderData,
            4003 => Self::OrderNotRecorded,
            4004 => Self::InvalidOrderStatus,
            5001 => Self::PaymentFailed,
            5002 => Self::PaymentGatewayUnavailable,
            6001 => Self::IngredientNotFound,
            6002 => Self::InvalidStock,
            6003 => Self::Oversold,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::NetworkError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::OrderNotFound => "Order not found",
            Self::InvalidOrderData => "Invalid order data provided",
            Self::OrderNotRecorded => {
                "Payment succeeded but the order could not be recorded. Please contact support."
            }
            Self::InvalidOrderStatus => "Invalid order status",
            Self::PaymentFailed => "Payment failed",
            Self::PaymentGatewayUnavailable => "Payment gateway unavailable",
            Self::IngredientNotFound => "Ingredient not found",
            Self::InvalidStock => "Stock cannot be negative",
            Self::Oversold => "Requested units exceed remaining stock",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::NetworkError => "Network error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
