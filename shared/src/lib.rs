//! Shared types for the SliceCrafter store
//!
//! Common types used by the store server and any future clients:
//! error types, response structures, and the ingredient/order data model.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
