//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`catalog`] - ingredient registry
//! - [`checkout`] - payment intent and order commit
//! - [`inventory`] - stock listing and adjustment
//! - [`orders`] - order listing and status updates

pub mod catalog;
pub mod checkout;
pub mod health;
pub mod inventory;
pub mod orders;

// Re-export common types for handlers
pub use shared::error::{AppError, AppResult};
