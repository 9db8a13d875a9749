//! SliceCrafter Store Server - custom pizza store backend
//!
//! # Architecture
//!
//! The transactional core of the store: pricing, payment intent creation,
//! the order commit pipeline, inventory accounting and the low-stock
//! notifier. Presentation (wizard UI, auth redirects, rendering) lives in
//! the storefront, not here.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded SurrealDB storage and repositories
//! ├── catalog.rs     # Static ingredient registry
//! ├── pricing.rs     # Cart pricer (pure)
//! ├── payment.rs     # Payment gateway adapter
//! ├── checkout/      # Order commit pipeline
//! ├── notify/        # Low-stock notifier worker
//! └── utils/         # Logging and helpers
//! ```

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod db;
pub mod notify;
pub mod payment;
pub mod pricing;
pub mod routes;
pub mod utils;

// Re-export public types
pub use catalog::Catalog;
pub use checkout::{CheckoutService, CommitError, LOW_STOCK_THRESHOLD};
pub use core::{Config, Server, ServerState};
pub use notify::{LowStockAlert, NotifierHandle};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
