//! Database Module
//!
//! Embedded SurrealDB storage (RocksDB file store in production, in-memory
//! engine for tests).

pub mod repository;

use shared::error::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "slicecrafter";
const DATABASE: &str = "store";

/// Open the embedded database under `work_dir/database`
pub async fn open(work_dir: &str) -> Result<Surreal<Db>, AppError> {
    let path = Path::new(work_dir).join("database");
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    tracing::info!("Database connection established (SurrealDB RocksDB)");
    Ok(db)
}

/// Open an in-memory database (tests and ephemeral runs)
pub async fn open_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    Ok(db)
}
