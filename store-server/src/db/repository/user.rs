//! User Repository
//!
//! The core only needs the operator contact lookup used by the low-stock
//! notifier; account management lives in the storefront.

use super::{BaseRepository, RepoResult};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Debug, Deserialize)]
struct EmailRow {
    email: String,
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Email address of an admin user, if any is configured
    pub async fn find_admin_email(&self) -> RepoResult<Option<String>> {
        let rows: Vec<EmailRow> = self
            .base
            .db()
            .query("SELECT email FROM user WHERE role = 'admin' LIMIT 1")
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.email))
    }
}
