//! Inventory Repository
//!
//! Sole source of truth for stock decisions. Mutated only by the order
//! commit decrement and by admin adjustment.

use super::{BaseRepository, RepoError, RepoResult};
use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use shared::models::{IngredientCategory, InventoryItem};
use std::collections::{BTreeMap, HashMap};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "inventory";

/// Starting stock assigned to every ingredient at bootstrap
pub const SEED_STOCK: i64 = 100;

/// A decrement that could not be fully satisfied
///
/// `satisfied` is how many units were actually consumed before the stock
/// floor at 0 was hit. The order is still honored; this exists so operators
/// can review the shortfall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversoldItem {
    pub name: String,
    pub requested: i64,
    pub satisfied: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct InventoryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    name: String,
    category: IngredientCategory,
    stock: i64,
}

impl From<InventoryRecord> for InventoryItem {
    fn from(r: InventoryRecord) -> Self {
        Self {
            id: r.id.map(|id| id.to_string()),
            name: r.name,
            category: r.category,
            stock: r.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StockRow {
    name: String,
    stock: i64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM inventory GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Populate the store from the catalog with a fixed starting stock
    ///
    /// Idempotent: guarded by a zero-count check, so repeated calls after
    /// seeding are no-ops. Returns whether seeding actually ran.
    pub async fn seed_if_empty(&self, catalog: &Catalog) -> RepoResult<bool> {
        if self.count().await? > 0 {
            return Ok(false);
        }

        for (category, option) in catalog.iter_all() {
            let record = InventoryRecord {
                id: None,
                name: option.name.clone(),
                category,
                stock: SEED_STOCK,
            };
            let _created: Option<InventoryRecord> =
                self.base.db().create(TABLE).content(record).await?;
        }

        tracing::info!("Inventory seeded from catalog ({SEED_STOCK} units each)");
        Ok(true)
    }

    /// All inventory items ordered by name (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<InventoryItem>> {
        let records: Vec<InventoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM inventory ORDER BY name")
            .await?
            .take(0)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Point-in-time stock snapshot for the given ingredient names
    pub async fn read_many(&self, names: &[String]) -> RepoResult<HashMap<String, i64>> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<StockRow> = self
            .base
            .db()
            .query("SELECT name, stock FROM inventory WHERE name IN $names")
            .bind(("names", names.to_vec()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(|r| (r.name, r.stock)).collect())
    }

    /// Decrement stock for a multiset of consumed ingredients in one batch
    ///
    /// The whole batch runs inside a single transaction, so concurrent
    /// readers never observe a torn intermediate state across it. Each
    /// per-ingredient decrement clamps at 0 instead of going negative;
    /// shortfall is returned as [`OversoldItem`]s. An unknown name (no
    /// inventory record) is reported as a shortfall with nothing satisfied.
    pub async fn decrement_many(
        &self,
        counts: &BTreeMap<String, i64>,
    ) -> RepoResult<Vec<OversoldItem>> {
        if counts.is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for i in 0..counts.len() {
            sql.push_str(&format!(
                "UPDATE inventory SET stock = math::max([stock - $qty{i}, 0]) \
                 WHERE name = $name{i} RETURN BEFORE;\n"
            ));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self.base.db().query(sql);
        for (i, (name, qty)) in counts.iter().enumerate() {
            query = query
                .bind((format!("name{i}"), name.clone()))
                .bind((format!("qty{i}"), *qty));
        }
        let mut response = query.await?;

        let mut oversold = Vec::new();
        for (i, (name, qty)) in counts.iter().enumerate() {
            let before: Vec<StockRow> = response.take(i)?;
            let available = before.first().map(|r| r.stock.max(0)).unwrap_or(0);
            if available < *qty {
                oversold.push(OversoldItem {
                    name: name.clone(),
                    requested: *qty,
                    satisfied: available,
                });
            }
        }
        Ok(oversold)
    }

    /// Admin absolute stock set; rejects negative values
    pub async fn adjust(&self, id: &str, new_stock: i64) -> RepoResult<InventoryItem> {
        if new_stock < 0 {
            return Err(RepoError::Validation("Stock cannot be negative".into()));
        }

        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid inventory ID format: {id}")))?;
        if record_id.table() != TABLE {
            return Err(RepoError::NotFound(format!("Invalid inventory ID: {id}")));
        }

        #[derive(Serialize)]
        struct StockPatch {
            stock: i64,
        }

        let updated: Option<InventoryRecord> = self
            .base
            .db()
            .update(record_id)
            .merge(StockPatch { stock: new_stock })
            .await?;
        updated
            .map(Into::into)
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;

    async fn seeded_repo() -> InventoryRepository {
        let db = open_memory().await.expect("memory db");
        let repo = InventoryRepository::new(db);
        let catalog = Catalog::default();
        assert!(repo.seed_if_empty(&catalog).await.expect("seed"));
        repo
    }

    fn counts(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs
            .iter()
            .map(|(name, qty)| (name.to_string(), *qty))
            .collect()
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = seeded_repo().await;
        let catalog = Catalog::default();

        // Mutate one item, then reseed; nothing may change
        let items = repo.find_all().await.expect("find_all");
        let first = items.first().expect("seeded items").clone();
        repo.adjust(first.id.as_deref().expect("id"), 42)
            .await
            .expect("adjust");

        assert!(!repo.seed_if_empty(&catalog).await.expect("reseed"));
        let levels = repo
            .read_many(&[first.name.clone()])
            .await
            .expect("read_many");
        assert_eq!(levels.get(&first.name), Some(&42));
    }

    #[tokio::test]
    async fn test_decrement_many_applies_multiplicity() {
        let repo = seeded_repo().await;
        let oversold = repo
            .decrement_many(&counts(&[("Mozzarella", 2), ("Tomato", 1)]))
            .await
            .expect("decrement");
        assert!(oversold.is_empty());

        let levels = repo
            .read_many(&["Mozzarella".to_string(), "Tomato".to_string()])
            .await
            .expect("read_many");
        assert_eq!(levels.get("Mozzarella"), Some(&98));
        assert_eq!(levels.get("Tomato"), Some(&99));
    }

    #[tokio::test]
    async fn test_decrement_clamps_at_zero_and_reports_oversold() {
        let repo = seeded_repo().await;
        let items = repo.find_all().await.expect("find_all");
        let pepperoni = items
            .iter()
            .find(|i| i.name == "Pepperoni")
            .expect("pepperoni");
        repo.adjust(pepperoni.id.as_deref().expect("id"), 1)
            .await
            .expect("adjust");

        let oversold = repo
            .decrement_many(&counts(&[("Pepperoni", 3)]))
            .await
            .expect("decrement");
        assert_eq!(
            oversold,
            vec![OversoldItem {
                name: "Pepperoni".to_string(),
                requested: 3,
                satisfied: 1,
            }]
        );

        let levels = repo
            .read_many(&["Pepperoni".to_string()])
            .await
            .expect("read_many");
        assert_eq!(levels.get("Pepperoni"), Some(&0));
    }

    #[tokio::test]
    async fn test_unknown_name_reports_nothing_satisfied() {
        let repo = seeded_repo().await;
        let oversold = repo
            .decrement_many(&counts(&[("Pineapple Crust", 1)]))
            .await
            .expect("decrement");
        assert_eq!(oversold.len(), 1);
        assert_eq!(oversold[0].satisfied, 0);
    }

    #[tokio::test]
    async fn test_adjust_rejects_negative_stock() {
        let repo = seeded_repo().await;
        let items = repo.find_all().await.expect("find_all");
        let id = items.first().expect("items").id.clone().expect("id");

        let err = repo.adjust(&id, -5).await.expect_err("must reject");
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
