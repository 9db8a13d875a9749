//! Order Repository
//!
//! Orders are created exactly once per captured payment and never deleted;
//! `status` is the only field mutated afterwards (admin surface).

use super::{BaseRepository, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderCreate, OrderStatus, PizzaConfig};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "orders";

/// Recent-orders window for the admin dashboard
const RECENT_LIMIT: usize = 20;

#[derive(Debug, Serialize, Deserialize)]
struct OrderRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    user_id: String,
    cart: Vec<PizzaConfig>,
    #[serde(with = "rust_decimal::serde::float")]
    total_price: Decimal,
    payment_id: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Self {
        Self {
            id: r.id.map(|id| id.to_string()),
            user_id: r.user_id,
            cart: r.cart,
            total_price: r.total_price,
            payment_id: r.payment_id,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order with status "In the Kitchen"
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let record = OrderRecord {
            id: None,
            user_id: data.user_id,
            cart: data.cart,
            total_price: data.total_price,
            payment_id: data.payment_id,
            status: OrderStatus::InKitchen,
            created_at: Utc::now(),
        };
        let created: Option<OrderRecord> = self.base.db().create(TABLE).content(record).await?;
        created
            .map(Into::into)
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_id(id)?;
        let record: Option<OrderRecord> = self.base.db().select(record_id).await?;
        Ok(record.map(Into::into))
    }

    /// Most recent orders, newest first (admin dashboard)
    pub async fn find_recent(&self) -> RepoResult<Vec<Order>> {
        let records: Vec<OrderRecord> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY created_at DESC LIMIT $limit")
            .bind(("limit", RECENT_LIMIT))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// All orders placed by one user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let records: Vec<OrderRecord> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE user_id = $user_id ORDER BY created_at DESC")
            .bind(("user_id", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Admin-only status transition
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let record_id = parse_id(id)?;

        #[derive(Serialize)]
        struct StatusPatch {
            status: OrderStatus,
        }

        let updated: Option<OrderRecord> = self
            .base
            .db()
            .update(record_id)
            .merge(StatusPatch { status })
            .await?;
        updated
            .map(Into::into)
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }
}

fn parse_id(id: &str) -> RepoResult<RecordId> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| RepoError::NotFound(format!("Invalid order ID format: {id}")))?;
    if record_id.table() != TABLE {
        return Err(RepoError::NotFound(format!("Invalid order ID: {id}")));
    }
    Ok(record_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;
    use shared::models::IngredientOption;

    fn sample_cart() -> Vec<PizzaConfig> {
        vec![PizzaConfig {
            id: "cfg-1".to_string(),
            base: Some(IngredientOption::new("Thin Crust", Decimal::new(800, 2))),
            sauce: Some(IngredientOption::new("Tomato", Decimal::new(100, 2))),
            cheese: Some(IngredientOption::new("Mozzarella", Decimal::new(200, 2))),
            extras: vec![],
            proteins: vec![],
            price: Decimal::new(1100, 2),
        }]
    }

    fn sample_create(user_id: &str, payment_id: &str) -> OrderCreate {
        OrderCreate {
            user_id: user_id.to_string(),
            cart: sample_cart(),
            total_price: Decimal::new(1100, 2),
            payment_id: payment_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_sets_in_kitchen_status() {
        let repo = OrderRepository::new(open_memory().await.expect("memory db"));
        let order = repo
            .create(sample_create("user-1", "pay_1"))
            .await
            .expect("create");
        assert_eq!(order.status, OrderStatus::InKitchen);
        assert_eq!(order.total_price, Decimal::new(1100, 2));
        assert!(order.id.is_some());
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = OrderRepository::new(open_memory().await.expect("memory db"));
        let order = repo
            .create(sample_create("user-1", "pay_1"))
            .await
            .expect("create");
        let id = order.id.expect("id");

        let updated = repo
            .update_status(&id, OrderStatus::OnItsWay)
            .await
            .expect("update");
        assert_eq!(updated.status, OrderStatus::OnItsWay);

        let fetched = repo.find_by_id(&id).await.expect("find").expect("exists");
        assert_eq!(fetched.status, OrderStatus::OnItsWay);
    }

    #[tokio::test]
    async fn test_find_by_user_filters() {
        let repo = OrderRepository::new(open_memory().await.expect("memory db"));
        repo.create(sample_create("alice", "pay_1"))
            .await
            .expect("create");
        repo.create(sample_create("bob", "pay_2"))
            .await
            .expect("create");

        let orders = repo.find_by_user("alice").await.expect("find_by_user");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].payment_id, "pay_1");
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let repo = OrderRepository::new(open_memory().await.expect("memory db"));
        let err = repo
            .update_status("orders:nope", OrderStatus::Delivered)
            .await
            .expect_err("must fail");
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
