//! Order commit pipeline
//!
//! The single authoritative transition from "payment confirmed" to
//! "order durable + inventory consistent + operators warned". Steps run
//! strictly in order: validate, persist, decrement, evaluate-and-notify.
//! Steps 3 and 4 are best-effort by design: once the payment is captured,
//! nothing may roll back the committed order.

use crate::catalog::Catalog;
use crate::db::repository::{InventoryRepository, OrderRepository};
use crate::notify::{LowStockAlert, NotifierHandle};
use crate::pricing::price_config;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderCreate, PizzaConfig, StockLevel};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Stock level at or below which the operator alert fires (policy value)
pub const LOW_STOCK_THRESHOLD: i64 = 20;

#[derive(Debug, Error)]
pub enum CommitError {
    /// The client sent a cart or price that does not reconcile with the
    /// catalog. Nothing was committed; the user may fix the cart and retry.
    #[error("Invalid order data: {0}")]
    InvalidOrderData(String),

    /// The order write failed after the payment was captured. The caller
    /// must surface "contact support" and must not invite a retry.
    #[error("Order could not be recorded: {0}")]
    Persistence(String),
}

impl From<CommitError> for AppError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::InvalidOrderData(msg) => AppError::invalid_order_data(msg),
            CommitError::Persistence(msg) => AppError::new(ErrorCode::OrderNotRecorded)
                .with_detail("cause", msg)
                .with_detail("retry", false),
        }
    }
}

/// Flatten a cart into the multiset of consumed ingredient names
pub fn consumed_counts(cart: &[PizzaConfig]) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    for config in cart {
        for name in config.ingredient_names() {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[derive(Clone)]
pub struct CheckoutService {
    catalog: Arc<Catalog>,
    inventory: InventoryRepository,
    orders: OrderRepository,
    notifier: NotifierHandle,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<Catalog>,
        inventory: InventoryRepository,
        orders: OrderRepository,
        notifier: NotifierHandle,
    ) -> Self {
        Self {
            catalog,
            inventory,
            orders,
            notifier,
        }
    }

    /// Commit a paid order
    ///
    /// Preconditions: the payment identified by `payment_id` has already
    /// been captured, for an amount created from a server-recomputed total.
    pub async fn commit_order(
        &self,
        user_id: &str,
        cart: &[PizzaConfig],
        total_price: Decimal,
        payment_id: &str,
    ) -> Result<Order, CommitError> {
        // 1. Validate cart shape and re-price against the catalog. The
        //    client-supplied prices are display hints only.
        if cart.is_empty() {
            return Err(CommitError::InvalidOrderData("Cart is empty".to_string()));
        }
        if user_id.trim().is_empty() || payment_id.trim().is_empty() {
            return Err(CommitError::InvalidOrderData(
                "Missing user or payment reference".to_string(),
            ));
        }
        let mut recomputed_total = Decimal::ZERO;
        for config in cart {
            let recomputed = price_config(&self.catalog, config)
                .map_err(|e| CommitError::InvalidOrderData(e.to_string()))?;
            if recomputed != config.price {
                return Err(CommitError::InvalidOrderData(format!(
                    "Pizza {} priced {} but catalog says {}",
                    config.id, config.price, recomputed
                )));
            }
            recomputed_total += recomputed;
        }
        if recomputed_total != total_price {
            return Err(CommitError::InvalidOrderData(format!(
                "Cart total {total_price} does not reconcile with catalog total {recomputed_total}"
            )));
        }

        // 2. Persist the order. Payment is already captured, so a failure
        //    here is a partial-failure state surfaced distinctly from
        //    validation failure.
        let order = self
            .orders
            .create(OrderCreate {
                user_id: user_id.to_string(),
                cart: cart.to_vec(),
                total_price,
                payment_id: payment_id.to_string(),
            })
            .await
            .map_err(|e| CommitError::Persistence(e.to_string()))?;

        let order_id = order.id.as_deref().unwrap_or("<unassigned>");
        tracing::info!(order_id, user_id, payment_id, "Order committed");

        // 3. Decrement inventory, best-effort. Stock accuracy matters but
        //    must never roll back a captured payment.
        let counts = consumed_counts(cart);
        match self.inventory.decrement_many(&counts).await {
            Ok(oversold) if !oversold.is_empty() => {
                for item in &oversold {
                    tracing::warn!(
                        order_id,
                        ingredient = %item.name,
                        requested = item.requested,
                        satisfied = item.satisfied,
                        "Ingredient oversold, flagging for operator review"
                    );
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    order_id,
                    error = %e,
                    "Inventory decrement failed, order remains committed"
                );
            }
        }

        // 4. Evaluate the low-stock threshold over exactly the consumed
        //    names and hand off to the notifier without waiting on it.
        match self.inventory.read_many(&counts.keys().cloned().collect::<Vec<_>>()).await {
            Ok(levels) => {
                let low: Vec<StockLevel> = counts
                    .keys()
                    .filter_map(|name| {
                        levels
                            .get(name)
                            .filter(|stock| **stock <= LOW_STOCK_THRESHOLD)
                            .map(|stock| StockLevel {
                                name: name.clone(),
                                stock: *stock,
                            })
                    })
                    .collect();
                if !low.is_empty() {
                    self.notifier.send(LowStockAlert { items: low });
                }
            }
            Err(e) => {
                tracing::warn!(
                    order_id,
                    error = %e,
                    "Post-decrement stock read failed, skipping low-stock evaluation"
                );
            }
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;
    use crate::notify;
    use shared::models::{IngredientOption, OrderStatus};
    use tokio::sync::mpsc;

    async fn service() -> (CheckoutService, mpsc::Receiver<LowStockAlert>, InventoryRepository) {
        let db = open_memory().await.expect("memory db");
        let catalog = Arc::new(Catalog::default());
        let inventory = InventoryRepository::new(db.clone());
        inventory.seed_if_empty(&catalog).await.expect("seed");
        let orders = OrderRepository::new(db);
        let (notifier, alert_rx) = notify::channel(8);
        (
            CheckoutService::new(catalog, inventory.clone(), orders, notifier),
            alert_rx,
            inventory,
        )
    }

    fn option(name: &str, cents: i64) -> IngredientOption {
        IngredientOption::new(name, Decimal::new(cents, 2))
    }

    /// Thin Crust ($8) + Tomato ($1) + Mozzarella ($2) = $11
    fn margherita() -> PizzaConfig {
        PizzaConfig {
            id: "p1".to_string(),
            base: Some(option("Thin Crust", 800)),
            sauce: Some(option("Tomato", 100)),
            cheese: Some(option("Mozzarella", 200)),
            extras: vec![],
            proteins: vec![],
            price: Decimal::new(1100, 2),
        }
    }

    async fn set_stock(inventory: &InventoryRepository, name: &str, stock: i64) {
        let items = inventory.find_all().await.expect("find_all");
        let item = items.iter().find(|i| i.name == name).expect("item");
        inventory
            .adjust(item.id.as_deref().expect("id"), stock)
            .await
            .expect("adjust");
    }

    #[tokio::test]
    async fn test_commit_persists_order_and_decrements_stock() {
        let (service, _alert_rx, inventory) = service().await;

        let order = service
            .commit_order("user-1", &[margherita()], Decimal::new(1100, 2), "pay_1")
            .await
            .expect("commit");

        assert_eq!(order.status, OrderStatus::InKitchen);
        assert_eq!(order.total_price, Decimal::new(1100, 2));
        assert_eq!(order.payment_id, "pay_1");

        let levels = inventory
            .read_many(&[
                "Thin Crust".to_string(),
                "Tomato".to_string(),
                "Mozzarella".to_string(),
            ])
            .await
            .expect("read_many");
        assert_eq!(levels.get("Thin Crust"), Some(&99));
        assert_eq!(levels.get("Tomato"), Some(&99));
        assert_eq!(levels.get("Mozzarella"), Some(&99));
    }

    #[tokio::test]
    async fn test_commit_rejects_tampered_total() {
        let (service, _alert_rx, inventory) = service().await;

        let err = service
            .commit_order("user-1", &[margherita()], Decimal::new(100, 2), "pay_1")
            .await
            .expect_err("must reject");
        assert!(matches!(err, CommitError::InvalidOrderData(_)));

        // No side effects before validation passes
        let levels = inventory
            .read_many(&["Thin Crust".to_string()])
            .await
            .expect("read_many");
        assert_eq!(levels.get("Thin Crust"), Some(&100));
    }

    #[tokio::test]
    async fn test_commit_rejects_tampered_config_price() {
        let (service, _alert_rx, _inventory) = service().await;

        let mut pizza = margherita();
        pizza.price = Decimal::new(100, 2);
        let err = service
            .commit_order("user-1", &[pizza], Decimal::new(100, 2), "pay_1")
            .await
            .expect_err("must reject");
        assert!(matches!(err, CommitError::InvalidOrderData(_)));
    }

    #[tokio::test]
    async fn test_commit_rejects_empty_cart() {
        let (service, _alert_rx, _inventory) = service().await;
        let err = service
            .commit_order("user-1", &[], Decimal::ZERO, "pay_1")
            .await
            .expect_err("must reject");
        assert!(matches!(err, CommitError::InvalidOrderData(_)));
    }

    #[tokio::test]
    async fn test_threshold_crossing_notifies_with_post_decrement_stock() {
        let (service, mut alert_rx, inventory) = service().await;
        set_stock(&inventory, "Pepperoni", 19).await;

        let mut pizza = margherita();
        pizza.proteins = vec![option("Pepperoni", 200)];
        pizza.price = Decimal::new(1300, 2);

        service
            .commit_order("user-1", &[pizza], Decimal::new(1300, 2), "pay_2")
            .await
            .expect("commit");

        let alert = alert_rx.try_recv().expect("alert expected");
        assert_eq!(
            alert.items,
            vec![StockLevel {
                name: "Pepperoni".to_string(),
                stock: 18,
            }]
        );
    }

    #[tokio::test]
    async fn test_unconsumed_low_ingredients_are_not_reported() {
        let (service, mut alert_rx, inventory) = service().await;
        // Broccoli is low but not part of this order
        set_stock(&inventory, "Broccoli", 2).await;

        service
            .commit_order("user-1", &[margherita()], Decimal::new(1100, 2), "pay_3")
            .await
            .expect("commit");

        assert!(alert_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_alert_fires_at_threshold_boundary() {
        let (service, mut alert_rx, inventory) = service().await;
        // 21 before decrement lands exactly on the threshold of 20
        set_stock(&inventory, "Tomato", 21).await;

        service
            .commit_order("user-1", &[margherita()], Decimal::new(1100, 2), "pay_4")
            .await
            .expect("commit");

        let alert = alert_rx.try_recv().expect("alert expected");
        assert_eq!(alert.items.len(), 1);
        assert_eq!(alert.items[0].name, "Tomato");
        assert_eq!(alert.items[0].stock, 20);
    }

    #[tokio::test]
    async fn test_oversold_order_is_still_honored() {
        let (service, _alert_rx, inventory) = service().await;
        set_stock(&inventory, "Mozzarella", 0).await;

        let order = service
            .commit_order("user-1", &[margherita()], Decimal::new(1100, 2), "pay_5")
            .await
            .expect("commit must succeed");
        assert_eq!(order.status, OrderStatus::InKitchen);

        // Stock clamps at 0 rather than going negative
        let levels = inventory
            .read_many(&["Mozzarella".to_string()])
            .await
            .expect("read_many");
        assert_eq!(levels.get("Mozzarella"), Some(&0));
    }

    #[tokio::test]
    async fn test_multiset_decrement_across_cart() {
        let (service, _alert_rx, inventory) = service().await;

        // Two pizzas sharing the same base
        let cart = vec![margherita(), {
            let mut p = margherita();
            p.id = "p2".to_string();
            p
        }];

        service
            .commit_order("user-1", &cart, Decimal::new(2200, 2), "pay_6")
            .await
            .expect("commit");

        let levels = inventory
            .read_many(&["Thin Crust".to_string()])
            .await
            .expect("read_many");
        assert_eq!(levels.get("Thin Crust"), Some(&98));
    }

    #[test]
    fn test_consumed_counts_flattens_multiset() {
        let mut pizza = margherita();
        pizza.extras = vec![option("Onions", 50)];
        let counts = consumed_counts(&[pizza.clone(), pizza]);
        assert_eq!(counts.get("Thin Crust"), Some(&2));
        assert_eq!(counts.get("Onions"), Some(&2));
        assert_eq!(counts.len(), 4);
    }
}
