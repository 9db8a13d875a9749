//! Inventory Model

use super::ingredient::IngredientCategory;
use serde::{Deserialize, Serialize};

/// Inventory entity
///
/// Durable stock count for one ingredient. Mutated only by admin adjustment
/// and by the order commit decrement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Option<String>,
    pub name: String,
    pub category: IngredientCategory,
    pub stock: i64,
}

/// A point-in-time stock reading for one ingredient
///
/// Used in low-stock alerts; carries the post-decrement stock value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub name: String,
    pub stock: i64,
}
