//! Order Model

use super::ingredient::IngredientOption;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One assembled pizza as it sits in the cart
///
/// Built client-side during assembly; `price` is frozen at cart-add time and
/// is a display hint only. The server re-prices every config against the
/// catalog before any money moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaConfig {
    /// Opaque client-generated token
    pub id: String,
    pub base: Option<IngredientOption>,
    pub sauce: Option<IngredientOption>,
    pub cheese: Option<IngredientOption>,
    #[serde(default)]
    pub extras: Vec<IngredientOption>,
    #[serde(default)]
    pub proteins: Vec<IngredientOption>,
    /// Sum of all selected ingredient prices, computed at cart-add time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl PizzaConfig {
    /// Names of every ingredient consumed by this pizza, one entry per unit
    pub fn ingredient_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for slot in [&self.base, &self.sauce, &self.cheese] {
            if let Some(opt) = slot {
                names.push(opt.name.as_str());
            }
        }
        for opt in self.extras.iter().chain(self.proteins.iter()) {
            names.push(opt.name.as_str());
        }
        names
    }
}

/// Fulfillment status of an order
///
/// Serialized with the customer-facing labels ("In the Kitchen", ...) that
/// the storefront displays verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "In the Kitchen")]
    InKitchen,
    #[serde(rename = "On its way")]
    OnItsWay,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InKitchen => "In the Kitchen",
            Self::OnItsWay => "On its way",
            Self::Delivered => "Delivered",
        }
    }

    /// Parse a customer-facing status label
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In the Kitchen" => Some(Self::InKitchen),
            "On its way" => Some(Self::OnItsWay),
            "Delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
///
/// Created exactly once per successful payment; never deleted. `status` is
/// the only admin-mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    pub user_id: String,
    pub cart: Vec<PizzaConfig>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: String,
    pub cart: Vec<PizzaConfig>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_roundtrip() {
        for status in [
            OrderStatus::InKitchen,
            OrderStatus::OnItsWay,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Cancelled"), None);
    }

    #[test]
    fn test_ingredient_names_flattens_all_slots() {
        let config = PizzaConfig {
            id: "p1".to_string(),
            base: Some(IngredientOption::new("Thin Crust", Decimal::new(800, 2))),
            sauce: None,
            cheese: Some(IngredientOption::new("Mozzarella", Decimal::new(200, 2))),
            extras: vec![IngredientOption::new("Onions", Decimal::new(50, 2))],
            proteins: vec![IngredientOption::new("Pepperoni", Decimal::new(200, 2))],
            price: Decimal::new(1250, 2),
        };
        assert_eq!(
            config.ingredient_names(),
            vec!["Thin Crust", "Mozzarella", "Onions", "Pepperoni"]
        );
    }
}
