//! Ingredient Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five ingredient slots of a pizza
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Base,
    Sauce,
    Cheese,
    Extra,
    Protein,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Sauce => "sauce",
            Self::Cheese => "cheese",
            Self::Extra => "extra",
            Self::Protein => "protein",
        }
    }
}

/// A purchasable ingredient as defined by the catalog
///
/// Identity is `name`: unique within a category and globally, since the
/// inventory store keys on name alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientOption {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl IngredientOption {
    pub fn new(name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }
}
