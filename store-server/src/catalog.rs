//! Static ingredient registry
//!
//! Read-only input to pricing and inventory seeding. Ingredient names are
//! globally unique; the inventory store keys on them.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{IngredientCategory, IngredientOption};

/// The full ingredient registry, grouped by slot
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub bases: Vec<IngredientOption>,
    pub sauces: Vec<IngredientOption>,
    pub cheeses: Vec<IngredientOption>,
    pub extras: Vec<IngredientOption>,
    pub proteins: Vec<IngredientOption>,
}

fn opt(name: &str, cents: i64) -> IngredientOption {
    IngredientOption::new(name, Decimal::new(cents, 2))
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            bases: vec![
                opt("Thin Crust", 800),
                opt("Thick Crust", 1000),
                opt("Cheese Burst", 1200),
                opt("Gluten-Free", 1100),
                opt("Cauliflower Crust", 1200),
            ],
            sauces: vec![
                opt("Tomato", 100),
                opt("Pesto", 200),
                opt("White Garlic", 200),
                opt("BBQ", 150),
                opt("Spicy Red", 150),
            ],
            cheeses: vec![
                opt("Mozzarella", 200),
                opt("Cheddar", 200),
                opt("Parmesan", 250),
                opt("Vegan Cheese", 300),
                opt("Provolone", 200),
            ],
            extras: vec![
                opt("Onions", 50),
                opt("Bell Peppers", 50),
                opt("Mushrooms", 75),
                opt("Olives", 75),
                opt("Jalapeños", 75),
                opt("Tomatoes", 50),
                opt("Spinach", 75),
                opt("Pineapple", 100),
                opt("Broccoli", 75),
            ],
            proteins: vec![
                opt("Pepperoni", 200),
                opt("Sausage", 200),
                opt("Bacon", 250),
                opt("Chicken", 250),
                opt("Ham", 200),
            ],
        }
    }
}

impl Catalog {
    /// Ingredients of one category
    pub fn by_category(&self, category: IngredientCategory) -> &[IngredientOption] {
        match category {
            IngredientCategory::Base => &self.bases,
            IngredientCategory::Sauce => &self.sauces,
            IngredientCategory::Cheese => &self.cheeses,
            IngredientCategory::Extra => &self.extras,
            IngredientCategory::Protein => &self.proteins,
        }
    }

    /// Iterate every ingredient with its category
    pub fn iter_all(&self) -> impl Iterator<Item = (IngredientCategory, &IngredientOption)> {
        use IngredientCategory::*;
        [Base, Sauce, Cheese, Extra, Protein]
            .into_iter()
            .flat_map(|c| self.by_category(c).iter().map(move |o| (c, o)))
    }

    /// Global unit price lookup by name
    pub fn unit_price(&self, name: &str) -> Option<Decimal> {
        self.iter_all()
            .find(|(_, o)| o.name == name)
            .map(|(_, o)| o.unit_price)
    }
}
