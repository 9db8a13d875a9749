//! Cart pricer
//!
//! Pure price computation against the catalog. Client-supplied prices are
//! never trusted; every charge amount comes from these functions.

use crate::catalog::Catalog;
use rust_decimal::Decimal;
use shared::models::PizzaConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),
}

/// Price one pizza config: the sum of catalog unit prices over all filled
/// slots. Missing slots price as 0; completeness is a UI concern.
pub fn price_config(catalog: &Catalog, config: &PizzaConfig) -> Result<Decimal, PricingError> {
    let mut total = Decimal::ZERO;
    for name in config.ingredient_names() {
        let unit_price = catalog
            .unit_price(name)
            .ok_or_else(|| PricingError::UnknownIngredient(name.to_string()))?;
        total += unit_price;
    }
    Ok(total)
}

/// Price a whole cart; an empty cart prices to 0
pub fn price_cart(catalog: &Catalog, cart: &[PizzaConfig]) -> Result<Decimal, PricingError> {
    let mut total = Decimal::ZERO;
    for config in cart {
        total += price_config(catalog, config)?;
    }
    Ok(total)
}
