//! Catalog products

use serde::{Deserialize, Serialize};

/// A catalog product
///
/// Immutable once loaded; user actions never mutate products. Prices are
/// denominated in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub delivery_info: Option<String>,
}

/// A product definition before it is loaded into the catalog
///
/// The shipped seed and any future catalog source produce these; the store
/// assigns ids on load.
#[derive(Debug, Clone)]
pub struct ProductSeed {
    pub name: &'static str,
    pub category: &'static str,
    pub price: f64,
    pub description: &'static str,
    pub delivery_info: &'static str,
}

impl ProductSeed {
    /// Validate a seed row before loading
    ///
    /// A bad row fails the whole catalog load; partial loads are never
    /// committed.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("product name is empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Err(format!("product '{}' has an empty category", self.name));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "product '{}' has an invalid price: {}",
                self.name, self.price
            ));
        }
        Ok(())
    }
}
