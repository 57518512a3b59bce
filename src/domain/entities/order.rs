//! Checkout order snapshots

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Currency, Product, Shopper};

/// One resolved cart line at checkout time
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: u32,
    /// Unit price converted to the order currency
    pub unit_price: f64,
    pub line_total: f64,
}

/// Ephemeral order snapshot produced once per checkout
///
/// The system keeps no order history; this exists only long enough to be
/// rendered for the shopper and delivered to the operators.
#[derive(Debug, Clone)]
pub struct OrderNotification {
    pub reference: Uuid,
    pub shopper: Shopper,
    pub placed_at: DateTime<Utc>,
    pub currency: Currency,
    pub lines: Vec<OrderLine>,
    pub grand_total: f64,
}

impl OrderNotification {
    pub fn new(shopper: Shopper, currency: Currency, lines: Vec<OrderLine>) -> Self {
        let grand_total = lines.iter().map(|line| line.line_total).sum();
        Self {
            reference: Uuid::new_v4(),
            shopper,
            placed_at: Utc::now(),
            currency,
            lines,
            grand_total,
        }
    }

    /// Short operator-facing reference
    pub fn short_reference(&self) -> String {
        self.reference.to_string()[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("product-{}", id),
            category: "streaming".to_string(),
            price,
            description: String::new(),
            delivery_info: None,
        }
    }

    #[test]
    fn grand_total_sums_line_totals() {
        let lines = vec![
            OrderLine {
                product: product(1, 1800.0),
                quantity: 2,
                unit_price: 1800.0,
                line_total: 3600.0,
            },
            OrderLine {
                product: product(2, 600.0),
                quantity: 1,
                unit_price: 600.0,
                line_total: 600.0,
            },
        ];
        let order = OrderNotification::new(Shopper::new(1), Currency::Cup, lines);
        assert_eq!(order.grand_total, 4200.0);
    }

    #[test]
    fn short_reference_is_eight_chars() {
        let order = OrderNotification::new(Shopper::new(1), Currency::Cup, Vec::new());
        assert_eq!(order.short_reference().len(), 8);
    }
}
