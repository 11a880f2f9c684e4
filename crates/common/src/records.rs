//! Records owned by the customer, product, and order stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, Money, OrderId, ProductId};

/// A customer as held by the customer store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A catalog entry with its current stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units available for sale.
    pub quantity: u32,
    /// Concurrency token. The product store bumps it on every quantity write
    /// and rejects updates carrying a stale value.
    #[serde(default)]
    pub version: u64,
}

impl Product {
    /// Creates a new product at version 0.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            version: 0,
        }
    }

    /// Returns a copy of this product carrying a different stock level.
    ///
    /// The version is kept as read, so the store can detect whether the
    /// product changed in between.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

/// A line of a placed order, with the unit price captured at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub price: Money,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product_id: impl Into<ProductId>, price: Money, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            price,
            quantity,
        }
    }

    /// Returns price * quantity, or `None` if it does not fit in `Money`.
    pub fn total(&self) -> Option<Money> {
        self.price.checked_multiply(self.quantity)
    }
}

/// A placed order. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the sum of all line totals, or `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.lines
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(line.total()?))
    }

    /// Returns the ordered quantity for a product, if the order contains it.
    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| &line.product_id == product_id)
            .map(|line| line.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_quantity_leaves_original_untouched() {
        let product = Product::new("P1", "Widget", Money::from_cents(500), 10);
        let updated = product.with_quantity(7);

        assert_eq!(product.quantity, 10);
        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.version, product.version);
        assert_eq!(updated.price, product.price);
    }

    #[test]
    fn order_total_sums_lines() {
        let order = Order {
            id: OrderId::new(),
            customer_id: CustomerId::new("C1"),
            lines: vec![
                OrderLine::new("P1", Money::from_cents(500), 3),
                OrderLine::new("P2", Money::from_cents(250), 2),
            ],
            created_at: Utc::now(),
        };

        assert_eq!(order.total(), Some(Money::from_cents(2000)));
        assert_eq!(order.quantity_of(&ProductId::new("P2")), Some(2));
        assert_eq!(order.quantity_of(&ProductId::new("P9")), None);
    }

    #[test]
    fn oversized_totals_are_none() {
        let line = OrderLine::new("P1", Money::from_cents(i64::MAX / 2), 3);
        assert_eq!(line.total(), None);

        let order = Order {
            id: OrderId::new(),
            customer_id: CustomerId::new("C1"),
            lines: vec![
                OrderLine::new("P1", Money::from_cents(i64::MAX / 2), 1),
                OrderLine::new("P2", Money::from_cents(i64::MAX / 2), 1),
                OrderLine::new("P3", Money::from_cents(i64::MAX / 2), 1),
            ],
            created_at: Utc::now(),
        };
        assert_eq!(order.total(), None);
    }

    #[test]
    fn product_version_defaults_when_absent() {
        let product: Product = serde_json::from_str(
            r#"{"id": "P1", "name": "Widget", "price": 500, "quantity": 10}"#,
        )
        .unwrap();
        assert_eq!(product.version, 0);
        assert_eq!(product.price, Money::from_cents(500));
    }
}
