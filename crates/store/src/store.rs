use async_trait::async_trait;
use common::{Customer, CustomerId, Order, OrderId, OrderLine, Product, ProductId};

use crate::Result;

/// Read access to customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Looks up a customer by id. Returns `None` if it does not exist.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>>;
}

/// Access to the product catalog and its stock levels.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches every product whose id is in `ids`, in the order requested.
    ///
    /// Unknown ids are silently omitted, so the result may be shorter
    /// than the input.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>>;

    /// Overwrites the stock level of every given product as one batch.
    ///
    /// Each product carries the version it was read at. If any stored
    /// version differs, nothing is written and
    /// [`StoreError::StockConflict`](crate::StoreError::StockConflict) is returned.
    async fn update_quantities(&self, products: &[Product]) -> Result<()>;
}

/// Persistence for placed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Assigns an identity to a new order and persists it with its lines.
    async fn create(&self, customer: &Customer, lines: Vec<OrderLine>) -> Result<Order>;

    /// Loads an order by ID.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Removes an order. Used to undo a creation whose stock update failed.
    async fn delete(&self, id: OrderId) -> Result<()>;
}
