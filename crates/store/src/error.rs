use common::{OrderId, ProductId};
use thiserror::Error;

/// Errors that can occur when interacting with a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A product changed between read and write.
    /// The version carried by the update did not match the stored version.
    #[error(
        "Stock conflict for product {product_id}: expected version {expected}, found {actual}"
    )]
    StockConflict {
        product_id: ProductId,
        expected: u64,
        actual: u64,
    },

    /// A record addressed by an update or delete does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backing storage could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn order_not_found(order_id: OrderId) -> Self {
        StoreError::NotFound(format!("order {order_id}"))
    }

    pub fn product_not_found(product_id: &ProductId) -> Self {
        StoreError::NotFound(format!("product {product_id}"))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
