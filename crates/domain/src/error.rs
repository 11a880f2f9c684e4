//! Domain error types.

use common::{CustomerId, OrderId, ProductId};
use store::StoreError;
use thiserror::Error;

/// A request that is malformed before any store is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Customer ID is required.
    #[error("Customer ID is required")]
    EmptyCustomerId,

    /// Order has no lines.
    #[error("Order has no lines")]
    NoLines,

    /// Too many lines in one order.
    #[error("Order has {count} lines (at most {max} allowed)")]
    TooManyLines { count: usize, max: usize },

    /// A line asks for nothing.
    #[error("Invalid quantity for {product_id}: must be greater than 0")]
    ZeroQuantity { product_id: ProductId },
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request failed shape validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// The same product appears on more than one line.
    #[error("Product {0} appears more than once in the order")]
    DuplicateProductInRequest(ProductId),

    /// Customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// One or more requested products are not in the catalog.
    #[error("Products not found: {}", join_ids(.0))]
    ProductsNotFound(Vec<ProductId>),

    /// A fetched product could not be matched to a requested line.
    #[error("Product {0} was fetched but is not part of the request")]
    ProductNotInRequest(ProductId),

    /// Not enough stock to fulfil a line.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A line total or the order total does not fit in `Money`.
    #[error("Order amount overflows at {product_id}")]
    AmountOverflow { product_id: ProductId },

    /// Stock changed between validation and update. Safe to retry.
    #[error("Stock for {product_id} changed concurrently, retry the order")]
    StockConflict { product_id: ProductId },

    /// A store failed.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// The stock update failed and removing the created order failed too.
    #[error("Order {order_id} was created but could not be rolled back: {cause}; rollback failed: {compensation}")]
    CompensationFailed {
        order_id: OrderId,
        cause: String,
        compensation: String,
    },
}

impl OrderError {
    /// Stable snake_case label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::InvalidRequest(_) => "invalid_request",
            OrderError::DuplicateProductInRequest(_) => "duplicate_product_in_request",
            OrderError::CustomerNotFound(_) => "customer_not_found",
            OrderError::ProductsNotFound(_) => "products_not_found",
            OrderError::ProductNotInRequest(_) => "product_not_in_request",
            OrderError::InsufficientStock { .. } => "insufficient_stock",
            OrderError::AmountOverflow { .. } => "amount_overflow",
            OrderError::StockConflict { .. } => "stock_conflict",
            OrderError::Store(_) => "store",
            OrderError::CompensationFailed { .. } => "compensation_failed",
        }
    }

    /// Returns true if the same request may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::StockConflict { .. })
    }
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::StockConflict { product_id, .. } => OrderError::StockConflict { product_id },
            other => OrderError::Store(other),
        }
    }
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ProductId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_not_found_lists_ids() {
        let err = OrderError::ProductsNotFound(vec![ProductId::new("P8"), ProductId::new("P9")]);
        assert_eq!(err.to_string(), "Products not found: P8, P9");
    }

    #[test]
    fn test_stock_conflict_maps_to_retryable_error() {
        let err: OrderError = StoreError::StockConflict {
            product_id: ProductId::new("P1"),
            expected: 0,
            actual: 1,
        }
        .into();

        assert_eq!(err.kind(), "stock_conflict");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_store_errors_are_not_retryable() {
        let err: OrderError = StoreError::Unavailable("down".to_string()).into();
        assert_eq!(err.kind(), "store");
        assert!(!err.is_retryable());
    }
}
