//! Order placement requests and their shape validation.

use std::collections::HashSet;

use common::{CustomerId, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, RequestError};

/// Default upper bound on lines in a single order.
pub const DEFAULT_MAX_LINES: usize = 100;

/// One requested line: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    #[serde(rename = "id", alias = "product_id")]
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLineRequest {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Command to place an order for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub customer_id: CustomerId,
    #[serde(rename = "products", alias = "lines")]
    pub lines: Vec<OrderLineRequest>,
}

impl PlaceOrder {
    /// Creates a new place order command.
    pub fn new(customer_id: impl Into<CustomerId>, lines: Vec<OrderLineRequest>) -> Self {
        Self {
            customer_id: customer_id.into(),
            lines,
        }
    }

    /// Returns the requested product ids in line order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|l| l.product_id.clone()).collect()
    }

    /// Checks the request shape against `limits` without touching any store.
    pub fn validate(&self, limits: &OrderLimits) -> Result<(), OrderError> {
        if self.customer_id.is_blank() {
            return Err(RequestError::EmptyCustomerId.into());
        }

        if self.lines.is_empty() {
            return Err(RequestError::NoLines.into());
        }

        if self.lines.len() > limits.max_lines {
            return Err(RequestError::TooManyLines {
                count: self.lines.len(),
                max: limits.max_lines,
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.quantity == 0 {
                return Err(RequestError::ZeroQuantity {
                    product_id: line.product_id.clone(),
                }
                .into());
            }
            if !seen.insert(&line.product_id) {
                return Err(OrderError::DuplicateProductInRequest(
                    line.product_id.clone(),
                ));
            }
        }

        Ok(())
    }
}

/// Bounds applied to every order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLimits {
    pub max_lines: usize,
}

impl Default for OrderLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}
