//! Stock reconciliation: matches requested lines against the catalog and
//! computes both the order lines and the new stock levels.

use common::{Money, OrderLine, Product};

use crate::error::OrderError;
use crate::request::OrderLineRequest;

/// Output of a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Lines for the new order, in catalog order.
    pub order_lines: Vec<OrderLine>,
    /// Catalog products carrying their reduced stock, versions as read.
    pub updated_products: Vec<Product>,
}

/// Validates requested quantities against current stock.
///
/// Walks `catalog` in order and, for each product, applies the first
/// requested line with the same id. Fails on the first product that has
/// no matching line, not enough stock, or whose amount would overflow the
/// order total; nothing is produced in that case.
pub fn reconcile(
    catalog: &[Product],
    requested: &[OrderLineRequest],
) -> Result<Reconciliation, OrderError> {
    let mut order_lines = Vec::with_capacity(catalog.len());
    let mut updated_products = Vec::with_capacity(catalog.len());
    let mut order_total = Money::zero();

    for product in catalog {
        let line = requested
            .iter()
            .find(|line| line.product_id == product.id)
            .ok_or_else(|| OrderError::ProductNotInRequest(product.id.clone()))?;

        let remaining = product.quantity.checked_sub(line.quantity).ok_or_else(|| {
            OrderError::InsufficientStock {
                product_id: product.id.clone(),
                requested: line.quantity,
                available: product.quantity,
            }
        })?;

        let order_line = OrderLine::new(product.id.clone(), product.price, line.quantity);
        order_total = order_line
            .total()
            .and_then(|line_total| order_total.checked_add(line_total))
            .ok_or_else(|| OrderError::AmountOverflow {
                product_id: product.id.clone(),
            })?;

        updated_products.push(product.with_quantity(remaining));
        order_lines.push(order_line);
    }

    Ok(Reconciliation {
        order_lines,
        updated_products,
    })
}
