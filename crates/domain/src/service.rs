//! Order placement workflow.

use common::{Order, Product, ProductId};
use store::{CustomerStore, OrderStore, ProductStore, StoreError};

use crate::error::OrderError;
use crate::reconcile::reconcile;
use crate::request::{OrderLimits, PlaceOrder};

/// The stores the workflow talks to, passed in by the caller.
#[derive(Debug, Clone)]
pub struct Stores<C, P, O> {
    pub customers: C,
    pub products: P,
    pub orders: O,
}

impl<C, P, O> Stores<C, P, O>
where
    C: CustomerStore,
    P: ProductStore,
    O: OrderStore,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }
}

/// Places orders against the catalog.
///
/// An order is only persisted when the customer exists and every
/// requested product exists with enough stock. The order is written
/// first and the stock second; if the stock write fails, the order is
/// deleted again before the error is returned.
pub struct OrderPlacementService<C, P, O>
where
    C: CustomerStore,
    P: ProductStore,
    O: OrderStore,
{
    stores: Stores<C, P, O>,
    limits: OrderLimits,
}

impl<C, P, O> OrderPlacementService<C, P, O>
where
    C: CustomerStore,
    P: ProductStore,
    O: OrderStore,
{
    /// Creates a new placement service with default limits.
    pub fn new(stores: Stores<C, P, O>) -> Self {
        Self {
            stores,
            limits: OrderLimits::default(),
        }
    }

    /// Replaces the request limits.
    pub fn with_limits(mut self, limits: OrderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the stores this service was built with.
    pub fn stores(&self) -> &Stores<C, P, O> {
        &self.stores
    }

    /// Places an order.
    ///
    /// Any failure before the order is written leaves every store
    /// untouched.
    #[tracing::instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id, lines = cmd.lines.len()))]
    pub async fn place_order(&self, cmd: PlaceOrder) -> Result<Order, OrderError> {
        let start = std::time::Instant::now();

        let result = self.execute(cmd).await;

        metrics::histogram!("order_placement_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        match &result {
            Ok(order) => {
                metrics::counter!("orders_placed_total").increment(1);
                tracing::info!(order_id = %order.id, lines = order.lines.len(), "order placed");
            }
            Err(e) => {
                metrics::counter!("orders_rejected_total", "reason" => e.kind()).increment(1);
                tracing::warn!(kind = e.kind(), error = %e, "order rejected");
            }
        }

        result
    }

    async fn execute(&self, cmd: PlaceOrder) -> Result<Order, OrderError> {
        cmd.validate(&self.limits)?;

        // 1. Customer
        let customer = self
            .stores
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(cmd.customer_id.clone()))?;

        // 2. Products, one batch
        let requested_ids = cmd.product_ids();
        let catalog = self.stores.products.find_all_by_id(&requested_ids).await?;
        if catalog.len() < requested_ids.len() {
            return Err(OrderError::ProductsNotFound(missing_ids(
                &requested_ids,
                &catalog,
            )));
        }

        // 3. Stock
        let reconciliation = reconcile(&catalog, &cmd.lines)?;

        // 4. Order, then 5. stock
        let order = self
            .stores
            .orders
            .create(&customer, reconciliation.order_lines)
            .await?;

        if let Err(e) = self
            .stores
            .products
            .update_quantities(&reconciliation.updated_products)
            .await
        {
            return Err(self.compensate(&order, e).await);
        }

        Ok(order)
    }

    /// Deletes an order whose stock update failed and returns the error to
    /// report to the caller.
    async fn compensate(&self, order: &Order, cause: StoreError) -> OrderError {
        metrics::counter!("order_compensations_total").increment(1);
        tracing::warn!(order_id = %order.id, error = %cause, "stock update failed, deleting order");

        match self.stores.orders.delete(order.id).await {
            Ok(()) => cause.into(),
            Err(compensation) => {
                tracing::error!(order_id = %order.id, error = %compensation, "order rollback failed");
                OrderError::CompensationFailed {
                    order_id: order.id,
                    cause: cause.to_string(),
                    compensation: compensation.to_string(),
                }
            }
        }
    }
}

fn missing_ids(requested: &[ProductId], found: &[Product]) -> Vec<ProductId> {
    requested
        .iter()
        .filter(|id| !found.iter().any(|p| &p.id == *id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use common::{Customer, Money};
    use store::{InMemoryCustomerStore, InMemoryOrderStore, InMemoryProductStore};

    use super::*;
    use crate::request::OrderLineRequest;

    type TestService =
        OrderPlacementService<InMemoryCustomerStore, InMemoryProductStore, InMemoryOrderStore>;

    async fn service() -> TestService {
        let customers = InMemoryCustomerStore::new();
        customers
            .insert(Customer::new("C1", "Ada", "ada@example.com"))
            .await;

        let products = InMemoryProductStore::new();
        products
            .insert(Product::new("P1", "Widget", Money::from_cents(500), 10))
            .await;

        OrderPlacementService::new(Stores::new(customers, products, InMemoryOrderStore::new()))
    }

    #[tokio::test]
    async fn test_place_order() {
        let service = service().await;

        let order = service
            .place_order(PlaceOrder::new("C1", vec![OrderLineRequest::new("P1", 3)]))
            .await
            .unwrap();

        assert_eq!(order.customer_id.as_str(), "C1");
        assert_eq!(order.total().map(|t| t.cents()), Some(1500));
        assert_eq!(
            service
                .stores()
                .products
                .quantity_of(&ProductId::new("P1"))
                .await,
            Some(7)
        );
    }

    #[tokio::test]
    async fn test_validation_runs_before_lookups() {
        let service = service().await;

        let err = service
            .place_order(PlaceOrder::new("", vec![OrderLineRequest::new("P1", 3)]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "invalid_request");
    }

    #[tokio::test]
    async fn test_limits_apply() {
        let service = service().await.with_limits(OrderLimits { max_lines: 0 });

        let err = service
            .place_order(PlaceOrder::new("C1", vec![OrderLineRequest::new("P1", 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "invalid_request");
        assert_eq!(service.stores().orders.count().await, 0);
    }

    #[test]
    fn test_missing_ids() {
        let found = vec![Product::new("P1", "Widget", Money::from_cents(500), 1)];
        let requested = vec![ProductId::new("P1"), ProductId::new("P9")];

        assert_eq!(missing_ids(&requested, &found), vec![ProductId::new("P9")]);
    }
}
