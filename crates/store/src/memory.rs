use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use common::{Customer, CustomerId, Order, OrderId, OrderLine, Product, ProductId};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{CustomerStore, OrderStore, ProductStore},
};

/// In-memory customer store for testing and local runs.
#[derive(Clone, Default)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerStore {
    /// Creates a new empty customer store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a customer.
    pub async fn insert(&self, customer: Customer) {
        self.customers
            .write()
            .await
            .insert(customer.id.clone(), customer);
    }

    /// Returns the number of customers stored.
    pub async fn count(&self) -> usize {
        self.customers.read().await.len()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(id).cloned())
    }
}

/// In-memory product catalog.
///
/// Quantity updates are checked against each product's version under a
/// single write lock, so a batch is applied entirely or not at all.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    fail_on_update: Arc<AtomicBool>,
}

impl InMemoryProductStore {
    /// Creates a new empty product store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product as given, version included.
    pub async fn insert(&self, product: Product) {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product);
    }

    /// Returns the stored product, if any.
    pub async fn get(&self, id: &ProductId) -> Option<Product> {
        self.products.read().await.get(id).cloned()
    }

    /// Returns the current stock of a product, if it exists.
    pub async fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.products.read().await.get(id).map(|p| p.quantity)
    }

    /// Returns the number of products in the catalog.
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Makes every subsequent `update_quantities` call fail until reset.
    pub fn set_fail_on_update(&self, fail: bool) {
        self.fail_on_update.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut found: Vec<Product> = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(product) = products.get(id)
                && !found.iter().any(|p| &p.id == id)
            {
                found.push(product.clone());
            }
        }
        Ok(found)
    }

    async fn update_quantities(&self, updates: &[Product]) -> Result<()> {
        if self.fail_on_update.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "product store rejected the update".to_string(),
            ));
        }

        let mut products = self.products.write().await;

        // Check every version first so a conflict leaves the catalog untouched
        for update in updates {
            let stored = products
                .get(&update.id)
                .ok_or_else(|| StoreError::product_not_found(&update.id))?;
            if stored.version != update.version {
                return Err(StoreError::StockConflict {
                    product_id: update.id.clone(),
                    expected: update.version,
                    actual: stored.version,
                });
            }
        }

        for update in updates {
            if let Some(stored) = products.get_mut(&update.id) {
                stored.quantity = update.quantity;
                stored.version += 1;
            }
        }

        tracing::debug!(count = updates.len(), "stock levels updated");
        Ok(())
    }
}

/// In-memory order store.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    fail_on_create: Arc<AtomicBool>,
    fail_on_delete: Arc<AtomicBool>,
}

impl InMemoryOrderStore {
    /// Creates a new empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns all stored orders, oldest first.
    pub async fn all(&self) -> Vec<Order> {
        let mut orders: Vec<_> = self.orders.read().await.values().cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        orders
    }

    /// Makes every subsequent `create` call fail until reset.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.fail_on_create.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `delete` call fail until reset.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.fail_on_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, customer: &Customer, lines: Vec<OrderLine>) -> Result<Order> {
        if self.fail_on_create.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "order store rejected the insert".to_string(),
            ));
        }

        let order = Order {
            id: OrderId::new(),
            customer_id: customer.id.clone(),
            lines,
            created_at: Utc::now(),
        };
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: OrderId) -> Result<()> {
        if self.fail_on_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "order store rejected the delete".to_string(),
            ));
        }

        self.orders
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::order_not_found(id))
    }
}
