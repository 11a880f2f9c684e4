//! Shared types for the storefront workspace.
//!
//! Identifiers, money, and the records owned by the customer, product,
//! and order stores.

pub mod money;
pub mod records;
pub mod types;

pub use money::Money;
pub use records::{Customer, Order, OrderLine, Product};
pub use types::{CustomerId, OrderId, ProductId};
