pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::{InMemoryCustomerStore, InMemoryOrderStore, InMemoryProductStore};
pub use store::{CustomerStore, OrderStore, ProductStore};
