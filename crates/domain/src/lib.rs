//! Domain layer for the storefront.
//!
//! This crate provides:
//! - Order placement requests and their validation
//! - Stock reconciliation of requested lines against the catalog
//! - The order placement workflow over injected stores

pub mod error;
pub mod reconcile;
pub mod request;
pub mod service;

pub use error::{OrderError, RequestError};
pub use reconcile::{Reconciliation, reconcile};
pub use request::{DEFAULT_MAX_LINES, OrderLimits, OrderLineRequest, PlaceOrder};
pub use service::{OrderPlacementService, Stores};
