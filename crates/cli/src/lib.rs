//! Command-line order placement against an in-memory catalog.
//!
//! Reads one order request per input line as JSON and writes one JSON
//! result per output line.

pub mod config;
pub mod error;

use std::path::Path;

use common::{Customer, Order, Product};
use domain::{OrderError, OrderLimits, OrderPlacementService, PlaceOrder, Stores};
use serde::{Deserialize, Serialize};
use store::{InMemoryCustomerStore, InMemoryOrderStore, InMemoryProductStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub use config::Config;
pub use error::CliError;

/// Placement service wired to the in-memory stores.
pub type InMemoryPlacementService =
    OrderPlacementService<InMemoryCustomerStore, InMemoryProductStore, InMemoryOrderStore>;

/// Initial contents of the customer and product stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Seed {
    /// Reads a seed from a JSON file.
    pub async fn load(path: &Path) -> Result<Self, CliError> {
        let raw = tokio::fs::read(path).await.map_err(|source| CliError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: Seed = serde_json::from_slice(&raw).map_err(|source| CliError::SeedFormat {
            path: path.to_path_buf(),
            source,
        })?;
        seed.validate()?;
        Ok(seed)
    }

    /// Rejects products with a negative unit price.
    pub fn validate(&self) -> Result<(), CliError> {
        match self.products.iter().find(|p| p.price.cents() < 0) {
            Some(product) => Err(CliError::InvalidSeed(format!(
                "product {} has negative price {}",
                product.id, product.price
            ))),
            None => Ok(()),
        }
    }
}

/// Builds a placement service over fresh stores filled from `seed`.
pub async fn build_service(seed: Seed, config: &Config) -> InMemoryPlacementService {
    let customers = InMemoryCustomerStore::new();
    for customer in seed.customers {
        customers.insert(customer).await;
    }

    let products = InMemoryProductStore::new();
    for product in seed.products {
        products.insert(product).await;
    }

    tracing::info!(
        customers = customers.count().await,
        products = products.count().await,
        "stores seeded"
    );

    OrderPlacementService::new(Stores::new(customers, products, InMemoryOrderStore::new()))
        .with_limits(OrderLimits {
            max_lines: config.max_order_lines,
        })
}

/// One line of output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Order(Order),
    Error(ErrorBody),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl From<OrderError> for ErrorBody {
    fn from(err: OrderError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

/// Parses and places a single request line.
pub async fn handle_line(service: &InMemoryPlacementService, line: &str) -> Outcome {
    let cmd: PlaceOrder = match serde_json::from_str(line) {
        Ok(cmd) => cmd,
        Err(e) => {
            tracing::warn!(error = %e, "malformed request");
            return Outcome::Error(ErrorBody {
                kind: "malformed_request",
                message: e.to_string(),
                retryable: false,
            });
        }
    };

    match service.place_order(cmd).await {
        Ok(order) => Outcome::Order(order),
        Err(e) => Outcome::Error(e.into()),
    }
}

/// Counts of processed requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub placed: usize,
    pub rejected: usize,
}

/// Processes every non-blank input line until end of input.
pub async fn run<R, W>(
    service: &InMemoryPlacementService,
    reader: R,
    mut writer: W,
) -> Result<Summary, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = Summary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let outcome = handle_line(service, &line).await;
        match outcome {
            Outcome::Order(_) => summary.placed += 1,
            Outcome::Error(_) => summary.rejected += 1,
        }

        let mut encoded = serde_json::to_vec(&outcome)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
    }

    writer.flush().await?;
    Ok(summary)
}
