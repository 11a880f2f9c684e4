//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use domain::DEFAULT_MAX_LINES;

/// Runtime configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `CATALOG_SEED`: JSON file with customers and products (default: none)
/// - `MAX_ORDER_LINES`: lines allowed per order (default: `100`)
/// - `METRICS_DUMP`: print Prometheus metrics to stderr on exit (default: off)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub seed_path: Option<PathBuf>,
    pub max_order_lines: usize,
    pub dump_metrics: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            seed_path: lookup("CATALOG_SEED")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            max_order_lines: lookup("MAX_ORDER_LINES")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.max_order_lines),
            dump_metrics: lookup("METRICS_DUMP")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.dump_metrics),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed_path: None,
            max_order_lines: DEFAULT_MAX_LINES,
            dump_metrics: false,
        }
    }
}
