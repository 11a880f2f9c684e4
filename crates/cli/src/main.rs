//! `place-order` entry point.

use std::process::ExitCode;

use cli::{Config, Seed};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    // 1. Initialize tracing; stdout carries results, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "metrics recorder not installed");
            None
        }
    };

    // 3. Seed the stores
    let seed = match &config.seed_path {
        Some(path) => match Seed::load(path).await {
            Ok(seed) => seed,
            Err(e) => {
                tracing::error!(error = %e, "failed to load seed");
                return ExitCode::FAILURE;
            }
        },
        None => Seed::default(),
    };
    let service = cli::build_service(seed, &config).await;

    // 4. Process requests
    let stdin = BufReader::new(tokio::io::stdin());
    let result = cli::run(&service, stdin, tokio::io::stdout()).await;

    if config.dump_metrics
        && let Some(handle) = metrics_handle
    {
        eprintln!("{}", handle.render());
    }

    match result {
        Ok(summary) => {
            tracing::info!(
                placed = summary.placed,
                rejected = summary.rejected,
                "input exhausted"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            ExitCode::FAILURE
        }
    }
}
