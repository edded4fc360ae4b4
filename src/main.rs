//! Tally CLI entrypoint: ingest one pull request's activity into BigQuery.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use tally::{RunError, StderrJsonlTelemetrySink, TallyConfig, run_ingestion};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILTER_ENV: &str = "TALLY_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), RunError> {
    let config = load_config()?.into_ingestion_config()?;
    let report = run_ingestion(&config, &StderrJsonlTelemetrySink).await?;

    info!(
        snapshot_key = %report.snapshot_key,
        activity_rows = report.activity_rows,
        "ingestion complete"
    );
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RunError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TallyConfig, RunError> {
    TallyConfig::load().map_err(|error| RunError::Configuration {
        message: error.to_string(),
    })
}
