//! Tally library crate for pull request activity ingestion.
//!
//! A run fetches one pull request snapshot and its three activity collections
//! from GitHub through Octocrab, normalises them into two row shapes, keys
//! every row for warehouse-side deduplication, and streams the rows into two
//! BigQuery tables. The first failure ends the run.

pub mod activity;
pub mod config;
pub mod dedup;
pub mod github;
pub mod pipeline;
pub mod snapshot;
pub mod telemetry;
pub mod warehouse;

pub use activity::{ActivityRecord, CommentType, collect_activity};
pub use config::TallyConfig;
pub use dedup::{DedupKey, RunTimestamp};
pub use github::{IntakeError, OctocrabGateway, PullRequestGateway, PullRequestLocator};
pub use pipeline::{
    IngestionConfig, IngestionPipeline, IngestionTables, RunError, RunReport, RunState,
    run_ingestion,
};
pub use snapshot::{PullRequestSnapshot, extract_pull_request};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
pub use warehouse::{BigQueryClient, BigQueryConfig, WarehouseClient, WarehouseError};
