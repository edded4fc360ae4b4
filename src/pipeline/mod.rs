//! Single-run orchestration of extraction and ingestion.
//!
//! A run fetches the pull request, writes its snapshot row, fetches and
//! normalises its activity, then writes the activity batch. Steps run strictly
//! in sequence and the first failure ends the run. The two writes are separate
//! commits: a failure after the snapshot write leaves that row in place.

mod entry;
mod error;
mod state;

pub use entry::{IngestionConfig, run_ingestion};
pub use error::RunError;
pub use state::RunState;

use tracing::{error, info};

use crate::activity::collect_activity;
use crate::dedup::{DedupKey, RunTimestamp};
use crate::github::{PullRequestGateway, PullRequestLocator};
use crate::snapshot::extract_pull_request;
use crate::telemetry::{TelemetryEvent, TelemetrySink};
use crate::warehouse::{IngestionWriter, KeyedRow, TableRef, WarehouseClient, WriteOutcome};

use state::StateTracker;

/// Destination tables for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionTables {
    /// Table receiving pull request snapshot rows.
    pub pull_requests: TableRef,
    /// Table receiving activity rows.
    pub activity: TableRef,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Final state; always [`RunState::Done`].
    pub state: RunState,
    /// `inserted_at` shared by every row of the run.
    pub inserted_at: RunTimestamp,
    /// Key the snapshot row was submitted with.
    pub snapshot_key: DedupKey,
    /// Number of activity rows submitted (zero when skipped).
    pub activity_rows: usize,
}

/// Sequences extraction, keying, and ingestion for one pull request.
pub struct IngestionPipeline<'deps, Gateway, Warehouse>
where
    Gateway: PullRequestGateway + ?Sized,
    Warehouse: WarehouseClient + ?Sized,
{
    gateway: &'deps Gateway,
    writer: IngestionWriter<'deps, Warehouse>,
    tables: &'deps IngestionTables,
    telemetry: &'deps dyn TelemetrySink,
}

impl<'deps, Gateway, Warehouse> IngestionPipeline<'deps, Gateway, Warehouse>
where
    Gateway: PullRequestGateway + ?Sized,
    Warehouse: WarehouseClient + ?Sized,
{
    /// Wires a pipeline from its collaborators.
    #[must_use]
    pub const fn new(
        gateway: &'deps Gateway,
        warehouse: &'deps Warehouse,
        tables: &'deps IngestionTables,
        telemetry: &'deps dyn TelemetrySink,
    ) -> Self {
        Self {
            gateway,
            writer: IngestionWriter::new(warehouse),
            tables,
            telemetry,
        }
    }

    /// Runs the pipeline for `locator`, stamping every row with `inserted_at`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::UpstreamFetch`] when a GitHub call fails and
    /// [`RunError::Ingestion`] when a warehouse write fails.
    pub async fn run(
        &self,
        locator: &PullRequestLocator,
        inserted_at: RunTimestamp,
    ) -> Result<RunReport, RunError> {
        let mut tracker = StateTracker::new();
        match self.execute(locator, &inserted_at, &mut tracker).await {
            Ok(report) => Ok(report),
            Err(run_error) => {
                let failed_in = tracker.fail();
                error!(state = %failed_in, error = %run_error, "run failed");
                self.telemetry.record(TelemetryEvent::RunFailed {
                    state: failed_in.label().to_owned(),
                    message: run_error.to_string(),
                });
                Err(run_error)
            }
        }
    }

    async fn execute(
        &self,
        locator: &PullRequestLocator,
        inserted_at: &RunTimestamp,
        tracker: &mut StateTracker,
    ) -> Result<RunReport, RunError> {
        let repository = locator.repository().to_string();

        info!(%repository, pr = locator.number().get(), "fetching pull request info");
        let snapshot = extract_pull_request(self.gateway, locator).await?;
        let pr_number = snapshot.pr_number;
        tracker.advance();

        let snapshot_row = KeyedRow::for_run(snapshot, inserted_at);
        let snapshot_key = snapshot_row.dedup_key.clone();
        info!(pr = pr_number, "inserting pull request info");
        self.writer
            .write(&self.tables.pull_requests, vec![snapshot_row])
            .await?;
        self.telemetry.record(TelemetryEvent::SnapshotWritten {
            repository: repository.clone(),
            pr_number,
        });
        info!("pull request info inserted");
        tracker.advance();

        info!("fetching pull request comments and reviews");
        let activity = collect_activity(self.gateway, locator).await?;
        tracker.advance();

        let activity_rows: Vec<_> = activity
            .into_iter()
            .map(|record| KeyedRow::for_run(record, inserted_at))
            .collect();
        if !activity_rows.is_empty() {
            info!(rows = activity_rows.len(), "inserting comments and reviews");
        }
        let outcome = self
            .writer
            .write(&self.tables.activity, activity_rows)
            .await?;
        let written = self.record_activity_outcome(outcome, repository, locator.number().get());
        tracker.advance();

        Ok(RunReport {
            state: tracker.advance(),
            inserted_at: inserted_at.clone(),
            snapshot_key,
            activity_rows: written,
        })
    }

    fn record_activity_outcome(
        &self,
        outcome: WriteOutcome,
        repository: String,
        pr_number: u64,
    ) -> usize {
        match outcome {
            WriteOutcome::Skipped => {
                info!("no comments to insert");
                self.telemetry.record(TelemetryEvent::ActivitySkipped {
                    repository,
                    pr_number,
                });
                0
            }
            WriteOutcome::Inserted { rows } => {
                info!(rows, "comments and reviews inserted");
                self.telemetry.record(TelemetryEvent::ActivityWritten {
                    repository,
                    pr_number,
                    rows,
                });
                rows
            }
        }
    }
}
