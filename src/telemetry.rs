//! Run telemetry events and sinks.
//!
//! Alongside `tracing` logs, each write step of a run emits one structured
//! [`TelemetryEvent`] so that workflow logs can be scraped for what a run
//! actually committed to the warehouse.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The pull request snapshot row was accepted.
    SnapshotWritten {
        /// `owner/name` of the repository.
        repository: String,
        /// Pull request number.
        pr_number: u64,
    },
    /// The activity batch was accepted.
    ActivityWritten {
        /// `owner/name` of the repository.
        repository: String,
        /// Pull request number.
        pr_number: u64,
        /// Number of activity rows submitted.
        rows: usize,
    },
    /// The pull request had no activity, so no batch was sent.
    ActivitySkipped {
        /// `owner/name` of the repository.
        repository: String,
        /// Pull request number.
        pr_number: u64,
    },
    /// The run stopped on an error.
    RunFailed {
        /// Last state the run reached before failing.
        state: String,
        /// Display form of the error.
        message: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
