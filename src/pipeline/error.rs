//! Run-level error taxonomy.

use thiserror::Error;

use crate::github::IntakeError;
use crate::warehouse::WarehouseError;

/// Reasons a run terminates unsuccessfully.
///
/// Every variant is fatal; nothing is retried inside the pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// Neither an explicit number nor the trigger event names a pull request.
    #[error(
        "no pull_request number found: trigger the run from a pull_request event or provide --pr-number"
    )]
    MissingSubject,

    /// A hosting API call failed.
    #[error(transparent)]
    UpstreamFetch(#[from] IntakeError),

    /// A warehouse write failed.
    #[error(transparent)]
    Ingestion(#[from] WarehouseError),

    /// Required configuration is missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
