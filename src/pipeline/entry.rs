//! Entry point wiring real collaborators from explicit configuration.

use camino::Utf8PathBuf;

use crate::dedup::RunTimestamp;
use crate::github::{
    OctocrabGateway, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositorySlug,
    TriggerEvent, resolve_pull_request_number,
};
use crate::telemetry::TelemetrySink;
use crate::warehouse::{BigQueryClient, BigQueryConfig, TableRef};

use super::{IngestionPipeline, IngestionTables, RunError, RunReport};

/// Everything a run needs, resolved once before the pipeline is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    /// Cloud project owning the dataset.
    pub project_id: String,
    /// Dataset containing both tables.
    pub dataset_id: String,
    /// Table receiving pull request snapshots.
    pub pr_table_id: String,
    /// Table receiving activity rows.
    pub activity_table_id: String,
    /// Warehouse bearer credential.
    pub warehouse_token: String,
    /// Warehouse REST API base URL.
    pub warehouse_api_url: String,
    /// GitHub credential; `None` when no source supplied one.
    pub github_token: Option<String>,
    /// GitHub REST API base URL.
    pub github_api_url: String,
    /// `owner/name` of the repository.
    pub repository: String,
    /// Explicit pull request number, overriding the trigger event.
    pub pr_number: Option<u64>,
    /// Path of the trigger event payload, if the run was event-triggered.
    pub event_path: Option<Utf8PathBuf>,
}

impl IngestionConfig {
    fn tables(&self) -> IngestionTables {
        IngestionTables {
            pull_requests: TableRef::new(&self.project_id, &self.dataset_id, &self.pr_table_id),
            activity: TableRef::new(&self.project_id, &self.dataset_id, &self.activity_table_id),
        }
    }

    /// Resolves the target pull request without touching the network.
    ///
    /// The event payload is only read when no explicit number is set.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::MissingSubject`] when no source names a pull
    /// request, or [`RunError::UpstreamFetch`] when the event payload file is
    /// unreadable.
    pub fn resolve_subject(&self) -> Result<PullRequestNumber, RunError> {
        if let Some(number) = resolve_pull_request_number(self.pr_number, None) {
            return Ok(number);
        }

        let event = self
            .event_path
            .as_deref()
            .map(TriggerEvent::read)
            .transpose()?;

        resolve_pull_request_number(None, event.as_ref()).ok_or(RunError::MissingSubject)
    }
}

/// Runs one ingestion against GitHub and BigQuery.
///
/// The pull request number, repository, and credentials are validated before
/// any client is built, so configuration mistakes never cost a request.
///
/// # Errors
///
/// Returns [`RunError::MissingSubject`] when no pull request can be resolved,
/// [`RunError::UpstreamFetch`] for GitHub or credential failures, and
/// [`RunError::Ingestion`] for warehouse failures.
pub async fn run_ingestion(
    config: &IngestionConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<RunReport, RunError> {
    let number = config.resolve_subject()?;
    let token = PersonalAccessToken::new(config.github_token.as_deref().unwrap_or_default())?;
    let repository = RepositorySlug::parse(&config.repository)?;
    let locator = PullRequestLocator::new(&config.github_api_url, repository, number)?;

    let gateway = OctocrabGateway::for_token(&token, &locator)?;
    let warehouse = BigQueryClient::new(
        BigQueryConfig::new(config.warehouse_token.as_str())
            .with_base_url(config.warehouse_api_url.as_str()),
    )?;
    let tables = config.tables();

    let pipeline = IngestionPipeline::new(&gateway, &warehouse, &tables, telemetry);
    pipeline.run(&locator, RunTimestamp::now()).await
}
