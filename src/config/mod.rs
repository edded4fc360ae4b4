//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.tally.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TALLY_*`, with the workflow variables
//!    `GITHUB_TOKEN`, `GITHUB_REPOSITORY`, `GITHUB_EVENT_PATH`, and
//!    `GITHUB_API_URL` used as fallbacks
//! 4. **Command-line arguments**
//!
//! # Configuration File
//!
//! ```toml
//! project_id = "analytics-prod"
//! dataset_id = "engineering"
//! table_id = "pull_requests"
//! comments_table_id = "pull_request_comments"
//! repository = "acme/widgets"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::DEFAULT_API_BASE;
use crate::pipeline::{IngestionConfig, RunError};
use crate::warehouse::DEFAULT_WAREHOUSE_API_URL;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use tally::TallyConfig;
///
/// let config = TallyConfig::load().expect("failed to load configuration");
/// let ingestion = config.into_ingestion_config().expect("incomplete configuration");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TALLY",
    discovery(
        dotfile_name = ".tally.toml",
        config_file_name = "tally.toml",
        app_name = "tally"
    )
)]
pub struct TallyConfig {
    /// Cloud project that owns the dataset.
    ///
    /// - CLI: `--project-id <ID>` or `-p <ID>`
    /// - Environment: `TALLY_PROJECT_ID`
    #[ortho_config(cli_short = 'p')]
    pub project_id: Option<String>,

    /// Dataset containing both destination tables.
    ///
    /// - CLI: `--dataset-id <ID>` or `-d <ID>`
    /// - Environment: `TALLY_DATASET_ID`
    #[ortho_config(cli_short = 'd')]
    pub dataset_id: Option<String>,

    /// Table receiving pull request snapshot rows.
    ///
    /// - CLI: `--table-id <ID>` or `-T <ID>`
    /// - Environment: `TALLY_TABLE_ID`
    #[ortho_config(cli_short = 'T')]
    pub table_id: Option<String>,

    /// Table receiving comment, review comment, and review rows.
    ///
    /// - CLI: `--comments-table-id <ID>`
    /// - Environment: `TALLY_COMMENTS_TABLE_ID`
    #[ortho_config()]
    pub comments_table_id: Option<String>,

    /// Warehouse OAuth access token.
    ///
    /// - CLI: `--access-token <TOKEN>`
    /// - Environment: `TALLY_ACCESS_TOKEN`
    #[ortho_config()]
    pub access_token: Option<String>,

    /// GitHub token used to read the pull request.
    ///
    /// - CLI: `--github-token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `TALLY_GITHUB_TOKEN` or `GITHUB_TOKEN`
    #[ortho_config(cli_short = 't')]
    pub github_token: Option<String>,

    /// Repository as `owner/name`.
    ///
    /// - CLI: `--repository <OWNER/NAME>` or `-r <OWNER/NAME>`
    /// - Environment: `TALLY_REPOSITORY` or `GITHUB_REPOSITORY`
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Explicit pull request number; overrides the trigger event.
    ///
    /// - CLI: `--pr-number <N>` or `-n <N>`
    /// - Environment: `TALLY_PR_NUMBER`
    #[ortho_config(cli_short = 'n')]
    pub pr_number: Option<u64>,

    /// Path of the trigger event payload.
    ///
    /// - CLI: `--event-path <PATH>`
    /// - Environment: `TALLY_EVENT_PATH` or `GITHUB_EVENT_PATH`
    #[ortho_config()]
    pub event_path: Option<String>,

    /// GitHub REST API base URL.
    ///
    /// - CLI: `--github-api-url <URL>`
    /// - Environment: `TALLY_GITHUB_API_URL` or `GITHUB_API_URL`
    #[ortho_config()]
    pub github_api_url: Option<String>,

    /// Warehouse REST API base URL.
    ///
    /// - CLI: `--warehouse-api-url <URL>`
    /// - Environment: `TALLY_WAREHOUSE_API_URL`
    #[ortho_config()]
    pub warehouse_api_url: Option<String>,
}

fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn from_env(name: &str) -> Option<String> {
    present(env::var(name).ok().as_ref())
}

fn require(value: Option<&String>, flag: &str) -> Result<String, RunError> {
    present(value).ok_or_else(|| RunError::Configuration {
        message: format!("{flag} is required"),
    })
}

impl TallyConfig {
    /// GitHub token from configuration or the `GITHUB_TOKEN` variable.
    #[must_use]
    pub fn resolve_github_token(&self) -> Option<String> {
        present(self.github_token.as_ref()).or_else(|| from_env("GITHUB_TOKEN"))
    }

    /// Repository slug from configuration or `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] when neither source is set.
    pub fn resolve_repository(&self) -> Result<String, RunError> {
        present(self.repository.as_ref())
            .or_else(|| from_env("GITHUB_REPOSITORY"))
            .ok_or_else(|| RunError::Configuration {
                message: "repository is required (use --repository or GITHUB_REPOSITORY)"
                    .to_owned(),
            })
    }

    /// Event payload path from configuration or `GITHUB_EVENT_PATH`.
    #[must_use]
    pub fn resolve_event_path(&self) -> Option<Utf8PathBuf> {
        present(self.event_path.as_ref())
            .or_else(|| from_env("GITHUB_EVENT_PATH"))
            .map(Utf8PathBuf::from)
    }

    /// GitHub API base from configuration, `GITHUB_API_URL`, or the public
    /// endpoint.
    #[must_use]
    pub fn resolve_github_api_url(&self) -> String {
        present(self.github_api_url.as_ref())
            .or_else(|| from_env("GITHUB_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
    }

    /// Validates the configuration into the explicit struct a run consumes.
    ///
    /// A missing GitHub token is not rejected here; the run reports it as a
    /// fetch precondition once the pull request has been resolved.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] naming the first missing required
    /// value.
    pub fn into_ingestion_config(self) -> Result<IngestionConfig, RunError> {
        Ok(IngestionConfig {
            project_id: require(self.project_id.as_ref(), "--project-id")?,
            dataset_id: require(self.dataset_id.as_ref(), "--dataset-id")?,
            pr_table_id: require(self.table_id.as_ref(), "--table-id")?,
            activity_table_id: require(self.comments_table_id.as_ref(), "--comments-table-id")?,
            warehouse_token: require(self.access_token.as_ref(), "--access-token")?,
            warehouse_api_url: present(self.warehouse_api_url.as_ref())
                .unwrap_or_else(|| DEFAULT_WAREHOUSE_API_URL.to_owned()),
            github_token: self.resolve_github_token(),
            github_api_url: self.resolve_github_api_url(),
            repository: self.resolve_repository()?,
            pr_number: self.pr_number,
            event_path: self.resolve_event_path(),
        })
    }
}

#[cfg(test)]
mod tests;
