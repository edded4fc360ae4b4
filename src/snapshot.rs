//! Pull request snapshot extraction.

use serde::Serialize;

use crate::dedup::{Deduplicated, RowKind};
use crate::github::models::{ApiPullRequest, login_of, non_empty};
use crate::github::{IntakeError, PullRequestGateway, PullRequestLocator};

/// Point-in-time metadata of one pull request.
///
/// Fields the API omitted or returned as `null` stay `None` and serialise as
/// `null`; they are never replaced with empty strings or zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSnapshot {
    /// `owner/name` of the repository.
    pub repository: String,
    /// Pull request number as reported by the API.
    pub pr_number: u64,
    /// Source branch name.
    pub branch_name: Option<String>,
    /// Login of the pull request creator.
    pub author: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
    /// SHA of the head commit.
    pub latest_commit: Option<String>,
    /// Number of commits on the pull request.
    pub commit_count: Option<u64>,
}

impl PullRequestSnapshot {
    /// Maps the raw API resource for `repository`.
    #[must_use]
    pub fn from_api(repository: String, pull_request: ApiPullRequest) -> Self {
        let head = pull_request.head.unwrap_or_default();
        Self {
            repository,
            pr_number: pull_request.number,
            branch_name: non_empty(head.ref_name),
            author: login_of(pull_request.user),
            created_at: non_empty(pull_request.created_at),
            latest_commit: non_empty(head.sha),
            commit_count: pull_request.commits,
        }
    }
}

impl Deduplicated for PullRequestSnapshot {
    const KIND: RowKind = RowKind::PullRequest;

    fn repository(&self) -> &str {
        &self.repository
    }

    fn identifier(&self) -> u64 {
        self.pr_number
    }
}

/// Fetches the pull request and maps it into a snapshot.
///
/// # Errors
///
/// Propagates the gateway's [`IntakeError`] unchanged.
pub async fn extract_pull_request<G>(
    gateway: &G,
    locator: &PullRequestLocator,
) -> Result<PullRequestSnapshot, IntakeError>
where
    G: PullRequestGateway + ?Sized,
{
    let pull_request = gateway.pull_request(locator).await?;
    Ok(PullRequestSnapshot::from_api(
        locator.repository().to_string(),
        pull_request,
    ))
}
