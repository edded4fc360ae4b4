//! Raw record shapes returned by the GitHub REST API.
//!
//! Only the fields the ingestion pipeline reads are modelled; serde ignores
//! the rest. Every field other than the numeric identifier is optional so that
//! a `null` or missing value upstream stays absent downstream.

use serde::Deserialize;

/// Account reference embedded in most GitHub resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiUser {
    /// Account login.
    pub login: Option<String>,
}

/// Head (source) branch reference of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiBranchRef {
    /// Branch name, e.g. `feature/widgets`.
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    /// Commit SHA the branch points at.
    pub sha: Option<String>,
}

/// `GET /repos/{owner}/{repo}/pulls/{number}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Creator of the pull request.
    pub user: Option<ApiUser>,
    /// Source branch.
    pub head: Option<ApiBranchRef>,
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
    /// Number of commits on the pull request.
    pub commits: Option<u64>,
}

/// `GET /repos/{owner}/{repo}/issues/{number}/comments` item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiIssueComment {
    /// Issue comment identifier.
    pub id: u64,
    /// Comment author.
    pub user: Option<ApiUser>,
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
}

/// `GET /repos/{owner}/{repo}/pulls/{number}/comments` item.
///
/// Review comments are attached to specific lines in a pull request diff,
/// whereas issue comments are general discussion on the PR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiReviewComment {
    /// Review comment identifier.
    pub id: u64,
    /// Comment author.
    pub user: Option<ApiUser>,
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
}

/// `GET /repos/{owner}/{repo}/pulls/{number}/reviews` item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiReview {
    /// Review identifier.
    pub id: u64,
    /// Reviewer.
    pub user: Option<ApiUser>,
    /// Submission timestamp; absent for pending reviews.
    pub submitted_at: Option<String>,
}

/// Extracts a non-empty login from an optional user reference.
pub(crate) fn login_of(user: Option<ApiUser>) -> Option<String> {
    non_empty(user.and_then(|account| account.login))
}

/// Treats an empty upstream string as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
