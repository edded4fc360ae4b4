//! Gateways for loading pull request records through Octocrab.
//!
//! The trait is the hosting-API seam of the pipeline: it yields a single pull
//! request or the fully paginated contents of one of its activity collections.
//! The Octocrab implementation handles the real HTTP requests, and the trait
//! lets tests substitute a mock.

mod client;
mod error_mapping;
mod pages;
mod pull_request;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{ApiIssueComment, ApiPullRequest, ApiReview, ApiReviewComment};

/// Gateway that can load pull request data.
///
/// Each collection method exhausts every page before returning and preserves
/// the API's native (creation) order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch the pull request resource.
    async fn pull_request(&self, locator: &PullRequestLocator)
    -> Result<ApiPullRequest, IntakeError>;

    /// Fetch all issue-level comments on the pull request.
    async fn issue_comments(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ApiIssueComment>, IntakeError>;

    /// Fetch all inline review comments on the pull request diff.
    async fn review_comments(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ApiReviewComment>, IntakeError>;

    /// Fetch all reviews (approvals, change requests, comment reviews).
    async fn reviews(&self, locator: &PullRequestLocator) -> Result<Vec<ApiReview>, IntakeError>;
}
