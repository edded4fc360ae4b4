//! GitHub access for a single pull request.
//!
//! This module wraps Octocrab to resolve which pull request a run targets,
//! fetch its metadata and its three activity collections, and map transport
//! failures into [`IntakeError`] variants so callers never see Octocrab
//! internals.

pub mod error;
pub mod event;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::IntakeError;
pub use event::{TriggerEvent, resolve_pull_request_number};
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner, RepositorySlug,
};
pub use models::{ApiBranchRef, ApiIssueComment, ApiPullRequest, ApiReview, ApiReviewComment, ApiUser};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
