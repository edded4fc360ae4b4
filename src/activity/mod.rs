//! Normalisation of pull request activity into a single row shape.
//!
//! GitHub reports discussion on a pull request through three collections with
//! different record shapes: issue comments, inline review comments, and
//! reviews. [`collect_activity`] fetches all three and maps them into
//! [`ActivityRecord`]s through [`UpstreamActivity`], which has one mapping
//! function per source kind.

mod model;

pub use model::{ActivityRecord, CommentType, PullRequestSubject, UpstreamActivity};

use crate::github::{IntakeError, PullRequestGateway, PullRequestLocator};

/// Fetches every activity record for the pull request.
///
/// Records are ordered issue comments first, then review comments, then
/// reviews; each group keeps the API's order. The three fetches run one after
/// another and any failure aborts the whole collection.
///
/// # Errors
///
/// Propagates the first [`IntakeError`] reported by the gateway.
pub async fn collect_activity<G>(
    gateway: &G,
    locator: &PullRequestLocator,
) -> Result<Vec<ActivityRecord>, IntakeError>
where
    G: PullRequestGateway + ?Sized,
{
    let subject = PullRequestSubject::from_locator(locator);

    let issue_comments = gateway.issue_comments(locator).await?;
    tracing::debug!(count = issue_comments.len(), "fetched issue comments");
    let review_comments = gateway.review_comments(locator).await?;
    tracing::debug!(count = review_comments.len(), "fetched review comments");
    let reviews = gateway.reviews(locator).await?;
    tracing::debug!(count = reviews.len(), "fetched reviews");

    let upstream = issue_comments
        .into_iter()
        .map(UpstreamActivity::IssueComment)
        .chain(review_comments.into_iter().map(UpstreamActivity::ReviewComment))
        .chain(reviews.into_iter().map(UpstreamActivity::Review));

    Ok(upstream
        .map(|activity| activity.normalise(&subject))
        .collect())
}
