//! Activity row shape and per-kind mappings.

use serde::Serialize;

use crate::dedup::{Deduplicated, RowKind};
use crate::github::PullRequestLocator;
use crate::github::models::{
    ApiIssueComment, ApiReview, ApiReviewComment, login_of, non_empty,
};

/// Kind of activity a row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentType {
    /// General discussion comment on the pull request.
    IssueComment,
    /// Inline comment on the diff.
    ReviewComment,
    /// Submitted (or pending) review.
    Review,
}

/// Repository and pull request every activity row is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSubject {
    /// `owner/name`.
    pub repository: String,
    /// Pull request number.
    pub pr_number: u64,
}

impl PullRequestSubject {
    /// Subject named by a locator.
    #[must_use]
    pub fn from_locator(locator: &PullRequestLocator) -> Self {
        Self {
            repository: locator.repository().to_string(),
            pr_number: locator.number().get(),
        }
    }
}

/// One normalised comment, review comment, or review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    /// `owner/name` of the repository.
    pub repository: String,
    /// Pull request number.
    pub pr_number: u64,
    /// Upstream identifier, unique only within `comment_type`.
    pub comment_id: u64,
    /// Source collection of the record.
    pub comment_type: CommentType,
    /// Author login.
    pub comment_author: Option<String>,
    /// Creation time for comments, submission time for reviews.
    pub comment_time: Option<String>,
}

impl Deduplicated for ActivityRecord {
    const KIND: RowKind = RowKind::Comment;

    fn repository(&self) -> &str {
        &self.repository
    }

    fn identifier(&self) -> u64 {
        self.comment_id
    }
}

/// A raw activity record tagged with its source collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamActivity {
    /// Item from the issue comments collection.
    IssueComment(ApiIssueComment),
    /// Item from the review comments collection.
    ReviewComment(ApiReviewComment),
    /// Item from the reviews collection.
    Review(ApiReview),
}

impl UpstreamActivity {
    /// Maps the raw record into the unified row shape.
    #[must_use]
    pub fn normalise(self, subject: &PullRequestSubject) -> ActivityRecord {
        match self {
            Self::IssueComment(comment) => from_issue_comment(subject, comment),
            Self::ReviewComment(comment) => from_review_comment(subject, comment),
            Self::Review(review) => from_review(subject, review),
        }
    }
}

fn record(
    subject: &PullRequestSubject,
    comment_type: CommentType,
    comment_id: u64,
    comment_author: Option<String>,
    comment_time: Option<String>,
) -> ActivityRecord {
    ActivityRecord {
        repository: subject.repository.clone(),
        pr_number: subject.pr_number,
        comment_id,
        comment_type,
        comment_author,
        comment_time,
    }
}

fn from_issue_comment(subject: &PullRequestSubject, comment: ApiIssueComment) -> ActivityRecord {
    record(
        subject,
        CommentType::IssueComment,
        comment.id,
        login_of(comment.user),
        comment.created_at,
    )
}

fn from_review_comment(subject: &PullRequestSubject, comment: ApiReviewComment) -> ActivityRecord {
    record(
        subject,
        CommentType::ReviewComment,
        comment.id,
        login_of(comment.user),
        comment.created_at,
    )
}

fn from_review(subject: &PullRequestSubject, review: ApiReview) -> ActivityRecord {
    record(
        subject,
        CommentType::Review,
        review.id,
        login_of(review.user),
        non_empty(review.submitted_at),
    )
}
