//! Run timestamps and deterministic insertion keys.
//!
//! Every row a run emits carries the same [`RunTimestamp`], and every row is
//! submitted with a [`DedupKey`] the warehouse uses as its idempotency token.
//! Keys are `{repository}_{tag}_{id}_{inserted_at}`: resubmitting a row within
//! a run is absorbed by the warehouse, while a later run produces new keys and
//! therefore new rows.
//!
//! Comment keys do not include the comment type, so an issue comment and a
//! review that share a numeric id within one run share a key.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

const SEPARATOR: char = '_';

/// The `inserted_at` value shared by every row of one run.
///
/// Rendered as UTC ISO 8601 with millisecond precision, e.g.
/// `2025-01-01T12:00:00.000Z`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RunTimestamp(String);

impl RunTimestamp {
    /// Captures the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Formats a fixed instant.
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Borrow the formatted timestamp.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RunTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key namespace of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Pull request snapshot row.
    PullRequest,
    /// Activity row of any comment type.
    Comment,
}

impl RowKind {
    /// Literal tag embedded in the key.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PullRequest => "pr",
            Self::Comment => "comment",
        }
    }
}

/// Idempotency token submitted alongside a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DedupKey(String);

impl DedupKey {
    /// Borrow the key.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Records that can derive their own dedup key.
pub trait Deduplicated {
    /// Key namespace for this record type.
    const KIND: RowKind;

    /// `owner/name` of the repository the record belongs to.
    fn repository(&self) -> &str;

    /// Identifier unique within the record's namespace.
    fn identifier(&self) -> u64;
}

/// Builds the key for a row from its identifying fields.
#[must_use]
pub fn build_key(kind: RowKind, repository: &str, identifier: u64, run: &RunTimestamp) -> DedupKey {
    DedupKey(format!(
        "{repository}{SEPARATOR}{tag}{SEPARATOR}{identifier}{SEPARATOR}{run}",
        tag = kind.tag()
    ))
}

/// Builds the key for any [`Deduplicated`] record.
#[must_use]
pub fn key_for<R: Deduplicated>(record: &R, run: &RunTimestamp) -> DedupKey {
    build_key(R::KIND, record.repository(), record.identifier(), run)
}
