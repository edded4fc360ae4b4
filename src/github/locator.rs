//! Identity wrappers and resource paths for a single pull request.

use std::fmt;

use url::Url;

use super::error::IntakeError;

/// Public GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositorySlug {
    /// Parses an `owner/name` slug such as the one GitHub Actions exposes in
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidRepository`] unless the input has exactly
    /// one `/` separating two non-empty segments.
    pub fn parse(input: &str) -> Result<Self, IntakeError> {
        let invalid = || IntakeError::InvalidRepository {
            value: input.to_owned(),
        };
        let trimmed = input.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: RepositoryOwner(owner.to_owned()),
            name: RepositoryName(name.to_owned()),
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a positive pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, IntakeError> {
        if value == 0 {
            return Err(IntakeError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, IntakeError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntakeError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// A single pull request on a specific GitHub API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    repository: RepositorySlug,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Builds a locator for `repository#number` served from `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidUrl`] when `api_base` is not an absolute
    /// URL.
    pub fn new(
        api_base: &str,
        repository: RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<Self, IntakeError> {
        let parsed =
            Url::parse(api_base).map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base: parsed,
            repository,
            number,
        })
    }

    /// API base URL requests are issued against.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository the pull request belongs to.
    #[must_use]
    pub const fn repository(&self) -> &RepositorySlug {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    fn repo_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            self.repository.owner().as_str(),
            self.repository.name().as_str()
        )
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!("{}/pulls/{}", self.repo_path(), self.number.get())
    }

    pub(crate) fn issue_comments_path(&self) -> String {
        format!("{}/issues/{}/comments", self.repo_path(), self.number.get())
    }

    pub(crate) fn review_comments_path(&self) -> String {
        format!("{}/comments", self.pull_request_path())
    }

    pub(crate) fn reviews_path(&self) -> String {
        format!("{}/reviews", self.pull_request_path())
    }
}
