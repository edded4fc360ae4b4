//! Error types exposed by the GitHub fetch layer.

use thiserror::Error;

/// Errors surfaced while resolving inputs or fetching records from GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The repository slug is not of the form `owner/name`.
    #[error("repository must be given as owner/name, got {value:?}")]
    InvalidRepository {
        /// The rejected slug.
        value: String,
    },

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The API base URL could not be parsed.
    #[error("GitHub API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("github_token is required to fetch pull request details")]
    MissingToken,

    /// The trigger event payload could not be read or parsed.
    #[error("trigger event payload is unusable: {message}")]
    EventPayload {
        /// Read or parse failure detail.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },
}
