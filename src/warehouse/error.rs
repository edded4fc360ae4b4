//! Error types exposed by the warehouse layer.

use thiserror::Error;

/// Errors surfaced while submitting rows to the warehouse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WarehouseError {
    /// The client could not be configured.
    #[error("warehouse configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The access token was rejected.
    #[error("warehouse rejected the access token: {message}")]
    Authentication {
        /// Error message returned with the 401/403 response.
        message: String,
    },

    /// The warehouse returned a non-authentication error status.
    #[error("warehouse API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// The request was accepted but some rows were refused.
    #[error("warehouse rejected {failed} row(s): {message}")]
    RowsRejected {
        /// Number of rows reported with insert errors.
        failed: usize,
        /// First reported row error.
        message: String,
    },

    /// Networking failed while calling the warehouse.
    #[error("network error talking to the warehouse: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A row could not be encoded as JSON.
    #[error("failed to encode row: {message}")]
    Serialisation {
        /// Encoder error detail.
        message: String,
    },
}
