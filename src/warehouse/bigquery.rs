//! BigQuery `tabledata.insertAll` implementation of the warehouse client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::error::WarehouseError;
use super::{InsertRow, TableRef, WarehouseClient};

/// Public BigQuery REST API base.
pub const DEFAULT_WAREHOUSE_API_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const REQUEST_KIND: &str = "bigquery#tableDataInsertAllRequest";
const MAX_MESSAGE_CHARS: usize = 200;

/// Configuration for [`BigQueryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigQueryConfig {
    /// Base API URL, e.g. `https://bigquery.googleapis.com/bigquery/v2`.
    pub base_url: String,
    /// OAuth access token used for bearer authentication.
    pub access_token: String,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl BigQueryConfig {
    /// Configuration against the public endpoint with the default timeout.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_WAREHOUSE_API_URL.to_owned(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Streams rows into BigQuery tables over REST.
#[derive(Debug, Clone)]
pub struct BigQueryClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl BigQueryClient {
    /// Builds a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::Configuration`] when the access token is
    /// blank or the HTTP client cannot be constructed.
    pub fn new(config: BigQueryConfig) -> Result<Self, WarehouseError> {
        let access_token = config.access_token.trim().to_owned();
        if access_token.is_empty() {
            return Err(WarehouseError::Configuration {
                message: "warehouse access token is required".to_owned(),
            });
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| WarehouseError::Configuration {
                message: format!("failed to configure warehouse HTTP client: {error}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            access_token,
        })
    }

    fn insert_all_url(&self, table: &TableRef) -> String {
        format!(
            "{}/projects/{}/datasets/{}/tables/{}/insertAll",
            self.base_url, table.project_id, table.dataset_id, table.table_id
        )
    }
}

#[async_trait]
impl WarehouseClient for BigQueryClient {
    async fn insert(&self, table: &TableRef, rows: Vec<InsertRow>) -> Result<(), WarehouseError> {
        let payload = InsertAllRequest {
            kind: REQUEST_KIND,
            rows: &rows,
        };

        let response = self
            .http
            .post(self.insert_all_url(table))
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|error| WarehouseError::Network {
                message: format!("insert into {table} failed: {error}"),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| WarehouseError::Network {
            message: format!("reading insert response for {table} failed: {error}"),
        })?;

        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }

        check_insert_errors(&body)
    }
}

#[derive(Debug, Serialize)]
struct InsertAllRequest<'rows> {
    kind: &'static str,
    rows: &'rows [InsertRow],
}

#[derive(Debug, Default, Deserialize)]
struct InsertAllResponse {
    #[serde(default, rename = "insertErrors")]
    insert_errors: Vec<RowInsertErrors>,
}

#[derive(Debug, Deserialize)]
struct RowInsertErrors {
    #[serde(default)]
    index: Option<u64>,
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    reason: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn map_status_error(status: StatusCode, body: &str) -> WarehouseError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| truncate_for_message(body, MAX_MESSAGE_CHARS));

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        WarehouseError::Authentication { message }
    } else {
        WarehouseError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn check_insert_errors(body: &str) -> Result<(), WarehouseError> {
    if body.trim().is_empty() {
        return Ok(());
    }

    let response: InsertAllResponse =
        serde_json::from_str(body).map_err(|error| WarehouseError::Api {
            status: StatusCode::OK.as_u16(),
            message: format!("insert response could not be decoded: {error}"),
        })?;

    let Some(first) = response.insert_errors.first() else {
        return Ok(());
    };

    Err(WarehouseError::RowsRejected {
        failed: response.insert_errors.len(),
        message: describe_row_error(first),
    })
}

fn describe_row_error(row: &RowInsertErrors) -> String {
    let position = row
        .index
        .map_or_else(|| "row ?".to_owned(), |index| format!("row {index}"));
    let detail = row.errors.first().map_or_else(
        || "no detail provided".to_owned(),
        |error| {
            format!(
                "{}: {}",
                error.reason.as_deref().unwrap_or("unknown"),
                error.message.as_deref().unwrap_or("")
            )
        },
    );
    format!("{position}: {detail}")
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
