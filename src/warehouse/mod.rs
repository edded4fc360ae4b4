//! Append-only writes to the analytics warehouse.
//!
//! [`WarehouseClient`] is the insertion seam: it accepts a batch of JSON rows,
//! each paired with an idempotency token, for one table. [`BigQueryClient`]
//! implements it over the BigQuery `insertAll` REST endpoint, and
//! [`IngestionWriter`] sits in front of it to key rows and skip empty batches.

mod bigquery;
mod error;
mod writer;

pub use bigquery::{BigQueryClient, BigQueryConfig, DEFAULT_WAREHOUSE_API_URL};
pub use error::WarehouseError;
pub use writer::{IngestionWriter, KeyedRow, Stamped, WriteOutcome};

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::dedup::DedupKey;

/// Fully qualified destination table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Cloud project owning the dataset.
    pub project_id: String,
    /// Dataset containing the table.
    pub dataset_id: String,
    /// Table name.
    pub table_id: String,
}

impl TableRef {
    /// Creates a table reference.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

/// One row as submitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertRow {
    /// Idempotency token.
    #[serde(rename = "insertId")]
    pub insert_id: DedupKey,
    /// Column values.
    pub json: serde_json::Value,
}

/// Warehouse capability used by the ingestion writer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Inserts every row into `table` in a single request.
    ///
    /// Rows whose `insert_id` the warehouse has already seen are dropped by
    /// the warehouse rather than duplicated.
    async fn insert(&self, table: &TableRef, rows: Vec<InsertRow>) -> Result<(), WarehouseError>;
}
