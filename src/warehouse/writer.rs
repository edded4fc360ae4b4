//! Keyed, run-stamped batch writes.

use serde::Serialize;

use crate::dedup::{DedupKey, Deduplicated, RunTimestamp, key_for};

use super::error::WarehouseError;
use super::{InsertRow, TableRef, WarehouseClient};

/// A record extended with the run's `inserted_at` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stamped<T> {
    /// The record's own columns.
    #[serde(flatten)]
    pub record: T,
    /// Run timestamp shared by every row of the run.
    pub inserted_at: RunTimestamp,
}

/// A row paired with its idempotency token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRow<T> {
    /// Idempotency token.
    pub dedup_key: DedupKey,
    /// Row contents.
    pub payload: T,
}

impl<R> KeyedRow<Stamped<R>>
where
    R: Deduplicated,
{
    /// Keys and stamps a record for the given run.
    #[must_use]
    pub fn for_run(record: R, run: &RunTimestamp) -> Self {
        Self {
            dedup_key: key_for(&record, run),
            payload: Stamped {
                record,
                inserted_at: run.clone(),
            },
        }
    }
}

/// Result of a [`IngestionWriter::write`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The batch was empty; nothing was sent.
    Skipped,
    /// The batch was accepted.
    Inserted {
        /// Number of rows submitted.
        rows: usize,
    },
}

/// Submits keyed batches to a warehouse client.
pub struct IngestionWriter<'client, Client>
where
    Client: WarehouseClient + ?Sized,
{
    client: &'client Client,
}

impl<'client, Client> IngestionWriter<'client, Client>
where
    Client: WarehouseClient + ?Sized,
{
    /// Creates a writer over the provided client.
    #[must_use]
    pub const fn new(client: &'client Client) -> Self {
        Self { client }
    }

    /// Writes `rows` to `table` in one request.
    ///
    /// An empty batch returns [`WriteOutcome::Skipped`] without contacting the
    /// warehouse.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::Serialisation`] when a payload cannot be
    /// encoded, otherwise whatever the client reports. No rows are retried.
    pub async fn write<T>(
        &self,
        table: &TableRef,
        rows: Vec<KeyedRow<T>>,
    ) -> Result<WriteOutcome, WarehouseError>
    where
        T: Serialize,
    {
        if rows.is_empty() {
            tracing::debug!(%table, "skipping empty batch");
            return Ok(WriteOutcome::Skipped);
        }

        let encoded = rows
            .into_iter()
            .map(encode_row)
            .collect::<Result<Vec<_>, _>>()?;
        let count = encoded.len();

        self.client.insert(table, encoded).await?;
        tracing::debug!(%table, rows = count, "batch accepted");
        Ok(WriteOutcome::Inserted { rows: count })
    }
}

fn encode_row<T: Serialize>(row: KeyedRow<T>) -> Result<InsertRow, WarehouseError> {
    let json = serde_json::to_value(&row.payload).map_err(|error| WarehouseError::Serialisation {
        message: format!("{}: {error}", row.dedup_key),
    })?;
    Ok(InsertRow {
        insert_id: row.dedup_key,
        json,
    })
}
