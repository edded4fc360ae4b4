//! Exhaustive page collection shared by the list endpoints.

use octocrab::{Octocrab, Page};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::github::error::IntakeError;

use super::error_mapping::map_octocrab_error;

/// GitHub's maximum page size for the list endpoints used here.
const PER_PAGE: u8 = 100;

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
}

/// Fetches the first page at `path` and follows `Link` headers until every
/// item has been collected, preserving the order GitHub returned them in.
pub(super) async fn fetch_all_pages<T>(
    client: &Octocrab,
    path: String,
    operation: &str,
) -> Result<Vec<T>, IntakeError>
where
    T: DeserializeOwned,
{
    let params = PageParams { per_page: PER_PAGE };
    let first_page = client
        .get::<Page<T>, _, _>(path, Some(&params))
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    let items = client
        .all_pages(first_page)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    tracing::debug!(operation, count = items.len(), "collected all pages");
    Ok(items)
}
