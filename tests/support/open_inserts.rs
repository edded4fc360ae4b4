//! Warehouse mocks that accept any batch without verifying call counts.

use wiremock::MockServer;

use super::common::{ACTIVITY_TABLE, PR_TABLE, insert_all_mock};

/// Accepts any number of inserts into both tables.
pub async fn accept_all_inserts(server: &MockServer) {
    insert_all_mock(PR_TABLE).mount(server).await;
    insert_all_mock(ACTIVITY_TABLE).mount(server).await;
}
