//! Warehouse mocks that verify how many batches a run submits.

use wiremock::MockServer;

use super::common::insert_all_mock;

/// Accepts inserts into `table`, expecting exactly `calls` requests.
pub async fn mount_insert_all(server: &MockServer, table: &str, calls: u64) {
    insert_all_mock(table).expect(calls).mount(server).await;
}
