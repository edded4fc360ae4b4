//! Given steps for activity ingestion behavioural tests.

use rstest_bdd_macros::given;

use crate::activity_ingestion_bdd_state::IngestionState;
use crate::support::{
    accept_all_inserts, mount_busy_activity, mount_collection, mount_missing_collection,
    mount_pull_request, mount_quiet_activity,
};

#[given(
    "a GitHub API serving pull request 42 with two comments, one review comment, and one review"
)]
fn serve_busy_pull_request(ingestion_state: &IngestionState) {
    let runtime = ingestion_state.harness();
    ingestion_state
        .server
        .with_ref(|server| {
            runtime.block_on(async {
                mount_pull_request(server, 42).await;
                mount_busy_activity(server).await;
            });
        })
        .expect("mock server not initialised");
}

#[given("a GitHub API serving pull request {pr:u64} with no activity")]
fn serve_quiet_pull_request(ingestion_state: &IngestionState, pr: u64) {
    let runtime = ingestion_state.harness();
    ingestion_state
        .server
        .with_ref(|server| {
            runtime.block_on(async {
                mount_pull_request(server, pr).await;
                mount_quiet_activity(server, pr).await;
            });
        })
        .expect("mock server not initialised");
}

#[given("a GitHub API serving pull request {pr:u64} whose review comments are missing")]
fn serve_pull_request_without_review_comments(ingestion_state: &IngestionState, pr: u64) {
    let runtime = ingestion_state.harness();
    ingestion_state
        .server
        .with_ref(|server| {
            runtime.block_on(async {
                mount_pull_request(server, pr).await;
                mount_collection(server, &format!("issues/{pr}/comments"), serde_json::json!([]))
                    .await;
                mount_missing_collection(server, &format!("pulls/{pr}/comments")).await;
            });
        })
        .expect("mock server not initialised");
}

#[given("a warehouse that accepts inserts")]
fn accept_inserts(ingestion_state: &IngestionState) {
    let runtime = ingestion_state.harness();
    ingestion_state
        .server
        .with_ref(|server| runtime.block_on(accept_all_inserts(server)))
        .expect("mock server not initialised");
}
