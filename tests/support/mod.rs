//! Wiremock fixtures shared by every ingestion integration test.

use serde_json::{Value, json};
use tally::IngestionConfig;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Repository every fixture targets.
const REPOSITORY: &str = "acme/widgets";
/// Warehouse bearer token expected on every insert.
const WAREHOUSE_TOKEN: &str = "ya29.test-token";
/// Table receiving snapshot rows.
pub const PR_TABLE: &str = "pull_requests";
/// Table receiving activity rows.
pub const ACTIVITY_TABLE: &str = "pull_request_comments";

const PROJECT: &str = "analytics-prod";
const DATASET: &str = "engineering";
const WAREHOUSE_PREFIX: &str = "/bigquery/v2";

/// Builds a run configuration that targets `server` for both APIs.
pub fn ingestion_config(server: &MockServer, pr_number: Option<u64>) -> IngestionConfig {
    IngestionConfig {
        project_id: PROJECT.to_owned(),
        dataset_id: DATASET.to_owned(),
        pr_table_id: PR_TABLE.to_owned(),
        activity_table_id: ACTIVITY_TABLE.to_owned(),
        warehouse_token: WAREHOUSE_TOKEN.to_owned(),
        warehouse_api_url: format!("{}{WAREHOUSE_PREFIX}", server.uri()),
        github_token: Some("ghp_test".to_owned()),
        github_api_url: server.uri(),
        repository: REPOSITORY.to_owned(),
        pr_number,
        event_path: None,
    }
}

/// Path of the `insertAll` endpoint for `table`.
fn insert_all_path(table: &str) -> String {
    format!("{WAREHOUSE_PREFIX}/projects/{PROJECT}/datasets/{DATASET}/tables/{table}/insertAll")
}

/// Serves the pull request resource for `number`.
pub async fn mount_pull_request(server: &MockServer, number: u64) {
    let body = json!({
        "number": number,
        "user": { "login": "octocat" },
        "head": { "ref": "feature/widgets", "sha": "abc123" },
        "created_at": "2025-05-01T09:00:00Z",
        "commits": 3
    });

    Mock::given(method("GET"))
        .and(path(format!("/repos/{REPOSITORY}/pulls/{number}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves one activity collection below the repository path, e.g.
/// `issues/42/comments`.
pub async fn mount_collection(server: &MockServer, collection: &str, items: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{REPOSITORY}/{collection}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Makes one activity collection answer with a 404.
pub async fn mount_missing_collection(server: &MockServer, collection: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{REPOSITORY}/{collection}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(server)
        .await;
}

/// Serves the activity of PR #42: two issue comments, one review comment,
/// and one review.
pub async fn mount_busy_activity(server: &MockServer) {
    mount_collection(
        server,
        "issues/42/comments",
        json!([
            { "id": 101, "user": { "login": "alice" }, "created_at": "2025-05-01T10:00:00Z" },
            { "id": 102, "user": { "login": "bob" }, "created_at": "2025-05-01T11:00:00Z" }
        ]),
    )
    .await;
    mount_collection(
        server,
        "pulls/42/comments",
        json!([
            { "id": 201, "user": { "login": "carol" }, "created_at": "2025-05-01T12:00:00Z" }
        ]),
    )
    .await;
    mount_collection(
        server,
        "pulls/42/reviews",
        json!([
            {
                "id": 301,
                "user": { "login": "dave" },
                "state": "APPROVED",
                "submitted_at": "2025-05-01T13:00:00Z"
            }
        ]),
    )
    .await;
}

/// Serves empty activity collections for pull request `number`.
pub async fn mount_quiet_activity(server: &MockServer, number: u64) {
    for collection in [
        format!("issues/{number}/comments"),
        format!("pulls/{number}/comments"),
        format!("pulls/{number}/reviews"),
    ] {
        mount_collection(server, &collection, json!([])).await;
    }
}

/// Successful `insertAll` mock for `table` requiring the warehouse bearer token.
pub fn insert_all_mock(table: &str) -> Mock {
    let bearer = format!("Bearer {WAREHOUSE_TOKEN}");
    Mock::given(method("POST"))
        .and(path(insert_all_path(table)))
        .and(header("authorization", bearer.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "kind": "bigquery#tableDataInsertAllResponse" })),
        )
}

/// Rows submitted to `table`, flattened across every insert request.
///
/// # Panics
///
/// Panics when request recording is disabled or a body is not JSON.
pub async fn submitted_rows(server: &MockServer, table: &str) -> Vec<Value> {
    let target = insert_all_path(table);
    server
        .received_requests()
        .await
        .expect("request recording should be enabled")
        .iter()
        .filter(|request| request.url.path() == target)
        .flat_map(|request| {
            let body: Value = request.body_json().expect("insert body should be JSON");
            body.get("rows")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        })
        .collect()
}
