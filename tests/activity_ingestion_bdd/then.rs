//! Then steps for activity ingestion behavioural tests.

use rstest_bdd_macros::then;
use serde_json::Value;
use tally::{IntakeError, RunError, RunState};

use crate::activity_ingestion_bdd_state::IngestionState;
use crate::support::{ACTIVITY_TABLE, PR_TABLE, submitted_rows};

fn rows_for(ingestion_state: &IngestionState, table: &str) -> Vec<Value> {
    let runtime = ingestion_state.harness();
    ingestion_state
        .server
        .with_ref(|server| runtime.block_on(submitted_rows(server, table)))
        .expect("mock server not initialised")
}

fn run_error(ingestion_state: &IngestionState) -> RunError {
    let Some(error) = ingestion_state.error.with_ref(Clone::clone) else {
        let report = ingestion_state.report.with_ref(Clone::clone);
        panic!("expected the run to fail; report: {report:?}");
    };
    error
}

#[then("the run completes")]
fn assert_completed(ingestion_state: &IngestionState) {
    let Some(report) = ingestion_state.report.with_ref(Clone::clone) else {
        let error = ingestion_state.error.with_ref(Clone::clone);
        panic!("run report missing; last error: {error:?}");
    };
    assert_eq!(report.state, RunState::Done);
}

#[then("{count:u64} snapshot row is submitted")]
fn assert_snapshot_rows(ingestion_state: &IngestionState, count: u64) {
    assert_eq!(rows_for(ingestion_state, PR_TABLE).len() as u64, count);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the activity rows are {kinds}")]
fn assert_activity_kinds(ingestion_state: &IngestionState, kinds: String) {
    let expected: Vec<&str> = kinds.trim_matches('"').split(',').collect();
    let rows = rows_for(ingestion_state, ACTIVITY_TABLE);
    let actual: Vec<&str> = rows
        .iter()
        .map(|row| {
            row.pointer("/json/comment_type")
                .and_then(Value::as_str)
                .unwrap_or("<missing>")
        })
        .collect();

    assert_eq!(actual, expected, "activity rows should keep source order");
}

#[then("every row shares the run's inserted_at")]
fn assert_shared_timestamp(ingestion_state: &IngestionState) {
    let inserted_at = ingestion_state
        .report
        .with_ref(|report| report.inserted_at.as_str().to_owned())
        .expect("run report missing");

    let mut rows = rows_for(ingestion_state, PR_TABLE);
    rows.extend(rows_for(ingestion_state, ACTIVITY_TABLE));

    assert!(
        rows.iter().all(|row| {
            row.pointer("/json/inserted_at").and_then(Value::as_str) == Some(inserted_at.as_str())
        }),
        "every row should carry {inserted_at}"
    );
}

#[then("no activity rows are submitted")]
fn assert_no_activity(ingestion_state: &IngestionState) {
    assert!(rows_for(ingestion_state, ACTIVITY_TABLE).is_empty());
}

#[then("the run fails fetching from GitHub")]
fn assert_upstream_failure(ingestion_state: &IngestionState) {
    let error = run_error(ingestion_state);
    assert!(
        matches!(error, RunError::UpstreamFetch(IntakeError::Api { .. })),
        "expected UpstreamFetch, got {error:?}"
    );
}

#[then("the run fails because no pull request was named")]
fn assert_missing_subject(ingestion_state: &IngestionState) {
    assert_eq!(run_error(ingestion_state), RunError::MissingSubject);
}

#[then("no request reaches either API")]
fn assert_no_requests(ingestion_state: &IngestionState) {
    let runtime = ingestion_state.harness();
    let requests = ingestion_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .expect("mock server not initialised")
        .expect("request recording is not enabled");

    assert!(requests.is_empty(), "unexpected requests: {requests:?}");
}
