//! When steps for activity ingestion behavioural tests.

use rstest_bdd_macros::when;
use tally::{NoopTelemetrySink, run_ingestion};

use crate::activity_ingestion_bdd_state::IngestionState;
use crate::support::ingestion_config;

fn run_with_number(ingestion_state: &IngestionState, pr_number: Option<u64>) {
    let runtime = ingestion_state.harness();
    let config = ingestion_state
        .server
        .with_ref(|server| ingestion_config(server, pr_number))
        .expect("mock server not initialised");

    match runtime.block_on(run_ingestion(&config, &NoopTelemetrySink)) {
        Ok(report) => {
            drop(ingestion_state.error.take());
            ingestion_state.report.set(report);
        }
        Err(error) => {
            drop(ingestion_state.report.take());
            ingestion_state.error.set(error);
        }
    }
}

#[when("the run ingests pull request {pr:u64}")]
fn ingest_pull_request(ingestion_state: &IngestionState, pr: u64) {
    run_with_number(ingestion_state, Some(pr));
}

#[when("the run starts without a pull request number")]
fn ingest_without_number(ingestion_state: &IngestionState) {
    run_with_number(ingestion_state, None);
}
