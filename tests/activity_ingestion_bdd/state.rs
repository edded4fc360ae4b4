//! Scenario state for activity ingestion behavioural tests.

use std::cell::RefCell;
use std::rc::Rc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tally::{RunError, RunReport};
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct IngestionState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) report: Slot<RunReport>,
    pub(crate) error: Slot<RunError>,
}

impl IngestionState {
    /// Returns the scenario runtime and mock server, starting both on first
    /// use.
    pub(crate) fn harness(&self) -> SharedRuntime {
        if self.runtime.with_ref(|_| ()).is_none() {
            let runtime = Runtime::new().expect("failed to create Tokio runtime");
            self.runtime.set(SharedRuntime(Rc::new(RefCell::new(runtime))));
        }

        let runtime = self.runtime.get().expect("runtime not initialised");
        if self.server.with_ref(|_| ()).is_none() {
            self.server.set(runtime.block_on(MockServer::start()));
        }
        runtime
    }
}
