//! Run progress states.

use std::fmt;

/// Progress of a single run.
///
/// A successful run passes through every state from `Start` to `Done` in
/// declaration order; `Failed` is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has happened yet.
    Start,
    /// The pull request resource was fetched and mapped.
    PrFetched,
    /// The snapshot row was accepted by the warehouse.
    PrWritten,
    /// All three activity collections were fetched and normalised.
    ActivityFetched,
    /// The activity batch was accepted, or skipped because it was empty.
    ActivityWritten,
    /// Terminal success.
    Done,
    /// Terminal failure.
    Failed,
}

impl RunState {
    /// The state a successful step leads to, or `None` from a terminal state.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::PrFetched),
            Self::PrFetched => Some(Self::PrWritten),
            Self::PrWritten => Some(Self::ActivityFetched),
            Self::ActivityFetched => Some(Self::ActivityWritten),
            Self::ActivityWritten => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Whether the run has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Snake-case label used in logs and telemetry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PrFetched => "pr_fetched",
            Self::PrWritten => "pr_written",
            Self::ActivityFetched => "activity_fetched",
            Self::ActivityWritten => "activity_written",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tracks the current state of a run and logs each transition.
#[derive(Debug)]
pub(super) struct StateTracker {
    current: RunState,
}

impl StateTracker {
    pub(super) const fn new() -> Self {
        Self {
            current: RunState::Start,
        }
    }

    pub(super) const fn current(&self) -> RunState {
        self.current
    }

    /// Moves to the successor state.
    pub(super) fn advance(&mut self) -> RunState {
        if let Some(next) = self.current.successor() {
            tracing::debug!(from = %self.current, to = %next, "run state advanced");
            self.current = next;
        }
        self.current
    }

    /// Moves to `Failed`, returning the state the failure happened in.
    pub(super) fn fail(&mut self) -> RunState {
        let failed_in = self.current;
        self.current = RunState::Failed;
        failed_in
    }
}
