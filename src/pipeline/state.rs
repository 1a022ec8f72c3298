//! Pipeline state machine.
//!
//! The transition table is a pure function `(state, event) -> state` so it
//! can be tested in isolation from the stage drivers; the orchestrator
//! applies events and handles the publish side effect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the pipeline currently is. Exactly one state is active at a time.
///
/// `Idle` is both the initial state and the state reached by a reset.
/// `Complete` and `Error` are terminal for a single run; a new run leaves
/// either of them through `Planning`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// No run has started (or the last one was cleared).
    #[default]
    Idle,
    /// Refining the query into a research angle.
    Planning,
    /// Retrieving source documents.
    Searching,
    /// Extracting facts from each document.
    Mapping,
    /// Synthesizing the structured report.
    Writing,
    /// The run finished and a report was published.
    Complete,
    /// The run was aborted by a stage failure.
    Error,
}

/// Events that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A run passed the entry guard.
    RunAccepted,
    /// The planner produced a refined topic.
    PlanFinished,
    /// Retrieval returned its document set.
    RetrievalFinished,
    /// Every per-document extraction call succeeded.
    ExtractionFinished,
    /// A validated report was produced.
    SynthesisFinished,
    /// The active stage failed.
    StageFailed,
    /// A reset was requested.
    ResetRequested,
}

impl PipelineState {
    /// Whether a new run may start from this state.
    pub fn can_accept_run(self) -> bool {
        matches!(self, Self::Idle | Self::Complete | Self::Error)
    }

    /// Terminal states for a single run.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }

    /// Pure transition function. An event that does not apply to the
    /// current state leaves it unchanged.
    pub fn apply(self, event: PipelineEvent) -> Self {
        use PipelineEvent::*;

        match (self, event) {
            (state, RunAccepted) if state.can_accept_run() => Self::Planning,
            (Self::Planning, PlanFinished) => Self::Searching,
            (Self::Searching, RetrievalFinished) => Self::Mapping,
            (Self::Mapping, ExtractionFinished) => Self::Writing,
            (Self::Writing, SynthesisFinished) => Self::Complete,
            (Self::Planning | Self::Searching | Self::Mapping | Self::Writing, StageFailed) => {
                Self::Error
            }
            (state, ResetRequested) if state.can_accept_run() => Self::Idle,
            (state, _) => state,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Planning => "planning",
            Self::Searching => "searching",
            Self::Mapping => "mapping",
            Self::Writing => "writing",
            Self::Complete => "complete",
            Self::Error => "error",
        };
        write!(f, "{name}")
    }
}
