//! The orchestrator: drives the four stages in sequence and owns all
//! run-scoped state.

use crate::llm::GenerationClient;
use crate::pipeline::state::{PipelineEvent, PipelineState};
use crate::pipeline::{extractor, planner, synthesizer};
use crate::retrieval::RetrievalClient;
use crate::types::{PipelineError, ResearchReport, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

#[cfg(all(feature = "openai", feature = "web-search"))]
use crate::llm::OpenAiClient;
#[cfg(all(feature = "openai", feature = "web-search"))]
use crate::retrieval::WebRetriever;
#[cfg(all(feature = "openai", feature = "web-search"))]
use crate::utils::EngineConfig;

/// Read-only view of the pipeline, published after every transition.
///
/// Stage outputs appear as soon as their stage succeeds: `topic` right
/// after planning, `report` together with `Complete`. A failed run keeps
/// whatever had already been published and adds the error message.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PipelineSnapshot {
    /// Current pipeline state.
    pub state: PipelineState,
    /// Refined topic, once planning has succeeded.
    pub topic: Option<String>,
    /// The synthesized report, once the run is complete.
    pub report: Option<ResearchReport>,
    /// User-facing description of the failure that ended the run.
    pub error: Option<String>,
}

struct Inner {
    llm: Arc<dyn GenerationClient>,
    retriever: Arc<dyn RetrievalClient>,
    snapshot: watch::Sender<PipelineSnapshot>,
}

/// Drives a research run through planning, searching, mapping and writing.
///
/// One logical run is active at a time per orchestrator; overlapping `run`
/// calls are rejected at the entry guard. Observers watch a coalescing
/// snapshot channel via [`Orchestrator::subscribe`].
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Create an orchestrator over the given capabilities.
    pub fn new(
        llm: Arc<dyn GenerationClient>,
        retriever: Arc<dyn RetrievalClient>,
    ) -> Self {
        let (snapshot, _) = watch::channel(PipelineSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                llm,
                retriever,
                snapshot,
            }),
        }
    }

    /// Create an orchestrator wired to the production backends.
    #[cfg(all(feature = "openai", feature = "web-search"))]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Arc::new(OpenAiClient::from_config(&config.llm)),
            Arc::new(WebRetriever::new(config.retrieval.max_sources)),
        )
    }

    /// Start a research run. Fire-and-forget: state changes are observed
    /// through [`Orchestrator::subscribe`].
    ///
    /// A no-op when the query is empty/whitespace or when a run is already
    /// active (only `Idle`, `Complete` and `Error` accept a new run).
    /// Accepting a run clears the previous run's topic, report and error.
    pub fn run(&self, query: &str, credential: &str) {
        let query = query.trim().to_string();
        if query.is_empty() {
            tracing::debug!("ignoring run request with an empty query");
            return;
        }

        // Guard and transition in one send so two concurrent callers can
        // never both be accepted.
        let accepted = self.inner.snapshot.send_if_modified(|snapshot| {
            if !snapshot.state.can_accept_run() {
                return false;
            }
            snapshot.topic = None;
            snapshot.report = None;
            snapshot.error = None;
            snapshot.state = snapshot.state.apply(PipelineEvent::RunAccepted);
            true
        });
        if !accepted {
            tracing::debug!("ignoring run request while a run is active");
            return;
        }

        let credential = credential.trim();
        let credential = (!credential.is_empty()).then(|| credential.to_string());
        let run_id = Uuid::new_v4();
        let inner = Arc::clone(&self.inner);

        let span = tracing::info_span!("research_run", %run_id, query = %query);
        tokio::spawn(
            async move {
                if let Err(error) = inner.drive(&query, credential.as_deref()).await {
                    inner.fail(error);
                }
            }
            .instrument(span),
        );
    }

    /// Clear all run-scoped data and return to `Idle`.
    ///
    /// Ignored while a run is active; accepting it there would let a second
    /// run start underneath the one still driving stages.
    pub fn reset(&self) {
        let cleared = self.inner.snapshot.send_if_modified(|snapshot| {
            if !snapshot.state.can_accept_run() {
                return false;
            }
            *snapshot = PipelineSnapshot::default();
            true
        });
        if !cleared {
            tracing::debug!("ignoring reset while a run is active");
        }
    }

    /// Subscribe to snapshot updates.
    ///
    /// The channel coalesces: a receiver always sees the latest snapshot,
    /// and one that keeps up sees every transition.
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.inner.snapshot.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.inner.snapshot.borrow().clone()
    }
}

impl Inner {
    async fn drive(&self, query: &str, credential: Option<&str>) -> Result<()> {
        let topic = planner::refine_topic(self.llm.as_ref(), query, credential).await?;
        tracing::info!(%topic, model = self.llm.model_name(), "topic refined");
        self.snapshot.send_modify(|snapshot| {
            snapshot.topic = Some(topic.clone());
            snapshot.state = snapshot.state.apply(PipelineEvent::PlanFinished);
        });

        let documents = self.retriever.search(&topic).await?;
        tracing::info!(count = documents.len(), "sources retrieved");
        self.snapshot.send_modify(|snapshot| {
            snapshot.state = snapshot.state.apply(PipelineEvent::RetrievalFinished);
        });

        let notes = extractor::extract_notes(&self.llm, &documents, credential).await?;
        tracing::info!(bytes = notes.len(), "facts extracted");
        self.snapshot.send_modify(|snapshot| {
            snapshot.state = snapshot.state.apply(PipelineEvent::ExtractionFinished);
        });

        let report = synthesizer::write_report(self.llm.as_ref(), &notes, credential).await?;
        tracing::info!(title = %report.title, "report synthesized");
        self.snapshot.send_modify(|snapshot| {
            snapshot.report = Some(report);
            snapshot.state = snapshot.state.apply(PipelineEvent::SynthesisFinished);
        });

        Ok(())
    }

    /// End the run in `Error`, preserving already-published stage outputs.
    fn fail(&self, error: PipelineError) {
        tracing::warn!(%error, "research run failed");
        self.snapshot.send_modify(|snapshot| {
            snapshot.error = Some(error.to_string());
            snapshot.state = snapshot.state.apply(PipelineEvent::StageFailed);
        });
    }
}
