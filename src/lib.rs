//! # dossier - automated research-brief pipeline
//!
//! dossier turns a raw topic into a structured research report in four
//! stages: a planner refines the topic into one research angle, a
//! retriever gathers evidence documents, an extractor pulls key facts out
//! of every document concurrently, and a synthesizer writes a validated
//! report from the collected notes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dossier::{EngineConfig, Orchestrator, PipelineState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::from_env()?;
//!     let orchestrator = Orchestrator::from_config(&config);
//!
//!     let mut updates = orchestrator.subscribe();
//!     orchestrator.run("solid state batteries", "sk-...");
//!
//!     while updates.changed().await.is_ok() {
//!         let snapshot = updates.borrow_and_update().clone();
//!         println!("state: {}", snapshot.state);
//!         if snapshot.state.is_terminal() {
//!             break;
//!         }
//!     }
//!
//!     if let Some(report) = orchestrator.snapshot().report {
//!         println!("{}: {}", report.title, report.verdict);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Swapping backends
//!
//! The pipeline consumes its two external collaborators through traits, so
//! either can be replaced (a different provider, a corpus-backed retriever,
//! scripted fakes in tests):
//!
//! ```rust,ignore
//! use dossier::{GenerationClient, Orchestrator, RetrievalClient};
//! use std::sync::Arc;
//!
//! let orchestrator = Orchestrator::new(
//!     Arc::new(MyGenerator::new()),
//!     Arc::new(MyRetriever::new()),
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `openai` | OpenAI-compatible chat-completions backend (default) |
//! | `web-search` | DuckDuckGo web retrieval backend (default) |
//!
//! ## Modules
//!
//! - [`pipeline`] - orchestrator, state machine and the four stages
//! - [`llm`] - text-generation capability and the OpenAI backend
//! - [`retrieval`] - document-retrieval capability and the web backend
//! - [`types`] - data model and error taxonomy
//! - [`utils`] - environment-driven configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Text-generation capability and backends.
pub mod llm;
/// The pipeline core: orchestrator, state machine, stages.
pub mod pipeline;
/// Document-retrieval capability and backends.
pub mod retrieval;
/// Core data model and error taxonomy.
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{GenerationClient, GenerationRequest};
#[cfg(feature = "openai")]
pub use llm::OpenAiClient;
pub use pipeline::{Orchestrator, PipelineEvent, PipelineSnapshot, PipelineState};
pub use retrieval::RetrievalClient;
#[cfg(feature = "web-search")]
pub use retrieval::WebRetriever;
pub use types::{
    GenerationError, PipelineError, ResearchReport, Result, RetrievalError, SourceDocument,
    WritingFailure,
};
pub use utils::EngineConfig;
