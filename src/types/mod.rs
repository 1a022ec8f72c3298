//! Core data model and error taxonomy shared across the pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============= Pipeline Data Types =============

/// A single piece of retrieved evidence.
///
/// Produced by the retrieval capability, consumed only by the extraction
/// stage, read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Origin label (URL, publication name, ...).
    pub source: String,
    /// Body text of the document.
    pub content: String,
}

/// Structured report produced by the synthesis stage.
///
/// All four fields are required; a generation response missing any of them
/// is rejected as a whole. No partial report is ever surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResearchReport {
    /// Report headline.
    pub title: String,
    /// Narrative summary of the findings.
    pub summary: String,
    /// Bullet-point findings, in order of importance. Between
    /// [`Self::MIN_KEY_POINTS`] and [`Self::MAX_KEY_POINTS`] entries.
    pub key_points: Vec<String>,
    /// One-line overall conclusion.
    pub verdict: String,
}

impl ResearchReport {
    /// Minimum number of `key_points` entries for a valid report.
    pub const MIN_KEY_POINTS: usize = 2;
    /// Maximum number of `key_points` entries for a valid report.
    pub const MAX_KEY_POINTS: usize = 5;
}

// ============= Error Types =============

/// Failure raised by the text-generation capability.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// The API credential was missing or rejected by the provider.
    #[error("API credential missing or rejected: {0}")]
    Auth(String),

    /// The request could not be completed (network, provider outage, ...).
    #[error("generation request failed: {0}")]
    Transport(String),
}

/// Failure raised by the document-retrieval capability.
#[derive(Debug, Clone, thiserror::Error)]
#[error("source retrieval failed: {0}")]
pub struct RetrievalError(
    /// Description of the underlying failure.
    pub String,
);

/// Cause of a synthesis-stage failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WritingFailure {
    /// The generation call itself failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The model returned nothing to parse.
    #[error("the model returned an empty response")]
    EmptyResponse,

    /// The response was not valid structured data for a report.
    #[error("could not parse structured report: {0}")]
    Parse(String),

    /// The response parsed but violated a report constraint.
    #[error("report failed validation: {0}")]
    Invalid(String),
}

/// A stage failure that ends a pipeline run.
///
/// One variant per stage, each wrapping the underlying cause. The `Display`
/// output is the user-facing error message, so it stays specific enough to
/// tell a credential problem from a transport problem from a malformed
/// report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// Topic refinement failed.
    #[error("planning failed: {0}")]
    Planning(#[source] GenerationError),

    /// Source retrieval failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// A per-document extraction call failed.
    #[error("fact extraction failed for \"{document}\": {cause}")]
    Mapping {
        /// Origin label of the document whose extraction failed.
        document: String,
        /// The underlying generation failure.
        #[source]
        cause: GenerationError,
    },

    /// Report synthesis failed.
    #[error("report synthesis failed: {0}")]
    Writing(#[from] WritingFailure),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PipelineError>;
