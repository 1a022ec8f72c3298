//! Generation capability trait and request shaping.

use crate::types::GenerationError;
use async_trait::async_trait;

/// A single generation request.
///
/// `schema`, when present, asks the backend to constrain its output to
/// structured data matching the given JSON schema. The backend is treated
/// as a hint target only; callers re-validate the response themselves.
/// `credential` is an opaque per-call API key that overrides whatever the
/// backend was constructed with.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// The instruction to complete.
    pub prompt: String,
    /// Optional JSON schema constraining the response shape.
    pub schema: Option<serde_json::Value>,
    /// Optional per-call API credential.
    pub credential: Option<String>,
}

impl GenerationRequest {
    /// Create a plain-text request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            schema: None,
            credential: None,
        }
    }

    /// Constrain the response to the given JSON schema.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Attach a per-call credential. Blank credentials are treated as absent.
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        let credential = credential.into();
        self.credential = if credential.trim().is_empty() {
            None
        } else {
            Some(credential)
        };
        self
    }
}

/// Text-generation capability consumed by every pipeline stage.
///
/// Implementations are stateless request/response endpoints: nothing about
/// a pipeline run is retained between calls.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate a completion for the request.
    ///
    /// An empty string is a valid response; how to treat it is up to the
    /// calling stage.
    async fn generate(&self, request: GenerationRequest)
        -> Result<String, GenerationError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credential_is_absent() {
        let request = GenerationRequest::new("hi").with_credential("   ");
        assert!(request.credential.is_none());

        let request = GenerationRequest::new("hi").with_credential("sk-123");
        assert_eq!(request.credential.as_deref(), Some("sk-123"));
    }
}
