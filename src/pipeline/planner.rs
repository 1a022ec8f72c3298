//! Planning stage: refine a raw query into one research angle.

use crate::llm::{GenerationClient, GenerationRequest};
use crate::types::{PipelineError, Result};

fn prompt(query: &str) -> String {
    format!(
        r#"Propose one specific, narrowed research angle for the topic below.
Reply with a single short phrase and nothing else.

Topic: {query}"#
    )
}

/// Refine a raw query into a research angle for the downstream stages.
///
/// The response is trimmed. An empty-but-successful response degrades to
/// the original query rather than failing the run; only a failed
/// generation call is fatal.
pub async fn refine_topic(
    llm: &dyn GenerationClient,
    query: &str,
    credential: Option<&str>,
) -> Result<String> {
    let mut request = GenerationRequest::new(prompt(query));
    if let Some(credential) = credential {
        request = request.with_credential(credential);
    }

    let response = llm
        .generate(request)
        .await
        .map_err(PipelineError::Planning)?;

    let refined = response.trim();
    if refined.is_empty() {
        tracing::debug!("planner returned nothing, keeping the raw query");
        Ok(query.to_string())
    } else {
        Ok(refined.to_string())
    }
}
