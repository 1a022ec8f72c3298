//! Mapping stage: extract facts from every retrieved document.

use crate::llm::{GenerationClient, GenerationRequest};
use crate::types::{GenerationError, PipelineError, Result, SourceDocument};
use std::sync::Arc;
use tokio::task::JoinSet;

fn prompt(document: &SourceDocument) -> String {
    format!(
        r#"Extract the key facts from this source as a short plain-text digest.

Source: {source}

{content}"#,
        source = document.source,
        content = document.content,
    )
}

/// Extract facts from every document concurrently and join the results into
/// one notes blob, in input-document order.
///
/// All per-document calls are issued at once; the stage waits for every one
/// of them. Results are slotted by original index, never by arrival order.
/// A single failed call fails the whole stage (no partial notes), and the
/// still-running siblings are aborted when the task set is dropped. Zero
/// documents yield an empty blob.
pub async fn extract_notes(
    llm: &Arc<dyn GenerationClient>,
    documents: &[SourceDocument],
    credential: Option<&str>,
) -> Result<String> {
    if documents.is_empty() {
        return Ok(String::new());
    }

    let mut calls = JoinSet::new();
    for (index, document) in documents.iter().enumerate() {
        let llm = Arc::clone(llm);
        let source = document.source.clone();
        let mut request = GenerationRequest::new(prompt(document));
        if let Some(credential) = credential {
            request = request.with_credential(credential);
        }
        calls.spawn(async move {
            let outcome = llm.generate(request).await;
            (index, source, outcome)
        });
    }

    let mut notes: Vec<Option<String>> = vec![None; documents.len()];
    while let Some(joined) = calls.join_next().await {
        let (index, document, outcome) = match joined {
            Ok(result) => result,
            Err(e) => {
                return Err(PipelineError::Mapping {
                    document: "extraction worker".to_string(),
                    cause: GenerationError::Transport(format!("extraction task failed: {e}")),
                });
            }
        };
        let text = outcome.map_err(|cause| PipelineError::Mapping { document, cause })?;
        notes[index] = Some(text);
    }

    Ok(notes
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect::<Vec<_>>()
        .join("\n"))
}
