//! Writing stage: synthesize the structured report from the notes blob.

use crate::llm::{GenerationClient, GenerationRequest};
use crate::types::{PipelineError, ResearchReport, Result, WritingFailure};
use schemars::schema_for;

fn prompt(notes: &str) -> String {
    format!(
        r#"Write a research report from the notes below.
Respond with a single JSON object with the fields "title", "summary",
"key_points" (2 to 5 strings) and "verdict".

Notes:
{notes}"#
    )
}

/// Parse and validate a raw synthesis response.
///
/// The backend receives the report schema only as a constraint hint, so the
/// response is never trusted: it is re-parsed and re-validated here, and
/// any mismatch fails the stage. The report is atomic; there is no partial
/// result.
pub(crate) fn parse_report(raw: &str)
    -> std::result::Result<ResearchReport, WritingFailure> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WritingFailure::EmptyResponse);
    }

    let report: ResearchReport =
        serde_json::from_str(raw).map_err(|e| WritingFailure::Parse(e.to_string()))?;

    let points = report.key_points.len();
    if !(ResearchReport::MIN_KEY_POINTS..=ResearchReport::MAX_KEY_POINTS).contains(&points) {
        return Err(WritingFailure::Invalid(format!(
            "expected {} to {} key points, got {points}",
            ResearchReport::MIN_KEY_POINTS,
            ResearchReport::MAX_KEY_POINTS,
        )));
    }

    Ok(report)
}

/// Turn the notes blob into a validated [`ResearchReport`].
pub async fn write_report(
    llm: &dyn GenerationClient,
    notes: &str,
    credential: Option<&str>,
) -> Result<ResearchReport> {
    let schema = schema_for!(ResearchReport).to_value();

    let mut request = GenerationRequest::new(prompt(notes)).with_schema(schema);
    if let Some(credential) = credential {
        request = request.with_credential(credential);
    }

    let raw = llm
        .generate(request)
        .await
        .map_err(|e| PipelineError::Writing(WritingFailure::Generation(e)))?;

    parse_report(&raw).map_err(PipelineError::Writing)
}
