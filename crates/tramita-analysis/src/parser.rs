//! The extraction cascade: ordered tiers from full JSON down to raw text

use crate::error::AnalysisError;
use crate::fields::extract_labeled_fields;
use crate::locator::locate_json_object;
use crate::repair::repair_common_faults;
use crate::result::AnalysisResult;
use serde_json::Value;
use tracing::debug;

/// Summary used when the response is empty or whitespace-only.
pub const NO_CONTENT_FALLBACK: &str = "no content";

/// Warning attached when no tier recovered structured data and the raw
/// text itself had to serve as the summary.
pub const UNSTRUCTURED_WARNING: &str = "response contains no valid structured data";

const FAILURE_SUMMARY: &str = "analysis failed";
const DEFAULT_STATUS: &str = "NORMAL";
const RAW_SUMMARY_LIMIT: usize = 200;

/// Parse a raw model response into an [`AnalysisResult`].
///
/// Tiers, in order: balanced JSON object, heuristically repaired JSON
/// (one attempt), labeled plain-text lines, raw truncation. Each tier
/// degrades to the next instead of failing; the only hard failure is a
/// structural fault inside a located JSON object, and even that is
/// returned as a result rather than an error.
pub fn parse_model_response(raw: &str) -> AnalysisResult {
    let cleaned = strip_code_fence(raw.trim());

    if let Some(span) = locate_json_object(cleaned) {
        match serde_json::from_str::<Value>(span) {
            Ok(value) => {
                return populate(raw, &value).unwrap_or_else(|e| failed(raw, e));
            }
            Err(err) => {
                debug!(%err, "JSON span did not parse, attempting repair");
                let repaired = repair_common_faults(cleaned);
                if let Some(span) = locate_json_object(&repaired) {
                    if let Ok(value) = serde_json::from_str::<Value>(span) {
                        return populate(raw, &value).unwrap_or_else(|e| failed(raw, e));
                    }
                }
            }
        }
    }

    if let Some(fields) = extract_labeled_fields(cleaned) {
        let summary = fields.summary.unwrap_or_default();
        if !summary.is_empty() {
            return AnalysisResult {
                raw_text: raw.to_string(),
                summary,
                status: fields
                    .status
                    .as_deref()
                    .unwrap_or(DEFAULT_STATUS)
                    .to_uppercase(),
                deadline: fields.deadline,
                next_action: fields.next_action,
                error: None,
                warning: None,
            };
        }
        debug!("labeled fields carried no summary, falling back to truncation");
    }

    truncated(raw, cleaned)
}

/// Strip a surrounding fenced-code marker, optionally tagged `json` in
/// any casing. Idempotent: stripping twice yields the same text as once.
fn strip_code_fence(text: &str) -> &str {
    let mut out = text.trim();

    if out
        .get(..7)
        .is_some_and(|head| head.eq_ignore_ascii_case("```json"))
    {
        out = &out[7..];
    } else if let Some(rest) = out.strip_prefix("```") {
        out = rest;
    }
    out = out.trim_start();

    if let Some(rest) = out.strip_suffix("```") {
        out = rest.trim_end();
    }

    out
}

/// Map a parsed JSON object onto the result record.
///
/// Absent and null members take their defaults; a present member holding
/// a structured value (object, array, number, boolean) is a structural
/// fault rather than something to coerce.
fn populate(raw: &str, value: &Value) -> Result<AnalysisResult, AnalysisError> {
    Ok(AnalysisResult {
        raw_text: raw.to_string(),
        summary: text_member(value, "resumo")?.unwrap_or_default(),
        status: text_member(value, "situacao")?
            .unwrap_or_else(|| DEFAULT_STATUS.to_string())
            .to_uppercase(),
        deadline: text_member(value, "prazo")?,
        next_action: text_member(value, "proxima_acao")?,
        error: None,
        warning: None,
    })
}

fn text_member(value: &Value, key: &str) -> Result<Option<String>, AnalysisError> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.trim().to_string())),
        Some(other) => Err(AnalysisError::Structural(format!(
            "field '{key}' holds {} instead of text",
            kind_name(other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "an object",
        Value::Array(_) => "an array",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null | Value::String(_) => "an unexpected value",
    }
}

fn failed(raw: &str, error: AnalysisError) -> AnalysisResult {
    AnalysisResult {
        raw_text: raw.to_string(),
        summary: FAILURE_SUMMARY.to_string(),
        status: DEFAULT_STATUS.to_string(),
        deadline: None,
        next_action: None,
        error: Some(error),
        warning: None,
    }
}

fn truncated(raw: &str, cleaned: &str) -> AnalysisResult {
    let summary = if cleaned.is_empty() {
        NO_CONTENT_FALLBACK.to_string()
    } else {
        cleaned.chars().take(RAW_SUMMARY_LIMIT).collect()
    };

    AnalysisResult {
        raw_text: raw.to_string(),
        summary,
        status: DEFAULT_STATUS.to_string(),
        deadline: None,
        next_action: None,
        error: None,
        warning: Some(UNSTRUCTURED_WARNING.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_stripping_is_idempotent() {
        let fenced = "```json\n{\"a\": 1}\n```";
        let once = strip_code_fence(fenced);
        assert_eq!(once, "{\"a\": 1}");
        assert_eq!(strip_code_fence(once), once);
    }

    #[test]
    fn fence_tag_casing_is_ignored() {
        assert_eq!(strip_code_fence("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn structured_field_value_is_a_structural_fault() {
        let result = parse_model_response(r#"{"resumo": {"nested": true}}"#);
        assert!(!result.success());
        assert!(matches!(result.error, Some(AnalysisError::Structural(_))));
        assert_eq!(result.summary, FAILURE_SUMMARY);
        assert!(result.warning.is_none());
    }

    #[test]
    fn numeric_status_is_a_structural_fault() {
        let result = parse_model_response(r#"{"resumo": "ok", "situacao": 3}"#);
        assert!(!result.success());
        assert!(result.error.is_some());
    }
}
