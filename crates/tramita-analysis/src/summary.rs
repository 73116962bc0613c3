//! Cleanup of summaries bound for the spreadsheet

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static LEADING_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[{\s]*").expect("leading brace pattern"));
static TRAILING_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*$").expect("trailing brace pattern"));
static SUMMARY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"?resumo"?\s*[:\-]?\s*"#).expect("summary key pattern"));
static SIBLING_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)situacao|prazo|proxima[_\s]?acao").expect("sibling key pattern")
});

/// Scrub residual JSON wrapper syntax out of a summary before it is
/// written to the spreadsheet.
///
/// When the model nests badly, the summary field can leak its own JSON
/// envelope or the neighbouring fields. This strips a leading `{` and
/// trailing `}`, a `"resumo":`-style key token, everything from the first
/// sibling-field word onward, and surrounding quotes. Plain prose passes
/// through untouched.
pub fn clean_sheet_summary(summary: &str) -> String {
    let text = summary.trim();
    if text.is_empty() {
        return String::new();
    }

    let looks_jsonish = text.starts_with('{') || text.to_lowercase().contains("resumo");
    if !looks_jsonish {
        return text.to_string();
    }

    // Best case: the leak is a whole well-formed object.
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        if let Some(member) = map.get("resumo") {
            return match member {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
        }
    }

    let mut out = LEADING_BRACE.replace(text, "").into_owned();
    out = TRAILING_BRACE.replace(&out, "").into_owned();
    out = SUMMARY_KEY.replace_all(&out, "").into_owned();

    let cut = SIBLING_KEY
        .find_iter(&out)
        .find(|m| m.start() > 0)
        .map(|m| m.start());
    if let Some(idx) = cut {
        out.truncate(idx);
        out = out.trim_end().trim_end_matches(',').to_string();
    }

    out.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}
