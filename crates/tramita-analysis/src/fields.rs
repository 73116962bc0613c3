//! Last-resort extraction of labeled plain-text fields

use regex::Regex;
use std::sync::LazyLock;

static SUMMARY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)resumo\s*[:\-]\s*(.+)").expect("summary pattern"));
static STATUS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)situacao\s*[:\-]\s*(.+)").expect("status pattern"));
static DEADLINE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)prazo\s*[:\-]\s*(.+)").expect("deadline pattern"));
static NEXT_ACTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)proxima[_\s]?acao\s*[:\-]\s*(.+)").expect("next action pattern")
});

/// Tokens a model uses to say "nothing here"; the field is treated as
/// absent rather than carrying them as literal text.
const ABSENT_TOKENS: [&str; 4] = ["null", "nenhum", "n/a", "nao"];

/// Fields recovered from a reply that ignored the JSON instruction and
/// answered in `Situacao: urgente` style lines instead.
#[derive(Debug, Default)]
pub(crate) struct LabeledFields {
    pub summary: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
    pub next_action: Option<String>,
}

/// Scan `text` for labeled lines, one pattern per recognized field.
///
/// Returns `None` only when zero labels matched anywhere; partial results
/// (say, only `resumo` and `situacao` present) are accepted. A label whose
/// value is one of the null-ish tokens counts as matched but contributes
/// no value.
pub(crate) fn extract_labeled_fields(text: &str) -> Option<LabeledFields> {
    if text.is_empty() {
        return None;
    }

    let mut matched = false;
    let fields = LabeledFields {
        summary: capture(&SUMMARY_LINE, text, &mut matched),
        status: capture(&STATUS_LINE, text, &mut matched),
        deadline: capture(&DEADLINE_LINE, text, &mut matched),
        next_action: capture(&NEXT_ACTION_LINE, text, &mut matched),
    };

    matched.then_some(fields)
}

fn capture(pattern: &Regex, text: &str, matched: &mut bool) -> Option<String> {
    let captures = pattern.captures(text)?;
    *matched = true;

    let value = captures[1].trim().to_string();
    if ABSENT_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_four_labels() {
        let text = "Resumo: algo\nSituacao: urgente\nPrazo: 5 dias\nProxima acao: protocolar";
        let fields = extract_labeled_fields(text).unwrap();
        assert_eq!(fields.summary.as_deref(), Some("algo"));
        assert_eq!(fields.status.as_deref(), Some("urgente"));
        assert_eq!(fields.deadline.as_deref(), Some("5 dias"));
        assert_eq!(fields.next_action.as_deref(), Some("protocolar"));
    }

    #[test]
    fn underscore_label_variant_matches() {
        let fields = extract_labeled_fields("proxima_acao - recorrer da sentenca").unwrap();
        assert_eq!(fields.next_action.as_deref(), Some("recorrer da sentenca"));
    }

    #[test]
    fn partial_match_is_accepted() {
        let fields = extract_labeled_fields("Resumo: apenas o resumo aqui").unwrap();
        assert_eq!(fields.summary.as_deref(), Some("apenas o resumo aqui"));
        assert!(fields.status.is_none());
        assert!(fields.deadline.is_none());
        assert!(fields.next_action.is_none());
    }

    #[test]
    fn null_ish_values_become_absent() {
        let text = "Resumo: ok\nPrazo: null\nProxima acao: NENHUM";
        let fields = extract_labeled_fields(text).unwrap();
        assert_eq!(fields.summary.as_deref(), Some("ok"));
        assert!(fields.deadline.is_none());
        assert!(fields.next_action.is_none());
    }

    #[test]
    fn sentinel_only_match_still_counts_as_matched() {
        let fields = extract_labeled_fields("Prazo: n/a").unwrap();
        assert!(fields.deadline.is_none());
        assert!(fields.summary.is_none());
    }

    #[test]
    fn prose_without_labels_is_no_match() {
        assert!(extract_labeled_fields("O processo segue em tramitacao regular.").is_none());
        assert!(extract_labeled_fields("").is_none());
    }
}
