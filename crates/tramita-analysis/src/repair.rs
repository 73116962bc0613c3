//! Heuristic repair of near-JSON model output

use regex::Regex;
use std::sync::LazyLock;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern"));

/// Normalize the two malformations models most commonly produce: smart
/// quote characters substituted for ASCII quotes, and a trailing comma
/// before a closing `}` or `]`.
///
/// Applied at most once per response by the cascade; there is no
/// iterative fixpoint.
pub(crate) fn repair_common_faults(text: &str) -> String {
    let unquoted: String = text
        .chars()
        .map(|ch| match ch {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{00AB}' | '\u{00BB}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
            other => other,
        })
        .collect();

    TRAILING_COMMA.replace_all(&unquoted, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_trailing_comma_before_brace() {
        assert_eq!(
            repair_common_faults(r#"{"a": 1,}"#),
            r#"{"a": 1}"#
        );
    }

    #[test]
    fn removes_trailing_comma_before_bracket() {
        assert_eq!(
            repair_common_faults(r#"{"a": [1, 2, ]}"#),
            r#"{"a": [1, 2]}"#
        );
    }

    #[test]
    fn normalizes_smart_double_quotes() {
        assert_eq!(
            repair_common_faults("{\u{201C}a\u{201D}: \u{201C}b\u{201D}}"),
            r#"{"a": "b"}"#
        );
    }

    #[test]
    fn normalizes_smart_single_quotes() {
        assert_eq!(repair_common_faults("\u{2018}x\u{2019}"), "'x'");
    }

    #[test]
    fn well_formed_input_is_untouched() {
        let text = r#"{"a": "b, c", "d": [1, 2]}"#;
        assert_eq!(repair_common_faults(text), text);
    }
}
