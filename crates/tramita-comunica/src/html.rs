//! HTML cleanup for gazette publication bodies

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(?:[xX]([0-9a-fA-F]+)|([0-9]+))|([a-zA-Z][a-zA-Z0-9]*));")
        .expect("entity pattern")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("space pattern"));

/// Strip HTML from a publication body: decode entities, drop tags,
/// collapse runs of whitespace.
///
/// Gazette bodies arrive as HTML fragments with heavy use of `&nbsp;`
/// and accented-letter entities; the model prompt and the spreadsheet
/// both want plain text.
pub fn strip_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let decoded = ENTITY.replace_all(text, decode_entity);
    let untagged = TAG.replace_all(&decoded, " ");
    SPACE.replace_all(&untagged, " ").trim().to_string()
}

fn decode_entity(caps: &Captures) -> String {
    if let Some(hex) = caps.get(1) {
        return u32::from_str_radix(hex.as_str(), 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string());
    }
    if let Some(dec) = caps.get(2) {
        return dec
            .as_str()
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string());
    }

    // Named entities the gazette actually uses: structural ones plus the
    // Portuguese accented letters.
    let named = match &caps[3] {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "sect" => '§',
        "ordm" => 'º',
        "ordf" => 'ª',
        "middot" => '·',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "agrave" => 'à',
        "Agrave" => 'À',
        "aacute" => 'á',
        "Aacute" => 'Á',
        "acirc" => 'â',
        "Acirc" => 'Â',
        "atilde" => 'ã',
        "Atilde" => 'Ã',
        "ccedil" => 'ç',
        "Ccedil" => 'Ç',
        "eacute" => 'é',
        "Eacute" => 'É',
        "ecirc" => 'ê',
        "Ecirc" => 'Ê',
        "iacute" => 'í',
        "Iacute" => 'Í',
        "oacute" => 'ó',
        "Oacute" => 'Ó',
        "ocirc" => 'ô',
        "Ocirc" => 'Ô',
        "otilde" => 'õ',
        "Otilde" => 'Õ',
        "uacute" => 'ú',
        "Uacute" => 'Ú',
        _ => return caps[0].to_string(),
    };
    named.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let html = "<p>Vistos.</p>\n\n<p>Intime-se   a parte.</p>";
        assert_eq!(strip_html(html), "Vistos. Intime-se a parte.");
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(
            strip_html("INTIMA&Ccedil;&Atilde;O&nbsp;- Justi&ccedil;a"),
            "INTIMAÇÃO - Justiça"
        );
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(strip_html("art. 523, &#167; 1&#186;"), "art. 523, § 1º");
        assert_eq!(strip_html("&#x00A7; 2&#xBA;"), "§ 2º");
    }

    #[test]
    fn unknown_entity_is_left_alone() {
        assert_eq!(strip_html("isso &coisa; aquilo"), "isso &coisa; aquilo");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(strip_html(""), "");
    }
}
