//! Court identification from CNJ case numbers
//!
//! The unified CNJ numbering (NNNNNNN-DD.AAAA.J.TR.OOOO) encodes the
//! justice branch in digit 13 and the court in digits 14-15 of the
//! separator-free form.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\-\s]").expect("separator pattern"));

/// Strip the dots, dashes and spaces of a formatted case number.
pub fn normalize_case_number(number: &str) -> String {
    SEPARATORS.replace_all(number, "").into_owned()
}

/// Justice branch encoded in a CNJ case number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JusticeBranch {
    /// State courts (segment 8)
    State,
    /// Labor courts (segment 5)
    Labor,
    /// Federal courts (segment 4)
    Federal,
}

/// Court identification extracted from a CNJ case number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtInfo {
    /// Justice branch
    pub branch: JusticeBranch,
    /// Two-digit court code as it appears in the number
    pub court_code: String,
    /// Conventional abbreviation (TJSP, TRT2, TRF3, ...), when known
    pub abbreviation: Option<String>,
}

const STATE_COURTS: [(&str, &str); 27] = [
    ("01", "TJAC"),
    ("02", "TJAL"),
    ("03", "TJAP"),
    ("04", "TJAM"),
    ("05", "TJBA"),
    ("06", "TJCE"),
    ("07", "TJDFT"),
    ("08", "TJES"),
    ("09", "TJGO"),
    ("10", "TJMA"),
    ("11", "TJMT"),
    ("12", "TJMS"),
    ("13", "TJMG"),
    ("14", "TJPA"),
    ("15", "TJPB"),
    ("16", "TJPR"),
    ("17", "TJPE"),
    ("18", "TJPI"),
    ("19", "TJRJ"),
    ("20", "TJRN"),
    ("21", "TJRS"),
    ("22", "TJRO"),
    ("23", "TJRR"),
    ("24", "TJSC"),
    ("25", "TJSE"),
    ("26", "TJSP"),
    ("27", "TJTO"),
];

/// Identify the court behind a case number, in any formatting.
///
/// Returns `None` for numbers that are not 20 digits long or belong to a
/// branch outside the state/labor/federal segments — malformed input is
/// simply "unknown court", never an error.
pub fn court_from_case_number(number: &str) -> Option<CourtInfo> {
    let digits = normalize_case_number(number);
    if digits.len() != 20 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let branch_digit = &digits[13..14];
    let court_code = &digits[14..16];

    let (branch, abbreviation) = match branch_digit {
        "8" => (
            JusticeBranch::State,
            STATE_COURTS
                .iter()
                .find(|(code, _)| *code == court_code)
                .map(|(_, abbr)| (*abbr).to_string()),
        ),
        "5" => (
            JusticeBranch::Labor,
            court_code
                .parse::<u8>()
                .ok()
                .map(|n| format!("TRT{n}")),
        ),
        "4" => (
            JusticeBranch::Federal,
            court_code
                .parse::<u8>()
                .ok()
                .map(|n| format!("TRF{n}")),
        ),
        _ => return None,
    };

    Some(CourtInfo {
        branch,
        court_code: court_code.to_string(),
        abbreviation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_formatted_numbers() {
        assert_eq!(
            normalize_case_number("0809090-86.2023.8.12.0021"),
            "08090908620238120021"
        );
    }

    #[test]
    fn identifies_state_court() {
        let info = court_from_case_number("0809090-86.2023.8.12.0021").unwrap();
        assert_eq!(info.branch, JusticeBranch::State);
        assert_eq!(info.court_code, "12");
        assert_eq!(info.abbreviation.as_deref(), Some("TJMS"));
    }

    #[test]
    fn identifies_labor_court_without_leading_zero() {
        let info = court_from_case_number("0010203-40.2024.5.02.0011").unwrap();
        assert_eq!(info.branch, JusticeBranch::Labor);
        assert_eq!(info.abbreviation.as_deref(), Some("TRT2"));
    }

    #[test]
    fn identifies_federal_court() {
        let info = court_from_case_number("0001234-56.2022.4.03.6100").unwrap();
        assert_eq!(info.branch, JusticeBranch::Federal);
        assert_eq!(info.abbreviation.as_deref(), Some("TRF3"));
    }

    #[test]
    fn unknown_branch_or_bad_length_is_none() {
        assert!(court_from_case_number("0001234-56.2022.9.03.6100").is_none());
        assert!(court_from_case_number("123").is_none());
        assert!(court_from_case_number("").is_none());
    }
}
