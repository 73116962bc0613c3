//! Header matching and A1 addressing helpers

/// Find a column by header name, ignoring case, underscores and spaces,
/// so a sheet saying "Status Atual" matches a config saying
/// "Status_Atual".
pub(crate) fn find_column(headers: &[String], wanted: &str) -> Option<usize> {
    let target = normalize_header(wanted);
    headers
        .iter()
        .position(|header| normalize_header(header) == target)
}

fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Convert a 1-indexed row/column pair to A1 notation.
pub(crate) fn rowcol_to_a1(row: usize, col: usize) -> String {
    let mut letters = String::new();
    let mut n = col;
    while n > 0 {
        let remainder = ((n - 1) % 26) as u8;
        letters.insert(0, (b'A' + remainder) as char);
        n = (n - 1) / 26;
    }
    format!("{letters}{row}")
}

/// Whether a cell plausibly holds a CNJ case number: at least 15 digits
/// once separators are stripped. Filters out headers repeated mid-sheet,
/// notes and partially typed numbers.
pub(crate) fn looks_like_case_number(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() >= 15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn matching_ignores_case_underscores_and_spaces() {
        let row = headers(&["Processo", "Status Atual", "ULTIMA_VERIFICACAO"]);
        assert_eq!(find_column(&row, "processo"), Some(0));
        assert_eq!(find_column(&row, "Status_Atual"), Some(1));
        assert_eq!(find_column(&row, "Ultima Verificacao"), Some(2));
        assert_eq!(find_column(&row, "Resumo_IA"), None);
    }

    #[test]
    fn a1_notation_handles_multi_letter_columns() {
        assert_eq!(rowcol_to_a1(1, 1), "A1");
        assert_eq!(rowcol_to_a1(7, 26), "Z7");
        assert_eq!(rowcol_to_a1(2, 27), "AA2");
        assert_eq!(rowcol_to_a1(10, 52), "AZ10");
        assert_eq!(rowcol_to_a1(3, 703), "AAA3");
    }

    #[test]
    fn case_number_filter_requires_fifteen_digits() {
        assert!(looks_like_case_number("0809090-86.2023.8.12.0021"));
        assert!(looks_like_case_number("08090908620238120021"));
        assert!(!looks_like_case_number("ver anotacao"));
        assert!(!looks_like_case_number("1234-56.2024"));
    }
}
