/// Locate the transaction table within the flattened document lines.
///
/// The table starts at the first line where all three header tokens
/// co-occur. This is the primary "is this actually a statement we
/// recognize" signal: a document that never produces such a line is not a
/// parseable statement of the expected kind.
///
/// Detect if a line looks like the transaction table header row.
pub fn is_table_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    let header_tokens = ["date", "description", "amount"];
    header_tokens.iter().all(|tok| lower.contains(tok))
}

/// Find the line offset where table data begins (the line after the header).
/// Returns None if no header line exists before end of document.
pub fn locate_table(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| is_table_header(line))
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_table_header() {
        assert!(is_table_header(
            "  Date        Description                      Amount      Balance"
        ));
        assert!(is_table_header("DATE   DESCRIPTION   AMOUNT"));
        assert!(!is_table_header(
            "10/05/2024  GROCERY OUTLET #44  -$87.43  $4,462.89"
        ));
        // Two of three tokens is not a header
        assert!(!is_table_header("Date            Amount"));
    }

    #[test]
    fn test_locate_table() {
        let lines = vec![
            "FIRST FEDERAL BANK",
            "Account Number: ****5678",
            "",
            "  Date        Description              Amount      Balance",
            "  10/05/2024  GROCERY OUTLET #44      -$87.43     $4,462.89",
        ];
        assert_eq!(locate_table(&lines), Some(4));
    }

    #[test]
    fn test_locate_table_missing() {
        let lines = vec!["FIRST FEDERAL BANK", "Thank you for banking with us"];
        assert_eq!(locate_table(&lines), None);
    }
}
