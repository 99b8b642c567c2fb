use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency-formatted string from a statement into a Decimal.
///
/// Handles formats like:
/// - "$4,462.89" -> 4462.89
/// - "-$87.43" -> -87.43
/// - "$-87.43" -> -87.43
/// - "+$2,100.00" -> 2100.00
/// - "-$18.50*" -> -18.50 (trailing pending marker stripped)
///
/// Returns None if the remainder is not a valid decimal number.
pub fn parse_money(s: &str) -> Option<Decimal> {
    let s = s.trim().trim_end_matches('*').trim();
    if s.is_empty() {
        return None;
    }

    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let rest = rest.trim_start_matches('$');
    // Sign may also appear after the dollar sign
    let (negative, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (negative, rest),
    };

    let normalized = rest.replace(',', "");
    let value = Decimal::from_str(normalized.trim()).ok()?;
    Some(if negative { -value } else { value })
}

/// Parse a statement date in MM/DD/YYYY form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_amount() {
        assert_eq!(parse_money("$4,462.89"), Some(dec!(4462.89)));
    }

    #[test]
    fn test_negative_before_dollar() {
        assert_eq!(parse_money("-$87.43"), Some(dec!(-87.43)));
    }

    #[test]
    fn test_negative_after_dollar() {
        assert_eq!(parse_money("$-87.43"), Some(dec!(-87.43)));
    }

    #[test]
    fn test_explicit_positive() {
        assert_eq!(parse_money("+$2,100.00"), Some(dec!(2100.00)));
    }

    #[test]
    fn test_pending_marker_stripped() {
        assert_eq!(parse_money("-$18.50*"), Some(dec!(-18.50)));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(parse_money("  $500.00  "), Some(dec!(500.00)));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_money("N/A"), None);
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("$"), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("10/15/2024"),
            NaiveDate::from_ymd_opt(2024, 10, 15)
        );
        assert_eq!(parse_date("13/45/2024"), None);
        assert_eq!(parse_date("2024-10-15"), None);
    }
}
