use crate::error::TellerError;
use crate::model::StatementMetadata;
use crate::parsing::money::parse_money;
use regex::Regex;
use std::sync::LazyLock;

/// Scan the full document text for statement-level metadata.
///
/// Balances regularly land on a different page than the transaction table,
/// so every line is scanned, first hit wins per field. Account number and
/// both balances are mandatory; the printed period string is not.

static MONEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\$-?[\d,]+\.\d{2}").expect("money regex"));

// ASCII digits only: account numbers are printed in ASCII, and the byte
// slicing in mask_account relies on single-byte digits.
static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit regex"));

static PERIOD_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}/\d{2}/\d{4}\s*(?:-|–|through|to)\s*\d{2}/\d{2}/\d{4}")
        .expect("period regex")
});

pub fn extract_metadata(
    lines: &[&str],
    page_count: usize,
) -> Result<StatementMetadata, TellerError> {
    let mut account: Option<String> = None;
    let mut period: Option<String> = None;
    let mut beginning = None;
    let mut ending = None;

    for line in lines {
        let lower = line.to_lowercase();

        if account.is_none() && lower.contains("account") {
            account = mask_account(line);
        }

        if period.is_none() && lower.contains("statement period") {
            period = PERIOD_RANGE_RE
                .find(line)
                .map(|m| m.as_str().to_string())
                .or_else(|| extract_after_label(line, "statement period"));
        }

        if beginning.is_none() && lower.contains("beginning balance") {
            beginning = first_money(line);
        }

        if ending.is_none() && lower.contains("ending balance") {
            ending = first_money(line);
        }
    }

    let account_number_masked = account.ok_or(TellerError::MetadataNotFound {
        missing: "account number",
    })?;
    let beginning_balance = beginning.ok_or(TellerError::MetadataNotFound {
        missing: "beginning balance",
    })?;
    let ending_balance = ending.ok_or(TellerError::MetadataNotFound {
        missing: "ending balance",
    })?;

    Ok(StatementMetadata {
        account_number_masked,
        statement_period: period,
        beginning_balance,
        ending_balance,
        page_count,
    })
}

/// Last-4-digit display form from a line mentioning the account, e.g.
/// "Account Number: ****5678" or "Account: 1234-5678-9012-3456" -> "****3456".
fn mask_account(line: &str) -> Option<String> {
    let last_run = DIGIT_RUN_RE.find_iter(line).last()?;
    let digits = last_run.as_str();
    if digits.len() < 4 {
        return None;
    }
    Some(format!("****{}", &digits[digits.len() - 4..]))
}

fn first_money(line: &str) -> Option<rust_decimal::Decimal> {
    MONEY_RE.find(line).and_then(|m| parse_money(m.as_str()))
}

/// Value appearing after a label, colon optional, truncated at the next
/// large whitespace gap so trailing columns from -layout output are not
/// captured. The label is matched ASCII-case-insensitively on the original
/// bytes: an index found in a lowercased copy can land mid-char on the
/// original when lowercasing changes byte lengths.
fn extract_after_label(line: &str, label: &str) -> Option<String> {
    let idx = line
        .as_bytes()
        .windows(label.len())
        .position(|w| w.eq_ignore_ascii_case(label.as_bytes()))?;
    let after = &line[idx + label.len()..];
    let trimmed = after.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    let value = match trimmed.find("   ") {
        Some(gap) => trimmed[..gap].trim(),
        None => trimmed.trim(),
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
