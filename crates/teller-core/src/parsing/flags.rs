use crate::model::{ForeignCurrencyInfo, TxnFlags};
use crate::parsing::money::parse_money;
use regex::Regex;
use std::sync::LazyLock;

/// Flag derivation over a finished, whitespace-collapsed description.
///
/// Each flag is its own predicate with no ordering dependency on the others;
/// a single row can set several (a pending foreign-currency ATM fee is three
/// flags). Keyword matching is case-insensitive except the currency token,
/// which is uppercase by convention.

// Amount accepts comma-grouped thousands or a plain digit run: statements
// print both "EUR 4,500.00" and "EUR 4500.00".
static CURRENCY_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{3})\s+((?:\d{1,3}(?:,\d{3})+|\d+)\.\d+)").expect("currency pair regex")
});

static EXCHANGE_RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)EXCHANGE\s+RATE\s+(\d+(?:\.\d+)?)").expect("exchange rate regex")
});

/// Uppercase trigrams that appear in descriptions but are never currency
/// codes ("ATM FEE 3.00" must not read as currency ATM or FEE).
const NOT_CURRENCY: &[&str] = &["ATM", "FEE", "POS", "ACH", "PIN", "INC", "LLC", "USD"];

pub fn is_pending(description: &str, amount_raw: &str) -> bool {
    description.to_uppercase().contains("PENDING:") || amount_raw.trim_end().ends_with('*')
}

pub fn is_fee(description: &str) -> bool {
    description.to_uppercase().contains("FEE")
}

pub fn is_interest(description: &str) -> bool {
    description.to_uppercase().contains("INTEREST")
}

pub fn is_check(description: &str) -> bool {
    let upper = description.to_uppercase();
    upper.starts_with("CHECK #") || upper.starts_with("CHECK#")
}

pub fn is_atm_withdrawal(description: &str) -> bool {
    let upper = description.to_uppercase();
    upper.contains("ATM WITHDRAWAL") || upper.contains("ATM FEE")
}

pub fn is_foreign_currency(description: &str) -> bool {
    if description.to_uppercase().contains("EXCHANGE RATE") {
        return true;
    }
    currency_pair(description).is_some()
}

/// Derive the full flag set for one row.
pub fn derive_flags(description: &str, amount_raw: &str) -> TxnFlags {
    TxnFlags {
        pending: is_pending(description, amount_raw),
        fee: is_fee(description),
        interest: is_interest(description),
        check: is_check(description),
        atm_withdrawal: is_atm_withdrawal(description),
        foreign_currency: is_foreign_currency(description),
    }
}

/// Secondary extraction for foreign-currency rows. Each sub-field is filled
/// only when its pattern matches; absence is not an error.
pub fn extract_foreign_currency_info(description: &str) -> ForeignCurrencyInfo {
    let mut info = ForeignCurrencyInfo::default();

    if let Some((code, amount)) = currency_pair(description) {
        info.currency_code = Some(code);
        info.foreign_amount = parse_money(&amount);
    }

    if let Some(caps) = EXCHANGE_RATE_RE.captures(description) {
        info.exchange_rate = parse_money(&caps[1]);
    }

    info
}

/// First `CODE AMOUNT` pair in the description, excluding known
/// non-currency trigrams.
fn currency_pair(description: &str) -> Option<(String, String)> {
    for caps in CURRENCY_PAIR_RE.captures_iter(description) {
        let code = &caps[1];
        if NOT_CURRENCY.contains(&code) {
            continue;
        }
        return Some((code.to_string(), caps[2].to_string()));
    }
    None
}
