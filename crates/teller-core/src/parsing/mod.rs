pub mod assemble;
pub mod flags;
pub mod metadata;
pub mod money;

use crate::error::{RowError, TellerError};
use crate::extraction::table::locate_table;
use crate::model::TransactionRow;
use assemble::{assemble_rows, RawRow};
use flags::{derive_flags, extract_foreign_currency_info};
use money::{parse_date, parse_money};
use rust_decimal::Decimal;

/// Structural statement furniture that must never reach the caller as a
/// transaction.
const SKIP_MARKERS: &[&str] = &[
    "BEGINNING BALANCE",
    "ENDING BALANCE",
    "SUBTOTAL",
    "TOTAL DEPOSITS",
    "TOTAL WITHDRAWALS",
];

/// Rows produced from one document, plus the row-level failures collected on
/// the way. `assembled_count` is the pre-filter row count, used by the
/// too-few-transactions floor ("did the grammar match anything at all").
#[derive(Debug)]
pub struct ParsedRows {
    pub rows: Vec<TransactionRow>,
    pub row_errors: Vec<RowError>,
    pub assembled_count: usize,
}

/// Locate the table, assemble logical rows, drop skip rows, and validate the
/// survivors. Row-level failures are collected, never fatal: the caller gets
/// every good row plus a precise report of each bad one.
pub fn parse_rows(lines: &[&str]) -> Result<ParsedRows, TellerError> {
    let offset = locate_table(lines).ok_or(TellerError::TableNotFound)?;

    let assembled = assemble_rows(lines[offset..].iter().copied());
    let assembled_count = assembled.len();

    // RowFilter: drop furniture, renumber survivors contiguously from 0.
    let survivors: Vec<RawRow> = assembled.into_iter().filter(|r| !is_skip_row(r)).collect();

    let mut rows = Vec::with_capacity(survivors.len());
    let mut row_errors = Vec::new();

    for (row_index, raw) in survivors.into_iter().enumerate() {
        match validate_row(row_index, raw) {
            Ok(row) => rows.push(row),
            Err(mut errs) => row_errors.append(&mut errs),
        }
    }

    Ok(ParsedRows {
        rows,
        row_errors,
        assembled_count,
    })
}

fn is_skip_row(row: &RawRow) -> bool {
    let upper = row.description_raw.to_uppercase();
    SKIP_MARKERS.iter().any(|m| upper.contains(m))
}

/// Row-level validation: date must parse, amount must parse and be non-zero,
/// description must be non-empty. All failing checks for a row are reported.
fn validate_row(row_index: usize, raw: RawRow) -> Result<TransactionRow, Vec<RowError>> {
    let mut errors = Vec::new();

    let date = parse_date(&raw.date_raw);
    if date.is_none() {
        errors.push(RowError::InvalidDate {
            row_index,
            date_raw: raw.date_raw.clone(),
        });
    }

    let amount_raw = raw.amount_raw.clone().unwrap_or_default();
    let amount = parse_money(&amount_raw);
    match amount {
        None => errors.push(RowError::MalformedAmount {
            row_index,
            amount_raw: amount_raw.clone(),
        }),
        Some(a) if a == Decimal::ZERO => {
            errors.push(RowError::InvalidAmount { row_index });
        }
        Some(_) => {}
    }

    if raw.description_raw.trim().is_empty() {
        errors.push(RowError::EmptyDescription { row_index });
    }

    let (Some(date), Some(amount)) = (date, amount) else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let flags = derive_flags(&raw.description_raw, &amount_raw);
    let foreign_currency_info = if flags.foreign_currency {
        Some(extract_foreign_currency_info(&raw.description_raw))
    } else {
        None
    };

    let balance_raw = raw.balance_raw.unwrap_or_default();
    let balance = parse_money(&balance_raw);

    Ok(TransactionRow {
        row_index,
        date_raw: raw.date_raw,
        description_raw: raw.description_raw,
        amount_raw,
        balance_raw,
        date,
        amount,
        balance,
        flags,
        foreign_currency_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "  Date        Description              Amount      Balance";

    #[test]
    fn test_table_not_found() {
        let lines = vec!["FIRST FEDERAL BANK", "no table here"];
        assert!(matches!(
            parse_rows(&lines),
            Err(TellerError::TableNotFound)
        ));
    }

    #[test]
    fn test_skip_rows_filtered_and_renumbered() {
        let lines = vec![
            HEADER,
            "10/01/2024  BEGINNING BALANCE $2,450.32",
            "10/05/2024  GROCERY OUTLET #44   -$87.43   $2,362.89",
            "10/15/2024  TOTAL WITHDRAWALS $87.43",
            "10/20/2024  PAYROLL ACME INC   $2,100.00   $4,462.89",
            "10/31/2024  ENDING BALANCE $4,462.89",
        ];
        let parsed = parse_rows(&lines).unwrap();
        assert_eq!(parsed.assembled_count, 5);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].row_index, 0);
        assert_eq!(parsed.rows[0].description_raw, "GROCERY OUTLET #44");
        assert_eq!(parsed.rows[1].row_index, 1);
        assert_eq!(parsed.rows[1].amount, dec!(2100.00));
        assert!(parsed.row_errors.is_empty());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let lines = vec![HEADER, "10/05/2024  VOIDED PURCHASE   $0.00   $2,450.32"];
        let parsed = parse_rows(&lines).unwrap();
        assert!(parsed.rows.is_empty());
        assert_eq!(
            parsed.row_errors,
            vec![RowError::InvalidAmount { row_index: 0 }]
        );
    }

    #[test]
    fn test_row_without_amount_tail_is_malformed() {
        let lines = vec![
            HEADER,
            "10/20/2024  TRUNCATED DESCRIPTION",
            "10/21/2024  CHECK #1042   -$150.00   $2,300.32",
        ];
        let parsed = parse_rows(&lines).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert!(parsed.rows[0].flags.check);
        assert_eq!(
            parsed.row_errors,
            vec![RowError::MalformedAmount {
                row_index: 0,
                amount_raw: String::new(),
            }]
        );
    }

    #[test]
    fn test_bad_row_keeps_indices_of_survivors_stable() {
        let lines = vec![
            HEADER,
            "10/05/2024  GROCERY OUTLET #44   -$87.43   $2,362.89",
            "10/06/2024  VOIDED   $0.00   $2,362.89",
            "10/07/2024  PAYROLL ACME INC   $2,100.00   $4,462.89",
        ];
        let parsed = parse_rows(&lines).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].row_index, 0);
        // Index 1 failed validation; survivor keeps index 2.
        assert_eq!(parsed.rows[1].row_index, 2);
        assert_eq!(parsed.row_errors[0].row_index(), 1);
    }

    #[test]
    fn test_pending_row_parses_with_flag() {
        let lines = vec![
            HEADER,
            "10/31/2024  PENDING: UBER TRIP #ABC123  -$18.50*  $1,854.69",
        ];
        let parsed = parse_rows(&lines).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        let row = &parsed.rows[0];
        assert!(row.flags.pending);
        assert_eq!(row.amount, dec!(-18.50));
        assert_eq!(row.balance, Some(dec!(1854.69)));
    }

    #[test]
    fn test_foreign_currency_info_attached() {
        let lines = vec![
            HEADER,
            "10/18/2024  CAFE DE FLORE PARIS   -$48.86   $1,805.83",
            "EUR 45.00 EXCHANGE RATE 1.0856",
        ];
        let parsed = parse_rows(&lines).unwrap();
        let row = &parsed.rows[0];
        assert!(row.flags.foreign_currency);
        let fx = row.foreign_currency_info.as_ref().unwrap();
        assert_eq!(fx.currency_code.as_deref(), Some("EUR"));
        assert_eq!(fx.foreign_amount, Some(dec!(45.00)));
        assert_eq!(fx.exchange_rate, Some(dec!(1.0856)));
    }
}
