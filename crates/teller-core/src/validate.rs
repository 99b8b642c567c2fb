use crate::error::TellerError;
use crate::model::TransactionRow;
use crate::ExtractOptions;
use rust_decimal::Decimal;

/// One-cent tolerance for reconciliation.
fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Reconcile the extraction against the statement's own stated totals:
/// beginning balance plus the sum of accepted row amounts must land within
/// one cent of the ending balance. This does not locate the offending row,
/// only whether the extraction as a whole is self-consistent.
pub fn reconcile(
    rows: &[TransactionRow],
    beginning_balance: Decimal,
    ending_balance: Decimal,
) -> Result<(), TellerError> {
    let calculated: Decimal = beginning_balance + rows.iter().map(|r| r.amount).sum::<Decimal>();
    let difference = calculated - ending_balance;

    if difference.abs() <= tolerance() {
        Ok(())
    } else {
        Err(TellerError::BalanceMismatch {
            expected: ending_balance,
            calculated,
            difference,
        })
    }
}

/// Count sanity checks. The floor runs against assembled (pre-filter) rows:
/// a balances-only statement of an inactive account is valid, but a grammar
/// that matched nothing at all is not. The ceiling runs against accepted
/// rows and guards against runaway matching of garbage.
pub fn check_counts(
    assembled_count: usize,
    accepted_count: usize,
    options: &ExtractOptions,
) -> Result<(), TellerError> {
    if assembled_count < options.min_rows {
        return Err(TellerError::TooFewTransactions {
            found: assembled_count,
            floor: options.min_rows,
        });
    }
    if accepted_count > options.max_rows {
        return Err(TellerError::TooManyTransactions {
            found: accepted_count,
            ceiling: options.max_rows,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TxnFlags;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(index: usize, amount: Decimal) -> TransactionRow {
        TransactionRow {
            row_index: index,
            date_raw: "10/05/2024".into(),
            description_raw: "TEST".into(),
            amount_raw: format!("${amount}"),
            balance_raw: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 10, 5).unwrap(),
            amount,
            balance: None,
            flags: TxnFlags::default(),
            foreign_currency_info: None,
        }
    }

    #[test]
    fn test_reconcile_exact() {
        let rows = vec![row(0, dec!(2100.00)), row(1, dec!(-2677.13))];
        assert!(reconcile(&rows, dec!(2450.32), dec!(1873.19)).is_ok());
    }

    #[test]
    fn test_reconcile_within_tolerance() {
        let rows = vec![row(0, dec!(-0.99))];
        assert!(reconcile(&rows, dec!(100.00), dec!(99.00)).is_ok());
    }

    #[test]
    fn test_reconcile_mismatch() {
        let rows = vec![row(0, dec!(-10.00))];
        let err = reconcile(&rows, dec!(100.00), dec!(80.00)).unwrap_err();
        match err {
            TellerError::BalanceMismatch {
                expected,
                calculated,
                difference,
            } => {
                assert_eq!(expected, dec!(80.00));
                assert_eq!(calculated, dec!(90.00));
                assert_eq!(difference, dec!(10.00));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_rows_reconcile_when_balances_equal() {
        assert!(reconcile(&[], dec!(2450.32), dec!(2450.32)).is_ok());
    }

    #[test]
    fn test_count_floor_on_assembled() {
        let options = ExtractOptions::default();
        assert!(matches!(
            check_counts(0, 0, &options),
            Err(TellerError::TooFewTransactions { found: 0, floor: 1 })
        ));
        // Two assembled balance rows, zero accepted: valid.
        assert!(check_counts(2, 0, &options).is_ok());
    }

    #[test]
    fn test_count_ceiling_on_accepted() {
        let options = ExtractOptions {
            min_rows: 1,
            max_rows: 10,
        };
        assert!(check_counts(11, 10, &options).is_ok());
        assert!(matches!(
            check_counts(11, 11, &options),
            Err(TellerError::TooManyTransactions {
                found: 11,
                ceiling: 10
            })
        ));
    }
}
