use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RowError;

/// Boolean classifications derived from a row's description text.
///
/// Flags are independent predicates, not mutually exclusive: a pending
/// foreign-currency fee sets three of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnFlags {
    pub pending: bool,
    pub fee: bool,
    pub interest: bool,
    pub check: bool,
    pub atm_withdrawal: bool,
    pub foreign_currency: bool,
}

impl TxnFlags {
    pub fn any(&self) -> bool {
        self.pending
            || self.fee
            || self.interest
            || self.check
            || self.atm_withdrawal
            || self.foreign_currency
    }

    /// Short display labels for the set flags, in a fixed order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.pending {
            out.push("pending");
        }
        if self.fee {
            out.push("fee");
        }
        if self.interest {
            out.push("interest");
        }
        if self.check {
            out.push("check");
        }
        if self.atm_withdrawal {
            out.push("atm");
        }
        if self.foreign_currency {
            out.push("fx");
        }
        out
    }
}

impl fmt::Display for TxnFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels().join(","))
    }
}

/// Sub-fields extracted from a foreign-currency description, each present
/// only when its pattern matched. Pairing the FX row with its settlement row
/// is left to downstream relationship detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignCurrencyInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}

/// One logical transaction assembled from one or more physical lines.
///
/// Raw fields hold the exact matched substrings; typed fields are derived
/// during row validation. Negative `amount` is a debit, positive a credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Ordinal within this extraction run, contiguous from 0 after skip rows
    /// are filtered. Not a database id.
    pub row_index: usize,
    pub date_raw: String,
    pub description_raw: String,
    pub amount_raw: String,
    pub balance_raw: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    pub flags: TxnFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_currency_info: Option<ForeignCurrencyInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementMetadata {
    /// Last-4-digit display form, e.g. "****5678".
    pub account_number_masked: String,
    /// Human-readable period range exactly as printed, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_period: Option<String>,
    pub beginning_balance: Decimal,
    pub ending_balance: Decimal,
    pub page_count: usize,
}

/// Output of one extraction call. Immutable once built; the caller owns it
/// outright and the pipeline retains nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub metadata: StatementMetadata,
    pub rows: Vec<TransactionRow>,
    /// Row-level failures, in row order. Rows listed here were excluded from
    /// `rows` but are reported rather than silently dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_errors: Vec<RowError>,
}
