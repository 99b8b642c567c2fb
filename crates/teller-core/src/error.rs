use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TellerError {
    #[error("could not read document text: {0}")]
    UnreadableDocument(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no transaction table found: header tokens 'Date', 'Description', 'Amount' never co-occur on one line")]
    TableNotFound,

    #[error("statement metadata not found: missing {missing}")]
    MetadataNotFound { missing: &'static str },

    #[error("balance mismatch: statement states {expected}, extracted rows reconcile to {calculated} (difference {difference})")]
    BalanceMismatch {
        expected: Decimal,
        calculated: Decimal,
        difference: Decimal,
    },

    #[error("too few transactions: matched {found} row(s), floor is {floor}")]
    TooFewTransactions { found: usize, floor: usize },

    #[error("too many transactions: accepted {found} row(s), ceiling is {ceiling}")]
    TooManyTransactions { found: usize, ceiling: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Row-level validation failure. Never fatal to the call: rows that fail are
/// excluded from the result and reported alongside it, so an upstream
/// workflow can surface them for manual correction instead of losing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    #[error("row {row_index}: invalid date '{date_raw}'")]
    InvalidDate { row_index: usize, date_raw: String },

    #[error("row {row_index}: amount is zero")]
    InvalidAmount { row_index: usize },

    #[error("row {row_index}: malformed amount '{amount_raw}'")]
    MalformedAmount { row_index: usize, amount_raw: String },

    #[error("row {row_index}: empty description")]
    EmptyDescription { row_index: usize },
}

impl RowError {
    /// Index of the row this error refers to (post-filter numbering).
    pub fn row_index(&self) -> usize {
        match self {
            RowError::InvalidDate { row_index, .. }
            | RowError::InvalidAmount { row_index }
            | RowError::MalformedAmount { row_index, .. }
            | RowError::EmptyDescription { row_index } => *row_index,
        }
    }
}
