pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod validate;

use error::TellerError;
use extraction::{PageContent, PdfExtractor};
use model::Extraction;

/// Knobs for the count sanity checks of the statement validator.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Floor on assembled (pre-filter) rows. Guards against "the grammar
    /// matched nothing at all"; a balances-only statement still passes.
    pub min_rows: usize,
    /// Ceiling on accepted rows. Guards against runaway matching.
    pub max_rows: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            min_rows: 1,
            max_rows: 2000,
        }
    }
}

/// Main API entry point: extract and validate one statement PDF.
///
/// One call processes one document end to end: pages → metadata → table →
/// row assembly → filtering → row validation → reconciliation. Stage-level
/// failures abort the call; row-level failures are aggregated on the result.
pub fn extract_statement(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    options: &ExtractOptions,
) -> Result<Extraction, TellerError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    extract_from_pages(&pages, options)
}

/// Pure pipeline over already-extracted page text. Deterministic: identical
/// input pages yield an identical Extraction.
pub fn extract_from_pages(
    pages: &[PageContent],
    options: &ExtractOptions,
) -> Result<Extraction, TellerError> {
    let all_lines: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.lines.iter().map(|s| s.as_str()))
        .collect();

    // Table location doubles as format detection, so it runs before
    // metadata: a non-statement document reports TableNotFound rather than
    // whichever metadata field happens to be absent.
    let parsed = parsing::parse_rows(&all_lines)?;
    let metadata = parsing::metadata::extract_metadata(&all_lines, pages.len())?;

    validate::check_counts(parsed.assembled_count, parsed.rows.len(), options)?;
    validate::reconcile(
        &parsed.rows,
        metadata.beginning_balance,
        metadata.ending_balance,
    )?;

    Ok(Extraction {
        metadata,
        rows: parsed.rows,
        row_errors: parsed.row_errors,
    })
}
