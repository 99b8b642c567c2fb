use std::path::PathBuf;
use teller_core::error::TellerError;
use teller_core::extraction::pdftotext::PdftotextExtractor;
use teller_core::ExtractOptions;

/// Reconciliation status only. Exits non-zero (via main) on any pipeline
/// failure, so scripts can gate on it.
pub fn run(pdf_file: PathBuf) -> Result<(), TellerError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let extraction =
        teller_core::extract_statement(&pdf_bytes, &extractor, &ExtractOptions::default())?;

    let net = extraction.metadata.ending_balance - extraction.metadata.beginning_balance;
    println!(
        "OK: {} ({} rows, {} -> {}, net {})",
        extraction.metadata.account_number_masked,
        extraction.rows.len(),
        extraction.metadata.beginning_balance,
        extraction.metadata.ending_balance,
        net,
    );
    if !extraction.row_errors.is_empty() {
        eprintln!("{} row(s) excluded:", extraction.row_errors.len());
        for err in &extraction.row_errors {
            eprintln!("  {err}");
        }
    }

    Ok(())
}
