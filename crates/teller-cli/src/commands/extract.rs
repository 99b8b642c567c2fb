use std::path::PathBuf;
use teller_core::error::TellerError;
use teller_core::extraction::pdftotext::PdftotextExtractor;
use teller_core::ExtractOptions;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    min_rows: usize,
    max_rows: usize,
) -> Result<(), TellerError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let options = ExtractOptions { min_rows, max_rows };
    let extraction = teller_core::extract_statement(&pdf_bytes, &extractor, &options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&extraction)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} transaction(s), written to {}",
                extraction.rows.len(),
                path.display()
            );
            for err in &extraction.row_errors {
                eprintln!("  row error: {err}");
            }
        }
        None => match output_format {
            "json" => output::json::print(&extraction)?,
            _ => print!("{}", output::table::format_extraction(&extraction)),
        },
    }

    Ok(())
}
