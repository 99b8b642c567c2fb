use teller_core::error::TellerError;
use teller_core::model::Extraction;

pub fn print(extraction: &Extraction) -> Result<(), TellerError> {
    let json = serde_json::to_string_pretty(extraction)?;
    println!("{json}");
    Ok(())
}
