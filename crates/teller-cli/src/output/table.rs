use teller_core::model::Extraction;

/// Human-readable rendering of an extraction result.
pub fn format_extraction(extraction: &Extraction) -> String {
    let mut out = String::new();
    let meta = &extraction.metadata;

    out.push_str(&format!("Account:   {}\n", meta.account_number_masked));
    if let Some(period) = &meta.statement_period {
        out.push_str(&format!("Period:    {}\n", period));
    }
    out.push_str(&format!("Beginning: {}\n", meta.beginning_balance));
    out.push_str(&format!("Ending:    {}\n", meta.ending_balance));
    out.push_str(&format!("Pages:     {}\n\n", meta.page_count));

    let max_desc = extraction
        .rows
        .iter()
        .map(|r| r.description_raw.len())
        .max()
        .unwrap_or(11)
        .max(11);

    out.push_str(&format!(
        "  #    date        {:<width$}  {:>12}  flags\n",
        "description",
        "amount",
        width = max_desc
    ));

    for row in &extraction.rows {
        out.push_str(&format!(
            "  {:<4} {}  {:<width$}  {:>12}  {}\n",
            row.row_index,
            row.date,
            row.description_raw,
            row.amount.to_string(),
            row.flags,
            width = max_desc
        ));
    }

    if !extraction.row_errors.is_empty() {
        out.push_str(&format!(
            "\n{} row(s) excluded:\n",
            extraction.row_errors.len()
        ));
        for err in &extraction.row_errors {
            out.push_str(&format!("  {err}\n"));
        }
    }

    out
}
