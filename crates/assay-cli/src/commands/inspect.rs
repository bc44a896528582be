//! Inspect command - show columns and their inferred types.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(file: PathBuf, delimiter: Option<u8>) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (table, source) = super::assay_with_delimiter(delimiter).load(&file)?;

    println!(
        "{} {} ({}, {} rows)",
        "Columns of".cyan().bold(),
        source.file.white(),
        source.format,
        source.row_count
    );

    for column in table.columns() {
        let dtype = column
            .dtype()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| {
                if column.null_count() == column.len() { "null" } else { "mixed" }.to_string()
            });
        let timezone = column
            .timezone()
            .map(|tz| format!(" tz={}", tz))
            .unwrap_or_default();

        println!(
            "  {:20} {:10} nulls={}{}",
            column.name(),
            dtype,
            column.null_count(),
            timezone
        );
    }

    Ok(true)
}
