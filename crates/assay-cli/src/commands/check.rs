//! Check command - validate a data file against a schema definition.

use std::path::PathBuf;

use assay::ValidationError;
use colored::Colorize;

pub fn run(
    file: PathBuf,
    schema: PathBuf,
    delimiter: Option<u8>,
    json: bool,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let report = super::assay_with_delimiter(delimiter).check_file(&file, &schema)?;

    if json {
        println!("{}", report.to_json()?);
        return Ok(report.passed);
    }

    println!(
        "{} {} against {}",
        "Checking".cyan().bold(),
        file.display().to_string().white(),
        schema.display().to_string().white()
    );

    if verbose {
        println!(
            "  {} rows, {} columns ({}), {} schema columns",
            report.source.row_count,
            report.source.column_count,
            report.source.format,
            report.schema_columns
        );
    }

    match &report.error {
        None => println!("{}", "Data satisfies the schema".green().bold()),
        Some(error) => {
            println!("{} {}", "Failed:".red().bold(), error);
            if verbose {
                print_group_tree(error, 1);
            }
        }
    }

    Ok(report.passed)
}

/// Print the alternatives of nested group failures as an indented tree.
fn print_group_tree(error: &ValidationError, depth: usize) {
    if let ValidationError::GroupFailure { errors, .. } = error {
        for e in errors {
            println!("{}- {}", "  ".repeat(depth), e.kind().yellow());
            print_group_tree(e, depth + 1);
        }
    }
}
