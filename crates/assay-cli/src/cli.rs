//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assay: declarative schema validation for tabular data
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a data file against a JSON schema definition
    Check {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the schema definition (JSON)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: PathBuf,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the columns and inferred types of a data file
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },
}

/// Accepts a single ASCII character or the escape `\t`.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
    }

    #[test]
    fn test_check_args() {
        let cli = Cli::try_parse_from(["assay", "check", "data.csv", "-s", "schema.json", "--json"])
            .unwrap();
        match cli.command {
            Commands::Check { file, schema, json, delimiter } => {
                assert_eq!(file, PathBuf::from("data.csv"));
                assert_eq!(schema, PathBuf::from("schema.json"));
                assert!(json);
                assert_eq!(delimiter, None);
            }
            _ => panic!("expected check command"),
        }
    }
}
