//! CLI command implementations.
//!
//! Each command returns `Ok(true)` on success and `Ok(false)` when the data failed a check.

pub mod check;
pub mod inspect;

use assay::{Assay, AssayConfig, LoaderConfig};

fn assay_with_delimiter(delimiter: Option<u8>) -> Assay {
    Assay::with_config(AssayConfig {
        loader: LoaderConfig {
            delimiter,
            ..LoaderConfig::default()
        },
    })
}
