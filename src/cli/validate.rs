use crate::models::ManifestError;
use crate::validator::{QrcValidator, ValidatorConfig};
use crate::{Context, Result};
use colored::Colorize;

/// Run validation and print the report
///
/// Returns the verdict: `true` when the manifest has no entries or every entry
/// is valid. Fatal manifest errors are printed and yield `false` without a report.
pub fn run(config: ValidatorConfig) -> Result<bool> {
    let validator = QrcValidator::new(config);

    match validator.validate() {
        Ok(validated) => validated.report().context("Failed to write report"),
        Err(err) => {
            print_manifest_error(&err);
            Ok(false)
        }
    }
}

fn print_manifest_error(err: &ManifestError) {
    if !matches!(err, ManifestError::NotFound { .. }) {
        println!();
    }
    println!("{}", format!("Error: {}", err).red());
    println!("{}", err.detail());
}
