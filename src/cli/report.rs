use crate::models::ValidationResult;
use crate::validator::classify_extension;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

const NO_EXTENSION: &str = "(no extension)";

fn extension_label(ext: &str) -> &str {
    if ext.is_empty() {
        NO_EXTENSION
    } else {
        ext
    }
}

/// Print the validation report to stdout
pub fn print_report(manifest_path: &Path, result: &ValidationResult) -> io::Result<()> {
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), manifest_path, result)
}

/// Render the validation report
///
/// Statistics are always written. Missing files are grouped by extension and
/// invalid paths sorted by path and reason; both sections are omitted when
/// every entry is valid.
pub fn write_report<W: Write>(
    out: &mut W,
    manifest_path: &Path,
    result: &ValidationResult,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "QRC Validation Report".bold())?;
    writeln!(out, "===================")?;
    writeln!(out, "QRC File: {}", manifest_path.display())?;

    writeln!(out)?;
    writeln!(out, "File Statistics:")?;
    writeln!(out, "Total files referenced: {}", result.total_files)?;
    writeln!(out)?;
    writeln!(out, "Breakdown by file type:")?;
    for (ext, count) in &result.file_type_counts {
        writeln!(out, "  {}: {} files", extension_label(ext), count)?;
    }

    if result.all_valid() {
        writeln!(out)?;
        writeln!(out, "{}", "Status: All file paths are valid ✓".green())?;
        return Ok(());
    }

    if !result.missing_files.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("Missing Files ({}):", result.missing_files.len()).red()
        )?;

        let mut by_extension: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for path in &result.missing_files {
            by_extension
                .entry(classify_extension(path))
                .or_default()
                .push(path);
        }

        for (ext, paths) in &mut by_extension {
            paths.sort_unstable();
            writeln!(out)?;
            writeln!(out, "  {}:", extension_label(ext).yellow())?;
            for path in paths.iter() {
                writeln!(out, "    - {}", path)?;
            }
        }
    }

    if !result.invalid_paths.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("Invalid Paths ({}):", result.invalid_paths.len()).red()
        )?;

        let mut invalid: Vec<_> = result.invalid_paths.iter().collect();
        invalid.sort();
        for entry in invalid {
            writeln!(out, "  - {} ({})", entry.path, entry.reason)?;
        }
    }

    Ok(())
}
