use crate::models::{InvalidReason, ManifestEntry, ValidationResult};
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use walkdir::WalkDir;

/// Outcome of checking one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCheck {
    /// Resolves to an existing regular file
    Present,
    /// Normalized path that does not resolve to a regular file
    Missing { normalized: String, full_path: PathBuf },
    /// Rejected without touching the filesystem
    Invalid(InvalidReason),
}

/// Lowercased extension of the final path segment, including the dot
///
/// Returns an empty string when the segment has no extension. Leading dots
/// do not start an extension, so `.gitignore` has none.
pub fn classify_extension(path: &str) -> String {
    let segment = path
        .rsplit(|c: char| c == '/' || std::path::is_separator(c))
        .next()
        .unwrap_or(path);

    match segment.rfind('.') {
        Some(dot) if segment[..dot].chars().any(|c| c != '.') => segment[dot..].to_lowercase(),
        _ => String::new(),
    }
}

/// Strip one leading `/` and switch to the host separator
pub fn normalize_entry(path: &str) -> String {
    let relative = path.strip_prefix('/').unwrap_or(path);
    relative.replace('/', MAIN_SEPARATOR_STR)
}

/// Check a single entry against `base_dir`
pub fn validate_entry(base_dir: &Path, entry: &ManifestEntry) -> EntryCheck {
    let raw = entry.as_str();
    if raw.contains("//") {
        return EntryCheck::Invalid(InvalidReason::DoubleSlashes);
    }

    let normalized = normalize_entry(raw);
    let full_path = base_dir.join(&normalized);
    if full_path.is_file() {
        EntryCheck::Present
    } else {
        EntryCheck::Missing {
            normalized,
            full_path,
        }
    }
}

/// Debug details printed for the first missing file of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFileDiagnostics {
    pub entry: String,
    pub full_path: PathBuf,
    pub exists: bool,
    pub parent: PathBuf,
    pub parent_exists: bool,
    /// Sorted names in the parent directory, when it exists
    pub parent_listing: Option<Vec<String>>,
}

impl MissingFileDiagnostics {
    /// Gather details for a missing entry
    pub fn collect(entry: &str, full_path: &Path) -> io::Result<Self> {
        let parent = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let parent_exists = parent.is_dir();

        let parent_listing = if parent_exists {
            let mut names = Vec::new();
            for item in WalkDir::new(&parent).min_depth(1).max_depth(1) {
                let item = item.map_err(io::Error::from)?;
                names.push(item.file_name().to_string_lossy().into_owned());
            }
            names.sort();
            Some(names)
        } else {
            None
        };

        Ok(Self {
            entry: entry.to_string(),
            full_path: full_path.to_path_buf(),
            exists: full_path.is_file(),
            parent,
            parent_exists,
            parent_listing,
        })
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Debug info for first missing file:")?;
        writeln!(out, "File path from QRC: {}", self.entry)?;
        writeln!(out, "Full path: {}", self.full_path.display())?;
        writeln!(out, "Exists: {}", self.exists)?;
        writeln!(
            out,
            "Parent directory ({}) exists: {}",
            self.parent.display(),
            self.parent_exists
        )?;

        if let Some(listing) = &self.parent_listing {
            writeln!(out)?;
            writeln!(out, "Contents of {}:", self.parent.display())?;
            for name in listing {
                writeln!(out, "  - {}", name)?;
            }
        }
        Ok(())
    }
}

/// Result of one pass over the manifest entries
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    pub result: ValidationResult,
    /// Emitted for the first missing file only
    pub first_miss: Option<MissingFileDiagnostics>,
}

/// Validate every entry, threading one `ValidationResult` through the pass
pub fn validate_entries(base_dir: &Path, entries: &[ManifestEntry]) -> io::Result<PassOutcome> {
    let mut outcome = PassOutcome::default();

    for entry in entries {
        outcome
            .result
            .count_entry(&classify_extension(entry.as_str()));

        match validate_entry(base_dir, entry) {
            EntryCheck::Present => {}
            EntryCheck::Invalid(reason) => outcome.result.add_invalid(entry.as_str(), reason),
            EntryCheck::Missing {
                normalized,
                full_path,
            } => {
                if outcome.first_miss.is_none() {
                    outcome.first_miss =
                        Some(MissingFileDiagnostics::collect(entry.as_str(), &full_path)?);
                }
                outcome.result.add_missing(normalized);
            }
        }
    }

    Ok(outcome)
}
