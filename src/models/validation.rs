use std::collections::BTreeMap;
use std::fmt;

/// A single path referenced by a `<file>` element, exactly as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry(String);

impl ManifestEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Raw path text from the manifest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why an entry was rejected before touching the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvalidReason {
    /// Path contains `//`
    DoubleSlashes,
}

impl InvalidReason {
    /// Get display message for reason
    pub fn message(&self) -> &'static str {
        match self {
            InvalidReason::DoubleSlashes => "Contains double slashes",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A structurally malformed entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvalidPath {
    pub path: String,
    pub reason: InvalidReason,
}

impl InvalidPath {
    pub fn new(path: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// Everything accumulated while validating one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Number of entries encountered
    pub total_files: usize,
    /// Lowercased extension (may be empty) to occurrence count
    pub file_type_counts: BTreeMap<String, usize>,
    /// Normalized paths that do not name an existing regular file
    pub missing_files: Vec<String>,
    /// Entries rejected for their structure
    pub invalid_paths: Vec<InvalidPath>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an entry under its extension
    pub fn count_entry(&mut self, extension: &str) {
        self.total_files += 1;
        *self
            .file_type_counts
            .entry(extension.to_string())
            .or_insert(0) += 1;
    }

    pub fn add_missing(&mut self, path: impl Into<String>) {
        self.missing_files.push(path.into());
    }

    pub fn add_invalid(&mut self, path: impl Into<String>, reason: InvalidReason) {
        self.invalid_paths.push(InvalidPath::new(path, reason));
    }

    /// Check if no entry was missing or invalid
    pub fn all_valid(&self) -> bool {
        self.missing_files.is_empty() && self.invalid_paths.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}
