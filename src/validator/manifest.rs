use crate::cli::report::write_report;
use crate::models::{ManifestEntry, ManifestError, ValidationResult};
use crate::parser::parse_entries;
use crate::validator::path::{validate_entries, MissingFileDiagnostics};
use crate::{Context, Result};
use colored::Colorize;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Manifest looked up when none is given
pub const DEFAULT_QRC_FILE: &str = "toonz.qrc";

/// Where to look for the manifest and the files it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub base_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl ValidatorConfig {
    /// Use `base_dir` with the default manifest inside it
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let manifest_path = base_dir.join(DEFAULT_QRC_FILE);
        Self {
            base_dir,
            manifest_path,
        }
    }

    /// Use the process working directory
    pub fn from_current_dir() -> Result<Self> {
        let cwd = env::current_dir().context("Failed to resolve current directory")?;
        Ok(Self::new(cwd))
    }

    /// Override the manifest; relative paths resolve against the base directory
    pub fn with_manifest(mut self, manifest: impl AsRef<Path>) -> Self {
        self.manifest_path = self.base_dir.join(manifest);
        self
    }
}

/// Validates one manifest against its base directory
pub struct QrcValidator {
    config: ValidatorConfig,
}

impl QrcValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.config.manifest_path
    }

    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    /// Confirm the manifest is a regular file
    pub fn locate_manifest(&self) -> std::result::Result<&Path, ManifestError> {
        let path = self.manifest_path();
        if path.is_file() {
            Ok(path)
        } else {
            Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    /// Read the manifest and extract its entries
    pub fn parse_manifest(&self) -> std::result::Result<Vec<ManifestEntry>, ManifestError> {
        let path = self.locate_manifest()?;
        let content = fs::read(path).map_err(|source| ManifestError::Unexpected {
            path: path.to_path_buf(),
            source,
        })?;

        parse_entries(&content).map_err(|e| ManifestError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate to stdout
    pub fn validate(&self) -> std::result::Result<ValidatedManifest, ManifestError> {
        let stdout = io::stdout();
        self.validate_to(&mut stdout.lock())
    }

    /// Parse the manifest and check every entry, writing progress to `out`
    pub fn validate_to<W: Write>(
        &self,
        out: &mut W,
    ) -> std::result::Result<ValidatedManifest, ManifestError> {
        let entries = self.parse_manifest()?;
        let unexpected = |source: io::Error| ManifestError::Unexpected {
            path: self.manifest_path().to_path_buf(),
            source,
        };

        self.write_progress(out).map_err(unexpected)?;

        let outcome = validate_entries(self.base_dir(), &entries).map_err(unexpected)?;
        if let Some(diagnostics) = &outcome.first_miss {
            diagnostics.write_to(out).map_err(unexpected)?;
        }

        if outcome.result.is_empty() {
            writeln!(out).map_err(unexpected)?;
            writeln!(
                out,
                "{}",
                format!("Warning: No files found in {}", self.manifest_path().display()).yellow()
            )
            .map_err(unexpected)?;
        }

        Ok(ValidatedManifest {
            manifest_path: self.manifest_path().to_path_buf(),
            result: outcome.result,
            first_miss: outcome.first_miss,
        })
    }

    fn write_progress<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Validating all file paths...".cyan())?;
        writeln!(out, "Working directory: {}", self.base_dir().display())?;
        writeln!(out, "QRC file: {}", self.manifest_path().display())?;
        Ok(())
    }
}

/// A manifest whose entries have all been checked, ready to report
#[derive(Debug, Clone)]
pub struct ValidatedManifest {
    manifest_path: PathBuf,
    result: ValidationResult,
    first_miss: Option<MissingFileDiagnostics>,
}

impl ValidatedManifest {
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn first_miss(&self) -> Option<&MissingFileDiagnostics> {
        self.first_miss.as_ref()
    }

    /// Overall verdict; a manifest without entries passes
    pub fn passed(&self) -> bool {
        self.result.is_empty() || self.result.all_valid()
    }

    /// Print the report to stdout and return the verdict
    pub fn report(self) -> io::Result<bool> {
        let stdout = io::stdout();
        self.report_to(&mut stdout.lock())
    }

    pub fn report_to<W: Write>(self, out: &mut W) -> io::Result<bool> {
        write_report(out, &self.manifest_path, &self.result)?;
        Ok(self.passed())
    }
}
