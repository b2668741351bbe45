// qrc-check - Qt resource collection manifest validator
// Confirms every <file> referenced by a .qrc manifest exists on disk

pub mod cli;
pub mod models;
pub mod parser;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{InvalidPath, InvalidReason, ManifestEntry, ManifestError, ValidationResult};
pub use validator::{QrcValidator, ValidatedManifest, ValidatorConfig};
