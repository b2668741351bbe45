pub mod manifest;
pub mod path;

pub use manifest::{QrcValidator, ValidatedManifest, ValidatorConfig, DEFAULT_QRC_FILE};
pub use path::{
    classify_extension, normalize_entry, validate_entries, validate_entry, EntryCheck,
    MissingFileDiagnostics, PassOutcome,
};
