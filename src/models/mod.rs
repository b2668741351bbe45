pub mod error;
pub mod validation;

pub use error::ManifestError;
pub use validation::{InvalidPath, InvalidReason, ManifestEntry, ValidationResult};
