use std::path::PathBuf;

/// Fatal conditions that end a run before any report is printed
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("QRC file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to parse {}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("An unexpected error occurred while processing {}", path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Path of the manifest the error concerns
    pub fn path(&self) -> &PathBuf {
        match self {
            ManifestError::NotFound { path }
            | ManifestError::Malformed { path, .. }
            | ManifestError::Unexpected { path, .. } => path,
        }
    }

    /// Second line shown under the error headline
    pub fn detail(&self) -> String {
        match self {
            ManifestError::NotFound { .. } => {
                "Please run from the directory containing toonz.qrc, or pass --manifest".to_string()
            }
            ManifestError::Malformed { message, .. } => format!("XML Parse Error: {}", message),
            ManifestError::Unexpected { source, .. } => format!("Error: {}", source),
        }
    }
}
