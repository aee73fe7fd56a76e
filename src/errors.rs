//! Typed error definitions for ai_rename.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenamerError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source path is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Suggester unavailable: {0}")]
    SuggesterUnavailable(String),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl RenamerError {
    /// Stable short code for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            RenamerError::SourceNotFound(_) => "source_not_found",
            RenamerError::NotAFile(_) => "not_a_file",
            RenamerError::PermissionDenied { .. } => "permission_denied",
            RenamerError::DestinationExists(_) => "destination_exists",
            RenamerError::SuggesterUnavailable(_) => "suggester_unavailable",
            RenamerError::Interrupted => "interrupted",
        }
    }
}
