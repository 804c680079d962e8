//! Error types for map editing, validation and container I/O.

use std::path::PathBuf;

use thiserror::Error;

use crate::container::FormatError;
use crate::document::ValidationIssue;

/// Result type alias using [`MapError`].
pub type Result<T> = std::result::Result<T, MapError>;

/// Top-level error type for everything the core can fail at.
#[derive(Debug, Error)]
pub enum MapError {
    /// The document failed pre-save validation. Nothing was written.
    #[error("Map failed validation: {}", join_issues(.issues))]
    Validation {
        /// Every rule the document violated.
        issues: Vec<ValidationIssue>,
    },

    /// The container bytes are malformed.
    #[error("Invalid map container: {0}")]
    Format(#[from] FormatError),

    /// Reading or writing a file failed.
    #[error("Failed to access '{path}': {source}")]
    Io {
        /// Path that was being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The tile catalog could not be parsed.
    #[error("Failed to parse tile catalog '{path}': {message}")]
    Catalog {
        /// Path to the catalog file.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

impl MapError {
    /// Build an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Validation issues, if this is a validation failure.
    #[must_use]
    pub fn validation_issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::Validation { issues } => Some(issues),
            _ => None,
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
