//! Error types for catalog parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a string catalog.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("File must have .xcstrings extension: {}", .0.display())]
    InvalidExtension(PathBuf),
    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Short machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::FileNotFound(_) => "file_not_found",
            ParseError::InvalidExtension(_) => "invalid_extension",
            ParseError::InvalidFormat(_) => "invalid_format",
            ParseError::Io { .. } => "io",
        }
    }
}
