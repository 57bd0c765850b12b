//! Error types shared by extraction, scanning, output and layout configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the PHPCity library.
///
/// Only `InvalidInput`, `IoFailure` and `Serialization` are fatal for a run.
/// `ParseFailure` is produced per file and the scanner skips that file.
#[derive(Debug, Error)]
pub enum CityError {
    /// Project directory missing or not accessible.
    #[error("The directory '{}' could not be found or accessed", path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// One file's syntax tree could not be produced.
    #[error("Failed to parse '{file}' (line {line}): {reason}")]
    ParseFailure {
        file: String,
        line: u32,
        reason: String,
    },

    /// Reading a source file or writing the output failed.
    #[error("Failed to access '{}': {source}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No tree-sitter grammar for the requested language.
    #[error(
        "Unsupported language: '{0}'. Supported languages: {supported}",
        supported = crate::language::supported_languages().join(", ")
    )]
    UnsupportedLanguage(String),

    /// Layout tuning values that would produce degenerate geometry.
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

impl CityError {
    pub fn invalid_input(path: impl Into<PathBuf>, source: Option<std::io::Error>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    pub fn parse(file: impl Into<String>, line: u32, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            file: file.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Whether the scanner may skip the offending file and carry on.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::ParseFailure { .. } | Self::IoFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, CityError>;
