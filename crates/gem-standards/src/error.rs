//! Error types for GEM loading operations.

use std::path::PathBuf;

use gem_model::{CodeError, Direction, Revision};
use thiserror::Error;

/// Errors that can occur when loading General Equivalence Mappings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// GEM data directory not found.
    #[error("GEM data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// GEM file not found.
    #[error("GEM file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a GEM file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to split a GEM file into rows.
    #[error("Failed to read GEM rows from {file}: {source}")]
    CsvRead {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Row does not have the `SOURCE TARGET FLAGS` shape.
    #[error("Invalid row at {file}:{line}: {message}")]
    InvalidRow {
        file: String,
        line: u64,
        message: String,
    },

    /// Source or target code fails to parse.
    #[error("Invalid code at {file}:{line}: {source}")]
    InvalidCode {
        file: String,
        line: u64,
        #[source]
        source: CodeError,
    },

    /// Flag word is not five digits with 0/1 qualifier flags.
    #[error("Invalid flags '{flags}' at {file}:{line} (expected five digits)")]
    InvalidFlags {
        file: String,
        line: u64,
        flags: String,
    },

    /// Table of the wrong direction passed where a specific one is required.
    #[error("Expected a {expected} table, found {found}")]
    DirectionMismatch {
        expected: Direction,
        found: Direction,
    },

    /// Mapping entry whose source code belongs to the other revision.
    #[error("Source code {code} is not an {expected} code")]
    RevisionMismatch { code: String, expected: Revision },

    /// The process-wide registry was installed twice.
    #[error("A GEM registry is already installed")]
    AlreadyInstalled,
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for GEM loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
