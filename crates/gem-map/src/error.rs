//! Error types for translation operations.

use gem_model::{Code, CodeError};
use thiserror::Error;

/// Errors from translating a specifier list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// A list entry is neither a valid code nor a valid range.
    #[error("specifier #{index} '{specifier}' is not a code or range: {source}")]
    UnknownSpecifier {
        index: usize,
        specifier: String,
        #[source]
        source: CodeError,
    },

    /// A well-formed code that the table has no entry for.
    #[error("no mapping entry for {code}")]
    UnmappedCode { code: Code },
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
