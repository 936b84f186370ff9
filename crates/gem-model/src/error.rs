use thiserror::Error;

use crate::revision::Revision;

/// Errors raised while parsing codes, ranges and specifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// The text is not a well-formed code of the revision.
    #[error("invalid {revision} code '{text}': {reason}")]
    InvalidCodeFormat {
        revision: Revision,
        text: String,
        reason: String,
    },

    /// The range expression does not split into two valid codes.
    #[error("malformed range '{range}': {reason}")]
    MalformedRange { range: String, reason: String },

    /// The range end precedes its start.
    #[error("empty range: end {end} precedes start {start}")]
    EmptyRange { start: String, end: String },
}

impl CodeError {
    pub(crate) fn invalid(revision: Revision, text: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCodeFormat {
            revision,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeError>;
