//! Code ranges and list specifiers.

use std::fmt;

use crate::code::Code;
use crate::error::{CodeError, Result};
use crate::revision::Revision;

/// An inclusive range of codes within one revision.
///
/// The end is inclusive as a prefix: `C00-D48` reaches `D489` and `I60-I661`
/// reaches `I6619`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRange {
    start: Code,
    end: Code,
}

impl CodeRange {
    /// Build a range from two parsed endpoints.
    ///
    /// # Errors
    ///
    /// [`CodeError::EmptyRange`] when `end` precedes `start` without covering
    /// it, [`CodeError::MalformedRange`] when the endpoints belong to
    /// different revisions.
    pub fn new(start: Code, end: Code) -> Result<Self> {
        if start.revision() != end.revision() {
            return Err(CodeError::MalformedRange {
                range: format!("{start}-{end}"),
                reason: format!(
                    "endpoints belong to {} and {}",
                    start.revision(),
                    end.revision()
                ),
            });
        }
        if end < start && !end.covers(&start) {
            return Err(CodeError::EmptyRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range holding exactly one code.
    pub fn single(code: Code) -> Self {
        Self {
            start: code.clone(),
            end: code,
        }
    }

    /// Parse a `"codeA-codeB"` expression.
    ///
    /// # Errors
    ///
    /// [`CodeError::MalformedRange`] if the text does not split into exactly
    /// two non-empty codes of `revision`, [`CodeError::EmptyRange`] if the
    /// endpoints are reversed.
    pub fn parse(revision: Revision, text: &str) -> Result<Self> {
        let malformed = |reason: String| CodeError::MalformedRange {
            range: text.to_string(),
            reason,
        };
        let tokens: Vec<&str> = text.split('-').map(str::trim).collect();
        let [start, end] = tokens.as_slice() else {
            return Err(malformed(format!(
                "expected two codes separated by '-', found {} part(s)",
                tokens.len()
            )));
        };
        if start.is_empty() || end.is_empty() {
            return Err(malformed("missing range endpoint".to_string()));
        }
        let start = Code::parse(revision, start).map_err(|e| malformed(e.to_string()))?;
        let end = Code::parse(revision, end).map_err(|e| malformed(e.to_string()))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> &Code {
        &self.start
    }

    pub fn end(&self) -> &Code {
        &self.end
    }

    pub fn revision(&self) -> Revision {
        self.start.revision()
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `code` lies within the range.
    pub fn contains(&self, code: &Code) -> bool {
        *code >= self.start && !self.is_past_end(code)
    }

    /// Returns true once `code` orders after the end and its extensions.
    pub fn is_past_end(&self, code: &Code) -> bool {
        *code > self.end && !self.end.covers(code)
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One entry of a translation request: a bare code or a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    Code(Code),
    Range(CodeRange),
}

impl Specifier {
    /// Classify and parse a list entry.
    ///
    /// An entry is a range when it contains a hyphen anywhere but the first
    /// position; everything else must be a single code.
    pub fn parse(revision: Revision, text: &str) -> Result<Self> {
        let trimmed = text.trim();
        match trimmed.find('-') {
            Some(idx) if idx > 0 => CodeRange::parse(revision, trimmed).map(Specifier::Range),
            _ => Code::parse(revision, trimmed).map(Specifier::Code),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Specifier::Range(_))
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::Code(code) => write!(f, "{code}"),
            Specifier::Range(range) => write!(f, "{range}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icd10(text: &str) -> Code {
        Code::parse(Revision::Icd10, text).unwrap()
    }

    #[test]
    fn parses_two_endpoints() {
        let range = CodeRange::parse(Revision::Icd10, "C00-D48").unwrap();
        assert_eq!(range.start().as_str(), "C00");
        assert_eq!(range.end().as_str(), "D48");
        assert_eq!(range.to_string(), "C00-D48");
    }

    #[test]
    fn end_is_inclusive_as_prefix() {
        let range = CodeRange::parse(Revision::Icd10, "I60-I661").unwrap();
        assert!(range.contains(&icd10("I6000")));
        assert!(range.contains(&icd10("I661")));
        assert!(range.contains(&icd10("I6619")));
        assert!(!range.contains(&icd10("I662")));
        assert!(!range.contains(&icd10("I59")));
    }

    #[test]
    fn rejects_malformed_ranges() {
        for text in ["C00-", "-C00", "C00-D48-D49", "C00-D4.8", "C00--D48"] {
            let err = CodeRange::parse(Revision::Icd10, text).unwrap_err();
            assert!(
                matches!(err, CodeError::MalformedRange { .. }),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn rejects_reversed_endpoints() {
        let err = CodeRange::parse(Revision::Icd9, "141-140").unwrap_err();
        assert_eq!(
            err,
            CodeError::EmptyRange {
                start: "141".to_string(),
                end: "140".to_string()
            }
        );
    }

    #[test]
    fn coarser_end_covering_start_is_not_empty() {
        let range = CodeRange::parse(Revision::Icd9, "1405-140").unwrap();
        assert!(range.contains(&Code::parse(Revision::Icd9, "1409").unwrap()));
    }

    #[test]
    fn classifies_specifiers() {
        assert!(Specifier::parse(Revision::Icd10, "I672-I679").unwrap().is_range());
        assert!(!Specifier::parse(Revision::Icd10, "I670").unwrap().is_range());
        let err = Specifier::parse(Revision::Icd10, "-I670").unwrap_err();
        assert!(matches!(err, CodeError::InvalidCodeFormat { .. }));
    }
}
