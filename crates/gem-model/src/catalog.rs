//! Ordered code spaces that ranges are enumerated over.

use std::collections::BTreeSet;
use std::ops::Bound;

use crate::code::Code;
use crate::revision::Revision;

/// An ordered set of codes of one revision.
///
/// Range expansion starts at [`first_at_or_after`](Self::first_at_or_after)
/// and steps with [`next_after`](Self::next_after), so a catalog decides which
/// codes exist between two endpoints.
pub trait CodeCatalog {
    fn revision(&self) -> Revision;

    /// The first code in the catalog ordering at or after `code`.
    fn first_at_or_after(&self, code: &Code) -> Option<Code>;

    /// The first code in the catalog ordering strictly after `code`.
    fn next_after(&self, code: &Code) -> Option<Code>;
}

/// Every representable code of a revision, walked with [`Code::successor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentableCodes {
    revision: Revision,
}

impl RepresentableCodes {
    pub fn new(revision: Revision) -> Self {
        Self { revision }
    }
}

impl CodeCatalog for RepresentableCodes {
    fn revision(&self) -> Revision {
        self.revision
    }

    fn first_at_or_after(&self, code: &Code) -> Option<Code> {
        Some(code.clone())
    }

    fn next_after(&self, code: &Code) -> Option<Code> {
        code.successor()
    }
}

/// The codes a revision actually defines, e.g. the source codes of a GEM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedCodes {
    revision: Revision,
    codes: BTreeSet<Code>,
}

impl DefinedCodes {
    pub fn new(revision: Revision) -> Self {
        Self {
            revision,
            codes: BTreeSet::new(),
        }
    }

    /// Collect the codes of `revision` from `codes`; other revisions are skipped.
    pub fn from_codes<I>(revision: Revision, codes: I) -> Self
    where
        I: IntoIterator<Item = Code>,
    {
        let mut defined = Self::new(revision);
        for code in codes {
            defined.insert(code);
        }
        defined
    }

    /// Add a code; returns false if it was present or of another revision.
    pub fn insert(&mut self, code: Code) -> bool {
        code.revision() == self.revision && self.codes.insert(code)
    }

    pub fn contains(&self, code: &Code) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Code> {
        self.codes.iter()
    }
}

impl CodeCatalog for DefinedCodes {
    fn revision(&self) -> Revision {
        self.revision
    }

    fn first_at_or_after(&self, code: &Code) -> Option<Code> {
        self.codes
            .range((Bound::Included(code), Bound::Unbounded))
            .next()
            .cloned()
    }

    fn next_after(&self, code: &Code) -> Option<Code> {
        self.codes
            .range((Bound::Excluded(code), Bound::Unbounded))
            .next()
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icd9(text: &str) -> Code {
        Code::parse(Revision::Icd9, text).unwrap()
    }

    #[test]
    fn defined_codes_skip_gaps() {
        let defined = DefinedCodes::from_codes(
            Revision::Icd9,
            ["1409", "1400", "141", "1401"].map(icd9),
        );
        assert_eq!(defined.len(), 4);
        assert_eq!(defined.first_at_or_after(&icd9("140")), Some(icd9("1400")));
        assert_eq!(defined.next_after(&icd9("1401")), Some(icd9("1409")));
        assert_eq!(defined.next_after(&icd9("1409")), Some(icd9("141")));
        assert_eq!(defined.next_after(&icd9("141")), None);
    }

    #[test]
    fn defined_codes_ignore_other_revisions() {
        let mut defined = DefinedCodes::new(Revision::Icd9);
        assert!(!defined.insert(Code::parse(Revision::Icd10, "C000").unwrap()));
        assert!(defined.insert(icd9("1400")));
        assert!(!defined.insert(icd9("1400")));
        assert!(defined.contains(&icd9("1400")));
    }

    #[test]
    fn representable_codes_follow_successor() {
        let all = RepresentableCodes::new(Revision::Icd9);
        assert_eq!(all.first_at_or_after(&icd9("140")), Some(icd9("140")));
        assert_eq!(all.next_after(&icd9("14099")), Some(icd9("141")));
    }
}
