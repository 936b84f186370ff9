//! In-memory General Equivalence Mapping table.

use std::collections::BTreeMap;
use std::ops::Bound;

use gem_model::{
    Code, CodeCatalog, DefinedCodes, Direction, EquivalenceTable, MappingEntry, Revision,
    TargetCode,
};

use crate::error::{Result, StandardsError};

/// One direction of a GEM, keyed by source code in code order.
///
/// The table is built once by a loader and only read afterwards; it is
/// `Send + Sync` and can be shared across threads by reference.
#[derive(Debug, Clone)]
pub struct Gem {
    direction: Direction,
    entries: BTreeMap<Code, MappingEntry>,
    /// Source file name, when loaded from disk.
    pub source: Option<String>,
}

impl Gem {
    /// Create an empty table.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            entries: BTreeMap::new(),
            source: None,
        }
    }

    /// Build a table from complete mapping entries.
    ///
    /// Entries sharing a source code are merged in order.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::RevisionMismatch`] if a source code does not
    /// belong to the direction's source revision.
    pub fn from_entries<I>(direction: Direction, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = MappingEntry>,
    {
        let mut gem = Self::new(direction);
        for entry in entries {
            let MappingEntry { source, targets } = entry;
            for target in targets {
                gem.push_target(source.clone(), target)?;
            }
        }
        Ok(gem)
    }

    /// Append one target row to the entry of `source`.
    pub fn push_target(&mut self, source: Code, target: TargetCode) -> Result<()> {
        let expected = self.direction.source();
        if source.revision() != expected {
            return Err(StandardsError::RevisionMismatch {
                code: source.to_string(),
                expected,
            });
        }
        self.entries
            .entry(source)
            .or_insert_with_key(|code| MappingEntry::new(code.clone()))
            .push(target);
        Ok(())
    }

    pub fn get(&self, code: &Code) -> Option<&MappingEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source codes in code order.
    pub fn codes(&self) -> impl Iterator<Item = &Code> {
        self.entries.keys()
    }

    /// Entries in source-code order.
    pub fn entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.values()
    }

    /// Number of target rows across all entries.
    pub fn row_count(&self) -> usize {
        self.entries.values().map(|e| e.targets.len()).sum()
    }

    /// Every target code the table mentions, as a catalog of the target
    /// revision.
    pub fn target_codes(&self) -> DefinedCodes {
        DefinedCodes::from_codes(
            self.direction.target(),
            self.entries
                .values()
                .flat_map(MappingEntry::target_codes)
                .cloned(),
        )
    }
}

impl CodeCatalog for Gem {
    fn revision(&self) -> Revision {
        self.direction.source()
    }

    fn first_at_or_after(&self, code: &Code) -> Option<Code> {
        self.entries
            .range((Bound::Included(code), Bound::Unbounded))
            .next()
            .map(|(code, _)| code.clone())
    }

    fn next_after(&self, code: &Code) -> Option<Code> {
        self.entries
            .range((Bound::Excluded(code), Bound::Unbounded))
            .next()
            .map(|(code, _)| code.clone())
    }
}

impl EquivalenceTable for Gem {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn lookup(&self, code: &Code) -> Option<&MappingEntry> {
        self.entries.get(code)
    }

    fn source_codes(&self) -> &dyn CodeCatalog {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icd9(text: &str) -> Code {
        Code::parse(Revision::Icd9, text).unwrap()
    }

    fn icd10(text: &str) -> Code {
        Code::parse(Revision::Icd10, text).unwrap()
    }

    #[test]
    fn merges_rows_by_source() {
        let mut gem = Gem::new(Direction::I9ToI10);
        gem.push_target(icd9("1983"), TargetCode::mapped(icd10("C7931")).in_combination(1, 1))
            .unwrap();
        gem.push_target(icd9("1400"), TargetCode::mapped(icd10("C000")))
            .unwrap();
        gem.push_target(icd9("1983"), TargetCode::mapped(icd10("C7949")).in_combination(1, 2))
            .unwrap();

        assert_eq!(gem.len(), 2);
        assert_eq!(gem.row_count(), 3);
        assert_eq!(gem.get(&icd9("1983")).unwrap().targets.len(), 2);
        let sources: Vec<&str> = gem.entries().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, ["1400", "1983"]);
    }

    #[test]
    fn rejects_sources_of_the_target_revision() {
        let mut gem = Gem::new(Direction::I9ToI10);
        let err = gem
            .push_target(icd10("C000"), TargetCode::mapped(icd10("C000")))
            .unwrap_err();
        assert!(matches!(err, StandardsError::RevisionMismatch { .. }));
    }

    #[test]
    fn catalog_walks_source_codes() {
        let gem = Gem::from_entries(
            Direction::I10ToI9,
            ["C000", "C001", "C01"].map(|code| MappingEntry {
                source: icd10(code),
                targets: vec![TargetCode::mapped(icd9("1400"))],
            }),
        )
        .unwrap();
        let catalog = gem.source_codes();
        assert_eq!(catalog.revision(), Revision::Icd10);
        assert_eq!(catalog.first_at_or_after(&icd10("C00")), Some(icd10("C000")));
        assert_eq!(catalog.next_after(&icd10("C001")), Some(icd10("C01")));
        assert_eq!(gem.target_codes().len(), 1);
    }
}
