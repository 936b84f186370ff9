//! Applied-mapping translation of code and range specifier lists.
//!
//! Each specifier is expanded to source codes, each source code is looked up
//! in the equivalence table, and the selected targets are merged in
//! first-seen order without duplicates.
//!
//! Target selection per entry:
//! - a no-map entry selects nothing
//! - every non-combination target is selected
//! - of a combination, the first listed member of each
//!   `(scenario, choice list)` slot is selected
//!
//! The approximate flag is reported but never filters.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use gem_model::{Code, CodeCatalog, EquivalenceTable, MappingEntry, Specifier};

use crate::error::{Result, TranslateError};
use crate::expand::RangeExpander;

/// Translates specifier lists through one direction of an equivalence table.
pub struct Translator<'a> {
    table: &'a dyn EquivalenceTable,
    catalog: &'a dyn CodeCatalog,
}

impl<'a> Translator<'a> {
    /// Ranges are expanded over the table's own source codes.
    pub fn new(table: &'a dyn EquivalenceTable) -> Self {
        Self {
            table,
            catalog: table.source_codes(),
        }
    }

    /// Expand ranges over `catalog` instead of the table's source codes.
    ///
    /// Expanded codes the table has no entry for fail with
    /// [`TranslateError::UnmappedCode`].
    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a dyn CodeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Translate `specifiers` into target codes.
    ///
    /// # Errors
    ///
    /// Stops at the first specifier that does not parse
    /// ([`TranslateError::UnknownSpecifier`]) or the first source code
    /// without an entry ([`TranslateError::UnmappedCode`]).
    pub fn translate<S: AsRef<str>>(&self, specifiers: &[S]) -> Result<Vec<Code>> {
        self.translate_detailed(specifiers).map(|t| t.targets)
    }

    /// Translate `specifiers`, keeping the outcome of every source code.
    pub fn translate_detailed<S: AsRef<str>>(&self, specifiers: &[S]) -> Result<Translation> {
        let direction = self.table.direction();
        let span = debug_span!(
            "translate",
            direction = %direction,
            specifier_count = specifiers.len()
        );
        let _guard = span.enter();

        let expander = RangeExpander::new(self.catalog);
        let mut seen = BTreeSet::new();
        let mut translation = Translation::default();

        for (index, specifier) in specifiers.iter().enumerate() {
            let text = specifier.as_ref();
            let unknown = |source| TranslateError::UnknownSpecifier {
                index,
                specifier: text.to_string(),
                source,
            };
            let parsed = Specifier::parse(direction.source(), text).map_err(unknown)?;
            let sources = expander.expand_specifier(&parsed).map_err(unknown)?;
            debug!(specifier = %parsed, source_count = sources.len(), "Expanded specifier");

            for source in sources {
                let entry = self
                    .table
                    .lookup(&source)
                    .ok_or_else(|| TranslateError::UnmappedCode {
                        code: source.clone(),
                    })?;
                let targets = select_targets(entry);
                for target in &targets {
                    if seen.insert(target.clone()) {
                        translation.targets.push(target.clone());
                    }
                }
                translation.sources.push(SourceOutcome {
                    source,
                    targets,
                    approximate: entry.is_approximate(),
                    no_map: entry.is_no_map(),
                });
            }
        }

        debug!(
            source_count = translation.sources.len(),
            target_count = translation.targets.len(),
            "Translated specifiers"
        );
        Ok(translation)
    }
}

/// Translate `specifiers` through `table`, expanding ranges over its source
/// codes.
pub fn translate<S: AsRef<str>>(
    table: &dyn EquivalenceTable,
    specifiers: &[S],
) -> Result<Vec<Code>> {
    Translator::new(table).translate(specifiers)
}

/// Result of a detailed translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Selected targets, deduplicated in first-seen order.
    pub targets: Vec<Code>,
    /// One outcome per expanded source code, in expansion order.
    pub sources: Vec<SourceOutcome>,
}

impl Translation {
    /// Number of source codes whose entry is flagged approximate.
    pub fn approximate_count(&self) -> usize {
        self.sources.iter().filter(|s| s.approximate).count()
    }

    /// Number of source codes with no equivalent.
    pub fn no_map_count(&self) -> usize {
        self.sources.iter().filter(|s| s.no_map).count()
    }
}

/// What one source code contributed to a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub source: Code,
    /// Targets selected from this entry, before cross-source deduplication.
    pub targets: Vec<Code>,
    pub approximate: bool,
    pub no_map: bool,
}

fn select_targets(entry: &MappingEntry) -> Vec<Code> {
    if entry.is_no_map() {
        return Vec::new();
    }
    let mut filled = BTreeSet::new();
    entry
        .targets
        .iter()
        .filter(|target| match target.choice_list {
            Some(slot) if target.combination => filled.insert(slot),
            _ => true,
        })
        .filter_map(|target| target.code.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use gem_model::{Revision, TargetCode};

    use super::*;

    fn icd9(text: &str) -> Code {
        Code::parse(Revision::Icd9, text).unwrap()
    }

    fn icd10(text: &str) -> Code {
        Code::parse(Revision::Icd10, text).unwrap()
    }

    fn entry(source: &str, targets: Vec<TargetCode>) -> MappingEntry {
        MappingEntry {
            source: icd9(source),
            targets,
        }
    }

    #[test]
    fn selects_first_member_of_each_slot() {
        let entry = entry(
            "1983",
            vec![
                TargetCode::mapped(icd10("C7931")).in_combination(1, 1),
                TargetCode::mapped(icd10("C7932")).in_combination(1, 1),
                TargetCode::mapped(icd10("C7949")).in_combination(1, 2),
                TargetCode::mapped(icd10("C7951")).in_combination(2, 1),
            ],
        );
        assert_eq!(
            select_targets(&entry),
            [icd10("C7931"), icd10("C7949"), icd10("C7951")]
        );
    }

    #[test]
    fn selects_every_plain_target() {
        let entry = entry(
            "1400",
            vec![
                TargetCode::mapped(icd10("C000")),
                TargetCode::mapped(icd10("C001")).with_approximate(true),
            ],
        );
        assert_eq!(select_targets(&entry), [icd10("C000"), icd10("C001")]);
    }

    #[test]
    fn no_map_selects_nothing() {
        let entry = entry("7999", vec![TargetCode::no_map()]);
        assert!(select_targets(&entry).is_empty());
    }

    #[test]
    fn outcome_counts() {
        let translation = Translation {
            targets: vec![icd10("C000")],
            sources: vec![
                SourceOutcome {
                    source: icd9("1400"),
                    targets: vec![icd10("C000")],
                    approximate: false,
                    no_map: false,
                },
                SourceOutcome {
                    source: icd9("7999"),
                    targets: Vec::new(),
                    approximate: true,
                    no_map: true,
                },
            ],
        };
        assert_eq!(translation.approximate_count(), 1);
        assert_eq!(translation.no_map_count(), 1);
    }
}
