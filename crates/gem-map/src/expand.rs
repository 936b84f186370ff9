//! Range expansion over ordered code catalogs.

use gem_model::{
    Code, CodeCatalog, CodeError, CodeRange, RepresentableCodes, Result, Revision, Specifier,
};

/// Enumerates the codes of a range in catalog order.
///
/// The catalog decides which codes exist: [`RepresentableCodes`] visits every
/// code the revision's format allows, while a GEM's source codes only visit
/// codes with a mapping entry.
pub struct RangeExpander<'a> {
    catalog: &'a dyn CodeCatalog,
}

impl<'a> RangeExpander<'a> {
    pub fn new(catalog: &'a dyn CodeCatalog) -> Self {
        Self { catalog }
    }

    pub fn revision(&self) -> Revision {
        self.catalog.revision()
    }

    /// Parse `"codeA-codeB"` and expand it.
    ///
    /// # Errors
    ///
    /// [`CodeError::MalformedRange`] or [`CodeError::EmptyRange`] from parsing.
    pub fn expand(&self, text: &str) -> Result<Vec<Code>> {
        let range = CodeRange::parse(self.revision(), text)?;
        self.expand_range(&range)
    }

    /// Every catalog code from the start through the end and its extensions,
    /// in order and without duplicates.
    pub fn expand_range(&self, range: &CodeRange) -> Result<Vec<Code>> {
        if range.revision() != self.revision() {
            return Err(CodeError::MalformedRange {
                range: range.to_string(),
                reason: format!("expected {} codes", self.revision()),
            });
        }
        let mut codes = Vec::new();
        let mut next = self.catalog.first_at_or_after(range.start());
        while let Some(code) = next {
            if range.is_past_end(&code) {
                break;
            }
            next = self.catalog.next_after(&code);
            codes.push(code);
        }
        Ok(codes)
    }

    /// A bare code expands to itself; a range is walked over the catalog.
    pub fn expand_specifier(&self, specifier: &Specifier) -> Result<Vec<Code>> {
        match specifier {
            Specifier::Code(code) => Ok(vec![code.clone()]),
            Specifier::Range(range) => self.expand_range(range),
        }
    }
}

/// Expand `"codeA-codeB"` over every representable code of `revision`.
///
/// Both endpoints are included, and the end also includes the codes it is a
/// prefix of: `"140-141"` ends at `14199`.
pub fn expand(revision: Revision, text: &str) -> Result<Vec<Code>> {
    let catalog = RepresentableCodes::new(revision);
    RangeExpander::new(&catalog).expand(text)
}

#[cfg(test)]
mod tests {
    use gem_model::DefinedCodes;

    use super::*;

    fn codes(revision: Revision, texts: &[&str]) -> Vec<Code> {
        texts
            .iter()
            .map(|t| Code::parse(revision, t).unwrap())
            .collect()
    }

    #[test]
    fn representable_range_includes_both_endpoints() {
        let expanded = expand(Revision::Icd9, "140-141").unwrap();
        assert_eq!(expanded.first().unwrap().as_str(), "140");
        assert_eq!(expanded.last().unwrap().as_str(), "14199");
        assert!(expanded.iter().any(|c| c.as_str() == "141"));
        // two categories of 1 + 10 + 100 codes each
        assert_eq!(expanded.len(), 222);
        assert!(expanded.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn representable_range_crosses_series() {
        let expanded = expand(Revision::Icd9, "999-V01").unwrap();
        assert_eq!(expanded.len(), 333);
        assert!(expanded.iter().any(|c| c.as_str() == "V00"));
        assert_eq!(expanded.last().unwrap().as_str(), "V0199");
    }

    #[test]
    fn e_series_has_one_detail_digit() {
        let expanded = expand(Revision::Icd9, "E000-E001").unwrap();
        assert_eq!(expanded.len(), 22);
        assert_eq!(expanded.last().unwrap().as_str(), "E0019");
    }

    #[test]
    fn defined_catalog_skips_gaps() {
        let catalog = DefinedCodes::from_codes(
            Revision::Icd10,
            codes(
                Revision::Icd10,
                &["B999", "C000", "C001", "C01", "C020", "D489", "D490"],
            ),
        );
        let expanded = RangeExpander::new(&catalog).expand("C00-D48").unwrap();
        assert_eq!(
            expanded,
            codes(Revision::Icd10, &["C000", "C001", "C01", "C020", "D489"])
        );
    }

    #[test]
    fn bare_code_expands_to_itself() {
        let catalog = DefinedCodes::new(Revision::Icd10);
        let expander = RangeExpander::new(&catalog);
        let specifier = Specifier::parse(Revision::Icd10, "I670").unwrap();
        assert_eq!(
            expander.expand_specifier(&specifier).unwrap(),
            codes(Revision::Icd10, &["I670"])
        );
    }

    #[test]
    fn range_of_other_revision_is_rejected() {
        let catalog = RepresentableCodes::new(Revision::Icd9);
        let range = CodeRange::parse(Revision::Icd10, "C00-C01").unwrap();
        let err = RangeExpander::new(&catalog).expand_range(&range).unwrap_err();
        assert!(matches!(err, CodeError::MalformedRange { .. }));
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            expand(Revision::Icd9, "140-141-142").unwrap_err(),
            CodeError::MalformedRange { .. }
        ));
        assert!(matches!(
            expand(Revision::Icd9, "141-140").unwrap_err(),
            CodeError::EmptyRange { .. }
        ));
    }
}
