//! Property-based tests for the code order and successor.

use std::cmp::Ordering;

use proptest::prelude::*;

use gem_model::{Code, Revision};

/// Strategy for ICD-9-CM codes across the numeric, V and E series.
fn icd9_code() -> impl Strategy<Value = Code> {
    prop_oneof![
        "[0-9]{3,5}",
        "V[0-9]{2,4}",
        "E[0-9]{3,4}",
    ]
    .prop_map(|text| Code::parse(Revision::Icd9, &text).unwrap())
}

/// Strategy for ICD-10-CM codes, including alphanumeric detail characters.
fn icd10_code() -> impl Strategy<Value = Code> {
    "[A-Z][0-9][0-9A-Z][0-9A-Z]{0,4}".prop_map(|text| Code::parse(Revision::Icd10, &text).unwrap())
}

fn any_code() -> impl Strategy<Value = Code> {
    prop_oneof![icd9_code(), icd10_code()]
}

proptest! {
    /// Property: the successor always orders strictly after its code.
    #[test]
    fn prop_successor_is_greater(code in any_code()) {
        if let Some(next) = code.successor() {
            prop_assert!(next > code, "{} -> {}", code, next);
            prop_assert_eq!(next.revision(), code.revision());
        }
    }

    /// Property: comparison is antisymmetric and equality matches the text.
    #[test]
    fn prop_compare_is_antisymmetric(a in any_code(), b in any_code()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
    }

    /// Property: comparison is transitive.
    #[test]
    fn prop_compare_is_transitive(a in icd10_code(), b in icd10_code(), c in icd10_code()) {
        let mut sorted = [a, b, c];
        sorted.sort();
        prop_assert!(sorted[0] <= sorted[1]);
        prop_assert!(sorted[1] <= sorted[2]);
        prop_assert!(sorted[0] <= sorted[2]);
    }

    /// Property: fixed-width categories make the magnitude-aligned order agree
    /// with plain string order for numeric ICD-9 codes.
    #[test]
    fn prop_numeric_order_matches_text(a in "[0-9]{3,5}", b in "[0-9]{3,5}") {
        let left = Code::parse(Revision::Icd9, &a).unwrap();
        let right = Code::parse(Revision::Icd9, &b).unwrap();
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
    }

    /// Property: leaving an ICD-10 category moves to the next category number.
    #[test]
    fn prop_icd10_successor_advances_one_category(letter in "[A-Z]", stem in 0u32..99) {
        let code = Code::parse(Revision::Icd10, &format!("{letter}{stem:02}9999")).unwrap();
        let next = code.successor().unwrap();
        prop_assert_eq!(next.category(), format!("{letter}{:02}", stem + 1));
        prop_assert!(next.detail().is_empty());
    }

    /// Property: leaving a numeric ICD-9 category moves to the next category number.
    #[test]
    fn prop_icd9_successor_advances_one_category(stem in 0u32..999) {
        let code = Code::parse(Revision::Icd9, &format!("{stem:03}99")).unwrap();
        let next = code.successor().unwrap();
        prop_assert_eq!(next.as_str(), format!("{:03}", stem + 1));
    }

    /// Property: a code covers itself and every code it is a prefix of.
    #[test]
    fn prop_code_covers_its_successor_tier(code in icd9_code()) {
        prop_assert!(code.covers(&code));
        if let Some(next) = code.successor()
            && next.as_str().len() > code.as_str().len()
        {
            prop_assert!(code.covers(&next));
        }
    }
}

#[test]
fn compare_uses_revision_order() {
    assert_eq!(Revision::Icd9.compare("140", "1400").unwrap(), Ordering::Less);
    assert_eq!(Revision::Icd9.compare("1401", "1401").unwrap(), Ordering::Equal);
    assert_eq!(Revision::Icd9.compare("141", "1409").unwrap(), Ordering::Greater);
    assert_eq!(Revision::Icd10.compare("C7A", "C79").unwrap(), Ordering::Greater);
    assert!(Revision::Icd10.compare("C7A", "140").is_err());
}

#[test]
fn successor_walk_visits_every_tier() {
    let mut code = Code::parse(Revision::Icd9, "140").unwrap();
    let end = Code::parse(Revision::Icd9, "141").unwrap();
    let mut visited = 1;
    while let Some(next) = code.successor() {
        code = next;
        visited += 1;
        if code == end {
            break;
        }
    }
    // 140, ten 4-digit codes with ten 5-digit codes each, then 141
    assert_eq!(visited, 1 + 10 + 100 + 1);
}
