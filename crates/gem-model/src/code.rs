//! Single classification codes: parsing, ordering and enumeration.
//!
//! Codes carry no punctuation: `140.0` is written `1400` and `C00.0` is
//! written `C000`. Stripping the decimal separator is the caller's job.
//!
//! # Order
//!
//! Codes order by series (ICD-9: numeric, then `V`, then `E`; ICD-10: the
//! leading letter), then by the integer value of the fixed-width category
//! stem, then by the remaining detail characters with a prefix sorting before
//! its extensions:
//!
//! ```text
//! 140 < 1400 < 14000 < 14009 < 1401 < 1409 < 141
//! ```
//!
//! # Enumeration
//!
//! [`Code::successor`] walks the representable codes depth first: every
//! deeper tier under a code comes before the next code at the same tier.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{CodeError, Result};
use crate::revision::{Revision, Series};

/// A classification code of one revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    revision: Revision,
    text: String,
}

impl Code {
    /// Parse `text` as a code of `revision`.
    ///
    /// Surrounding whitespace is ignored and lowercase letters are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::InvalidCodeFormat`] when the text contains
    /// characters other than letters and digits or breaks the revision's
    /// length rules.
    pub fn parse(revision: Revision, text: &str) -> Result<Self> {
        let normalized = text.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(CodeError::invalid(revision, text, "empty code"));
        }
        if let Some(bad) = normalized.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(CodeError::invalid(
                revision,
                text,
                format!("illegal character '{bad}'"),
            ));
        }
        match revision {
            Revision::Icd9 => validate_icd9(&normalized),
            Revision::Icd10 => validate_icd10(&normalized),
        }
        .map_err(|reason| CodeError::invalid(revision, text, reason))?;

        Ok(Self {
            revision,
            text: normalized,
        })
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The three-character category (`"140"`, `"V10"`, `"C00"`).
    pub fn category(&self) -> &str {
        &self.text[..self.series().category_len()]
    }

    /// Characters after the category; empty for a bare category.
    pub fn detail(&self) -> &str {
        &self.text[self.series().category_len()..]
    }

    /// Returns true if `other` is this code or one of its extensions.
    pub fn covers(&self, other: &Code) -> bool {
        self.revision == other.revision && other.text.starts_with(&self.text)
    }

    /// The next representable code after this one, or `None` after the last
    /// code of the revision.
    ///
    /// A code shorter than the revision's maximum depth descends one tier
    /// (`140` → `1400`); otherwise the last detail character is incremented,
    /// carrying leftwards (`14019` → `1402`, `14099` → `141`). Exhausting the
    /// category moves to the next category and then the next series
    /// (`99999` → `V00`, `C9999` → `D00`).
    pub fn successor(&self) -> Option<Code> {
        let series = self.series();
        let mut detail = self.detail().to_string();
        if detail.len() < series.max_detail {
            detail.push('0');
            return Some(self.with_detail(&detail));
        }
        while let Some(last) = detail.pop() {
            if let Some(next) = next_symbol(last) {
                detail.push(next);
                return Some(self.with_detail(&detail));
            }
        }
        self.next_category()
    }

    fn series(&self) -> Series {
        self.revision.series_of(&self.text)
    }

    fn stem(&self) -> &str {
        let series = self.series();
        &self.text[series.prefix_len()..series.category_len()]
    }

    fn stem_value(&self) -> u32 {
        let radix = self.revision.stem_radix();
        self.stem()
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0, |acc, digit| acc * radix + digit)
    }

    fn with_detail(&self, detail: &str) -> Code {
        Code {
            revision: self.revision,
            text: format!("{}{detail}", self.category()),
        }
    }

    fn next_category(&self) -> Option<Code> {
        let series = self.series();
        let stem = self.stem();
        let next_stem = if stem.bytes().all(|b| b.is_ascii_digit()) {
            // Digit stems count in decimal whatever the ordering radix
            stem.parse::<u32>()
                .ok()
                .map(|value| value + 1)
                // 999 + 1 no longer fits a three-digit stem
                .filter(|next| order_of_magnitude(f64::from(*next)) < series.stem_width as i32)
                .map(|next| format!("{next:0width$}", width = series.stem_width))
        } else {
            increment_stem(stem)
        };

        let (series, stem) = match next_stem {
            Some(stem) => (series, stem),
            None => {
                let next = self.revision.series_after(series)?;
                (next, "0".repeat(next.stem_width))
            }
        };
        let prefix = series.prefix.map(String::from).unwrap_or_default();
        Some(Code {
            revision: self.revision,
            text: format!("{prefix}{stem}"),
        })
    }
}

/// Order of magnitude of `x` as a power of ten (`140.0` → 2, `0.5` → -1).
///
/// Zero has no magnitude and maps to 0.
pub fn order_of_magnitude(x: f64) -> i32 {
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    x.abs().log10().floor() as i32
}

fn validate_icd9(text: &str) -> std::result::Result<(), String> {
    let series = Revision::Icd9.series_of(text);
    let digits = &text[series.prefix_len()..];
    if !text.starts_with(|c: char| c.is_ascii_digit() || c == 'V' || c == 'E') {
        return Err("must start with a digit, V or E".to_string());
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("only digits may follow the series letter".to_string());
    }
    check_length(text, series)
}

fn validate_icd10(text: &str) -> std::result::Result<(), String> {
    let mut chars = text.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
        return Err("must start with a letter".to_string());
    }
    if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return Err("second character must be a digit".to_string());
    }
    check_length(text, Revision::Icd10.series_of(text))
}

fn check_length(text: &str, series: Series) -> std::result::Result<(), String> {
    let len = text.len();
    if len < series.min_len() || len > series.max_len() {
        return Err(format!(
            "expected {} to {} characters, found {len}",
            series.min_len(),
            series.max_len()
        ));
    }
    Ok(())
}

/// Next detail symbol: digits run `0..9`, letters run `A..Z`.
fn next_symbol(c: char) -> Option<char> {
    match c {
        '0'..='8' | 'A'..='Y' => char::from_u32(c as u32 + 1),
        _ => None,
    }
}

/// Increment an alphanumeric stem such as `7A`, keeping its width.
fn increment_stem(stem: &str) -> Option<String> {
    let mut chars: Vec<char> = stem.chars().collect();
    for idx in (0..chars.len()).rev() {
        if let Some(next) = next_symbol(chars[idx]) {
            chars[idx] = next;
            return Some(chars.into_iter().collect());
        }
        chars[idx] = '0';
    }
    None
}

impl Ord for Code {
    fn cmp(&self, other: &Self) -> Ordering {
        self.revision
            .cmp(&other.revision)
            .then_with(|| self.series().rank.cmp(&other.series().rank))
            .then_with(|| self.stem_value().cmp(&other.stem_value()))
            .then_with(|| self.detail().cmp(other.detail()))
    }
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
