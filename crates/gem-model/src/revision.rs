//! Classification revisions and mapping directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::error::Result;

/// One of the two classification code sets being translated between.
///
/// - **ICD-9** (old): ICD-9-CM diagnosis codes, numeric plus the `V` and `E`
///   supplementary classifications
/// - **ICD-10** (new): ICD-10-CM diagnosis codes, a letter followed by a digit
///   and up to five further characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Revision {
    #[serde(rename = "ICD-9")]
    Icd9,
    #[serde(rename = "ICD-10")]
    Icd10,
}

impl Revision {
    /// Returns the revision name as used on the command line and in reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Revision::Icd9 => "ICD-9",
            Revision::Icd10 => "ICD-10",
        }
    }

    /// Returns the clinical-modification name of the revision.
    pub const fn full_name(&self) -> &'static str {
        match self {
            Revision::Icd9 => "ICD-9-CM",
            Revision::Icd10 => "ICD-10-CM",
        }
    }

    pub const fn all() -> &'static [Revision] {
        &[Revision::Icd9, Revision::Icd10]
    }

    /// Parse `text` as a code of this revision.
    pub fn parse_code(self, text: &str) -> Result<Code> {
        Code::parse(self, text)
    }

    /// Compare two code strings under this revision's total order.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use gem_model::Revision;
    ///
    /// assert_eq!(Revision::Icd9.compare("140", "1400").unwrap(), Ordering::Less);
    /// assert_eq!(Revision::Icd9.compare("1409", "141").unwrap(), Ordering::Less);
    /// ```
    pub fn compare(self, a: &str, b: &str) -> Result<Ordering> {
        Ok(Code::parse(self, a)?.cmp(&Code::parse(self, b)?))
    }

    /// Radix of the category stem's integer value.
    pub(crate) const fn stem_radix(self) -> u32 {
        match self {
            Revision::Icd9 => 10,
            Revision::Icd10 => 36,
        }
    }

    /// Series of an already validated code.
    pub(crate) fn series_of(self, text: &str) -> Series {
        let first = text.chars().next().unwrap_or('0');
        match self {
            Revision::Icd9 => match first {
                'V' => ICD9_V,
                'E' => ICD9_E,
                _ => ICD9_NUMERIC,
            },
            Revision::Icd10 => icd10_series(first),
        }
    }

    /// Series following `series` in this revision's order.
    pub(crate) fn series_after(self, series: Series) -> Option<Series> {
        match self {
            Revision::Icd9 => match series.prefix {
                None => Some(ICD9_V),
                Some('V') => Some(ICD9_E),
                _ => None,
            },
            Revision::Icd10 => match series.prefix {
                Some(letter) if letter < 'Z' => char::from_u32(letter as u32 + 1).map(icd10_series),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Revision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match normalized.trim_end_matches("CM") {
            "ICD9" | "I9" | "9" => Ok(Revision::Icd9),
            "ICD10" | "I10" | "10" => Ok(Revision::Icd10),
            _ => Err(format!("Unknown revision: {s}")),
        }
    }
}

/// Direction of an equivalence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Old to new: ICD-9-CM source codes, ICD-10-CM targets.
    #[serde(rename = "I9_I10")]
    I9ToI10,
    /// New to old: ICD-10-CM source codes, ICD-9-CM targets.
    #[serde(rename = "I10_I9")]
    I10ToI9,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::I9ToI10 => "I9_I10",
            Direction::I10ToI9 => "I10_I9",
        }
    }

    pub const fn source(&self) -> Revision {
        match self {
            Direction::I9ToI10 => Revision::Icd9,
            Direction::I10ToI9 => Revision::Icd10,
        }
    }

    pub const fn target(&self) -> Revision {
        match self {
            Direction::I9ToI10 => Revision::Icd10,
            Direction::I10ToI9 => Revision::Icd9,
        }
    }

    pub const fn reverse(&self) -> Direction {
        match self {
            Direction::I9ToI10 => Direction::I10ToI9,
            Direction::I10ToI9 => Direction::I9ToI10,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "I9_I10" | "ICD9_ICD10" | "ICD9_TO_ICD10" => Ok(Direction::I9ToI10),
            "I10_I9" | "ICD10_ICD9" | "ICD10_TO_ICD9" => Ok(Direction::I10ToI9),
            _ => Err(format!("Unknown direction: {s} (expected I9_I10 or I10_I9)")),
        }
    }
}

/// Layout of one family of codes within a revision.
///
/// A code is `prefix? stem detail`: the stem is the fixed-width category
/// number and the detail holds up to `max_detail` further characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Series {
    pub prefix: Option<char>,
    pub rank: u8,
    pub stem_width: usize,
    pub max_detail: usize,
}

impl Series {
    pub fn prefix_len(&self) -> usize {
        usize::from(self.prefix.is_some())
    }

    pub fn category_len(&self) -> usize {
        self.prefix_len() + self.stem_width
    }

    pub fn min_len(&self) -> usize {
        self.category_len()
    }

    pub fn max_len(&self) -> usize {
        self.category_len() + self.max_detail
    }
}

const ICD9_NUMERIC: Series = Series {
    prefix: None,
    rank: 0,
    stem_width: 3,
    max_detail: 2,
};

const ICD9_V: Series = Series {
    prefix: Some('V'),
    rank: 1,
    stem_width: 2,
    max_detail: 2,
};

const ICD9_E: Series = Series {
    prefix: Some('E'),
    rank: 2,
    stem_width: 3,
    max_detail: 1,
};

fn icd10_series(letter: char) -> Series {
    Series {
        prefix: Some(letter),
        rank: (letter as u8).saturating_sub(b'A'),
        stem_width: 2,
        max_detail: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_parses_common_spellings() {
        assert_eq!("ICD-9".parse::<Revision>().unwrap(), Revision::Icd9);
        assert_eq!("icd9-cm".parse::<Revision>().unwrap(), Revision::Icd9);
        assert_eq!("I10".parse::<Revision>().unwrap(), Revision::Icd10);
        assert_eq!("ICD-10-CM".parse::<Revision>().unwrap(), Revision::Icd10);
        assert!("ICD-11".parse::<Revision>().is_err());
    }

    #[test]
    fn direction_round_trips_names() {
        for direction in [Direction::I9ToI10, Direction::I10ToI9] {
            assert_eq!(direction.as_str().parse::<Direction>().unwrap(), direction);
            assert_eq!(direction.reverse().reverse(), direction);
            assert_eq!(direction.source(), direction.reverse().target());
        }
        assert_eq!("i10-i9".parse::<Direction>().unwrap(), Direction::I10ToI9);
    }

    #[test]
    fn series_follow_tabular_order() {
        let numeric = Revision::Icd9.series_of("140");
        let v = Revision::Icd9.series_after(numeric).unwrap();
        let e = Revision::Icd9.series_after(v).unwrap();
        assert_eq!(v.prefix, Some('V'));
        assert_eq!(e.prefix, Some('E'));
        assert!(Revision::Icd9.series_after(e).is_none());

        let z = Revision::Icd10.series_of("Z99");
        assert!(Revision::Icd10.series_after(z).is_none());
        let c = Revision::Icd10.series_of("C00");
        assert_eq!(Revision::Icd10.series_after(c).unwrap().prefix, Some('D'));
    }
}
