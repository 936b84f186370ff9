//! CDC General Equivalence Mapping text loading.
//!
//! GEM files are published by CMS/CDC as plain text, one mapping row per
//! line:
//!
//! ```text
//! C000  1400  00000
//! C002  1409  10000
//! 1983  C7931 10111
//! 7999  NoDx  11000
//! ```
//!
//! Columns are the source code, the target code (or a `NoDx` / `NoPCS`
//! placeholder on no-map rows) and a five-digit flag word: approximate,
//! no map, combination, scenario, choice list.

use std::path::Path;

use tracing::{info, warn};

use gem_model::{Code, Direction, TargetCode};

use crate::error::{Result, StandardsError};
use crate::gem::Gem;

/// Maximum number of divergent-row warnings logged per file.
const MAX_ROW_WARNINGS: u32 = 5;

/// Load one GEM direction from a CDC text file.
///
/// # Errors
///
/// Returns [`StandardsError::FileNotFound`] if the file does not exist, and a
/// row-level error for the first malformed row.
pub fn load_gem(path: &Path, direction: Direction) -> Result<Gem> {
    if !path.exists() {
        return Err(StandardsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("GEM");
    load_gem_from_str(&content, direction, filename)
}

/// Load one GEM direction from CDC text content.
///
/// `filename` is only used for error messages and provenance.
pub fn load_gem_from_str(content: &str, direction: Direction, filename: &str) -> Result<Gem> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .quoting(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut gem = Gem::new(direction);
    gem.source = Some(filename.to_string());
    let mut divergent_rows = 0u32;

    for result in reader.records() {
        let record = result.map_err(|source| StandardsError::CsvRead {
            file: filename.to_string(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let fields: Vec<&str> = record.iter().flat_map(str::split_whitespace).collect();
        if fields.is_empty() {
            continue;
        }
        let [source, target, flags] = fields.as_slice() else {
            return Err(StandardsError::InvalidRow {
                file: filename.to_string(),
                line,
                message: format!(
                    "expected SOURCE TARGET FLAGS, found {} column(s)",
                    fields.len()
                ),
            });
        };

        let invalid_code = |source| StandardsError::InvalidCode {
            file: filename.to_string(),
            line,
            source,
        };
        let source = Code::parse(direction.source(), source).map_err(invalid_code)?;
        let flags = RowFlags::parse(flags).ok_or_else(|| StandardsError::InvalidFlags {
            file: filename.to_string(),
            line,
            flags: (*flags).to_string(),
        })?;

        if let Some(problem) = flags.divergence() {
            divergent_rows += 1;
            if divergent_rows <= MAX_ROW_WARNINGS {
                warn!(
                    file = %filename,
                    line,
                    source_code = %source,
                    target_code = %target,
                    problem,
                    "Divergent GEM row encoding"
                );
            }
        }

        let target = if flags.no_map {
            TargetCode::no_map()
        } else {
            TargetCode::mapped(Code::parse(direction.target(), target).map_err(invalid_code)?)
        };
        let mut target = target.with_approximate(flags.approximate);
        if flags.combination {
            target = target.in_combination(flags.scenario, flags.choice_list);
        }
        gem.push_target(source, target)?;
    }

    // A no-map row should be the only row of its source
    let mixed_no_map = gem
        .entries()
        .filter(|e| e.is_no_map() && e.targets.len() > 1)
        .count();
    if mixed_no_map > 0 {
        warn!(
            file = %filename,
            entry_count = mixed_no_map,
            "GEM entries mix no-map rows with mapped rows"
        );
    }
    if divergent_rows > 0 {
        warn!(
            file = %filename,
            row_count = divergent_rows,
            "GEM file contains divergent combination encodings"
        );
    }

    info!(
        file = %filename,
        direction = %direction,
        entry_count = gem.len(),
        row_count = gem.row_count(),
        "Loaded GEM"
    );
    Ok(gem)
}

/// The five-digit flag word of a GEM row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowFlags {
    approximate: bool,
    no_map: bool,
    combination: bool,
    scenario: u8,
    choice_list: u8,
}

impl RowFlags {
    fn parse(word: &str) -> Option<Self> {
        let digits: Vec<u8> = word
            .bytes()
            .map(|b| b.is_ascii_digit().then(|| b - b'0'))
            .collect::<Option<_>>()?;
        let [approximate, no_map, combination, scenario, choice_list] = digits.as_slice() else {
            return None;
        };
        let flag = |value: u8| match value {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        };
        Some(Self {
            approximate: flag(*approximate)?,
            no_map: flag(*no_map)?,
            combination: flag(*combination)?,
            scenario: *scenario,
            choice_list: *choice_list,
        })
    }

    /// Describe an encoding the applied-mapping rules do not expect.
    fn divergence(&self) -> Option<&'static str> {
        let grouped = self.scenario != 0 || self.choice_list != 0;
        if self.combination && (self.scenario == 0 || self.choice_list == 0) {
            Some("combination row without scenario or choice list")
        } else if !self.combination && grouped {
            Some("scenario or choice list on a non-combination row")
        } else if self.no_map && self.combination {
            Some("no-map row flagged as combination")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gem_model::{EquivalenceTable, Revision};

    #[test]
    fn parses_flag_words() {
        assert_eq!(
            RowFlags::parse("10112"),
            Some(RowFlags {
                approximate: true,
                no_map: false,
                combination: true,
                scenario: 1,
                choice_list: 2,
            })
        );
        assert!(RowFlags::parse("1011").is_none());
        assert!(RowFlags::parse("20000").is_none());
        assert!(RowFlags::parse("1x000").is_none());
    }

    #[test]
    fn flags_divergence() {
        assert!(RowFlags::parse("00000").unwrap().divergence().is_none());
        assert!(RowFlags::parse("10111").unwrap().divergence().is_none());
        assert!(RowFlags::parse("00100").unwrap().divergence().is_some());
        assert!(RowFlags::parse("00011").unwrap().divergence().is_some());
    }

    #[test]
    fn loads_rows_and_placeholders() {
        let content = "1400  C000  00000\n\n1983  C7931 10111\n1983  C7949 10112\n7999  NoDx  11000\n";
        let gem = load_gem_from_str(content, Direction::I9ToI10, "inline.txt").unwrap();
        assert_eq!(gem.len(), 3);
        assert_eq!(gem.row_count(), 4);
        assert_eq!(gem.source.as_deref(), Some("inline.txt"));

        let no_dx = gem
            .lookup(&Code::parse(Revision::Icd9, "7999").unwrap())
            .unwrap();
        assert!(no_dx.is_no_map());
        assert_eq!(no_dx.targets[0].code, None);

        let combo = gem
            .lookup(&Code::parse(Revision::Icd9, "1983").unwrap())
            .unwrap();
        assert_eq!(combo.targets[1].flags(), "10112");
    }

    #[test]
    fn reports_line_of_bad_rows() {
        let content = "1400 C000 00000\n1401 C001\n";
        let err = load_gem_from_str(content, Direction::I9ToI10, "bad.txt").unwrap_err();
        assert!(
            matches!(err, StandardsError::InvalidRow { line: 2, .. }),
            "{err:?}"
        );

        let content = "1400 C00.0 00000\n";
        let err = load_gem_from_str(content, Direction::I9ToI10, "bad.txt").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidCode { line: 1, .. }));

        let content = "1400 C000 0000\n";
        let err = load_gem_from_str(content, Direction::I9ToI10, "bad.txt").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidFlags { .. }));
    }
}
