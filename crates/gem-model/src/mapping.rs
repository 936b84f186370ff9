//! General Equivalence Mapping entries.
//!
//! A GEM row states that a source code maps to one target code, qualified by
//! five flags:
//!
//! | flag | meaning |
//! |---|---|
//! | approximate | the target is not a precise semantic match |
//! | no map | the source has no equivalent in the target revision |
//! | combination | the target must be reported with sibling targets |
//! | scenario | which combination the target belongs to (0 when none) |
//! | choice list | which slot of the combination the target fills (0 when none) |
//!
//! Targets sharing a scenario and choice list are alternatives: any one of
//! them fills the slot.

use serde::Serialize;

use crate::code::Code;

/// Combination grouping of a target: the scenario and its choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChoiceListId {
    pub scenario: u8,
    pub choice_list: u8,
}

/// One target of a mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCode {
    /// Target code; `None` on a no-map row.
    pub code: Option<Code>,
    pub approximate: bool,
    pub no_map: bool,
    pub combination: bool,
    /// Set on combination rows only.
    pub choice_list: Option<ChoiceListId>,
}

impl TargetCode {
    /// An exact, non-combination target.
    pub fn mapped(code: Code) -> Self {
        Self {
            code: Some(code),
            approximate: false,
            no_map: false,
            combination: false,
            choice_list: None,
        }
    }

    /// A target stating that the source has no equivalent.
    pub fn no_map() -> Self {
        Self {
            code: None,
            approximate: true,
            no_map: true,
            combination: false,
            choice_list: None,
        }
    }

    #[must_use]
    pub fn with_approximate(mut self, approximate: bool) -> Self {
        self.approximate = approximate;
        self
    }

    /// Mark the target as a member of a combination slot.
    #[must_use]
    pub fn in_combination(mut self, scenario: u8, choice_list: u8) -> Self {
        self.combination = true;
        self.choice_list = Some(ChoiceListId {
            scenario,
            choice_list,
        });
        self
    }

    /// The five-digit flag word as written in CDC GEM files (`"10111"`).
    pub fn flags(&self) -> String {
        let ChoiceListId {
            scenario,
            choice_list,
        } = self.choice_list.unwrap_or(ChoiceListId {
            scenario: 0,
            choice_list: 0,
        });
        format!(
            "{}{}{}{scenario}{choice_list}",
            u8::from(self.approximate),
            u8::from(self.no_map),
            u8::from(self.combination),
        )
    }
}

/// All targets of one source code, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub source: Code,
    pub targets: Vec<TargetCode>,
}

impl MappingEntry {
    pub fn new(source: Code) -> Self {
        Self {
            source,
            targets: Vec::new(),
        }
    }

    pub fn push(&mut self, target: TargetCode) {
        self.targets.push(target);
    }

    /// Returns true if any target flags the source as unmappable.
    pub fn is_no_map(&self) -> bool {
        self.targets.iter().any(|t| t.no_map)
    }

    pub fn is_approximate(&self) -> bool {
        self.targets.iter().any(|t| t.approximate)
    }

    pub fn is_combination(&self) -> bool {
        self.targets.iter().any(|t| t.combination)
    }

    /// Target codes in file order, skipping no-map placeholders.
    pub fn target_codes(&self) -> impl Iterator<Item = &Code> {
        self.targets.iter().filter_map(|t| t.code.as_ref())
    }
}
