use crate::catalog::CodeCatalog;
use crate::code::Code;
use crate::mapping::MappingEntry;
use crate::revision::Direction;

/// Read-only access to one direction of a General Equivalence Mapping.
///
/// Implementations are loaded once and never mutated, so a shared reference
/// can be used from many threads at once.
pub trait EquivalenceTable {
    fn direction(&self) -> Direction;

    /// The mapping entry of a source code, if the table defines it.
    fn lookup(&self, code: &Code) -> Option<&MappingEntry>;

    /// The source codes the table defines, used to expand ranges.
    fn source_codes(&self) -> &dyn CodeCatalog;
}
