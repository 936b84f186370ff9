//! Code model for translating between ICD-9-CM and ICD-10-CM.
//!
//! - [`Revision`] and [`Direction`] name the code sets and table directions
//! - [`Code`] parses, orders and enumerates single codes
//! - [`CodeRange`] and [`Specifier`] describe translation requests
//! - [`MappingEntry`] and [`TargetCode`] hold General Equivalence Mapping rows
//! - [`CodeCatalog`] and [`EquivalenceTable`] are the seams the range expander
//!   and translator work against

#![deny(unsafe_code)]

pub mod catalog;
pub mod code;
pub mod error;
pub mod mapping;
pub mod range;
pub mod revision;
pub mod table;

pub use catalog::{CodeCatalog, DefinedCodes, RepresentableCodes};
pub use code::{Code, order_of_magnitude};
pub use error::{CodeError, Result};
pub use mapping::{ChoiceListId, MappingEntry, TargetCode};
pub use range::{CodeRange, Specifier};
pub use revision::{Direction, Revision};
pub use table::EquivalenceTable;
