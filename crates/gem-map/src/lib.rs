//! Range expansion and applied-mapping translation between ICD-9-CM and
//! ICD-10-CM.
//!
//! ```ignore
//! use gem_map::translate;
//!
//! let targets = translate(registry.table(Direction::I10ToI9), &["C00-D48"])?;
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod expand;
pub mod translate;

pub use error::{Result, TranslateError};
pub use expand::{RangeExpander, expand};
pub use translate::{SourceOutcome, Translation, Translator, translate};
