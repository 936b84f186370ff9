//! General Equivalence Mapping loading for ICD-9-CM / ICD-10-CM translation.
//!
//! This crate reads the CMS/CDC GEM text files and exposes them as
//! [`Gem`] tables implementing [`gem_model::EquivalenceTable`].
//!
//! # Data directory
//!
//! Files are looked up in `data/gems/` under the workspace root, or in the
//! directory named by the `GEM_DATA_DIR` environment variable.
//!
//! # Example
//!
//! ```ignore
//! use gem_model::Direction;
//! use gem_standards::GemRegistry;
//!
//! let registry = GemRegistry::load_default()?;
//! let table = registry.table(Direction::I10ToI9);
//! println!("{} source codes", table.len());
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod gem;
pub mod loader;
pub mod paths;
pub mod registry;

pub use error::{Result, StandardsError};
pub use gem::Gem;
pub use loader::{load_gem, load_gem_from_str};
pub use paths::{DEFAULT_I10_GEM_FILE, DEFAULT_I9_GEM_FILE, GEM_DATA_ENV_VAR, gem_data_root};
pub use registry::{GemConfig, GemRegistry, install, installed};
