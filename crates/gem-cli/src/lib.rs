//! CLI library components for the GEM translator.

#![deny(unsafe_code)]

pub mod logging;
pub mod summary;
