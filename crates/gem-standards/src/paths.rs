//! GEM data directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the GEM data directory.
pub const GEM_DATA_ENV_VAR: &str = "GEM_DATA_DIR";

/// File name of the ICD-9-CM to ICD-10-CM GEM in the CMS 2018 release.
pub const DEFAULT_I9_GEM_FILE: &str = "2018_I9gem.txt";

/// File name of the ICD-10-CM to ICD-9-CM GEM in the CMS 2018 release.
pub const DEFAULT_I10_GEM_FILE: &str = "2018_I10gem.txt";

/// Get the GEM data directory.
///
/// Resolution order:
/// 1. `GEM_DATA_DIR` environment variable
/// 2. `data/gems/` directory relative to workspace root
pub fn gem_data_root() -> PathBuf {
    if let Ok(root) = std::env::var(GEM_DATA_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/gems")
}
