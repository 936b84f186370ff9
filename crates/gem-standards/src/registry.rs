//! Registry holding both GEM directions.

use std::path::PathBuf;
use std::sync::OnceLock;

use gem_model::{DefinedCodes, Direction, EquivalenceTable, Revision};

use crate::error::{Result, StandardsError};
use crate::gem::Gem;
use crate::loader::load_gem;
use crate::paths::{DEFAULT_I10_GEM_FILE, DEFAULT_I9_GEM_FILE, gem_data_root};

/// Configuration for loading GEM files.
#[derive(Debug, Clone)]
pub struct GemConfig {
    /// Directory holding the GEM text files.
    pub data_dir: PathBuf,
    /// ICD-9-CM → ICD-10-CM file name.
    pub i9_file: String,
    /// ICD-10-CM → ICD-9-CM file name.
    pub i10_file: String,
}

impl Default for GemConfig {
    fn default() -> Self {
        Self {
            data_dir: gem_data_root(),
            i9_file: DEFAULT_I9_GEM_FILE.to_string(),
            i10_file: DEFAULT_I10_GEM_FILE.to_string(),
        }
    }
}

impl GemConfig {
    /// Default file names under a custom directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Path of the file holding `direction`.
    pub fn path_for(&self, direction: Direction) -> PathBuf {
        match direction {
            Direction::I9ToI10 => self.data_dir.join(&self.i9_file),
            Direction::I10ToI9 => self.data_dir.join(&self.i10_file),
        }
    }
}

/// Both directions of the General Equivalence Mappings.
#[derive(Debug)]
pub struct GemRegistry {
    /// ICD-9-CM → ICD-10-CM.
    pub i9_i10: Gem,
    /// ICD-10-CM → ICD-9-CM.
    pub i10_i9: Gem,
}

impl GemRegistry {
    /// Pair two tables.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::DirectionMismatch`] if a table is passed in
    /// the wrong slot.
    pub fn new(i9_i10: Gem, i10_i9: Gem) -> Result<Self> {
        for (gem, expected) in [
            (&i9_i10, Direction::I9ToI10),
            (&i10_i9, Direction::I10ToI9),
        ] {
            let found = gem.direction();
            if found != expected {
                return Err(StandardsError::DirectionMismatch { expected, found });
            }
        }
        Ok(Self { i9_i10, i10_i9 })
    }

    /// Load both directions with the given configuration.
    pub fn load(config: &GemConfig) -> Result<Self> {
        if !config.data_dir.is_dir() {
            return Err(StandardsError::DirectoryNotFound {
                path: config.data_dir.clone(),
            });
        }
        let i9_i10 = load_gem(&config.path_for(Direction::I9ToI10), Direction::I9ToI10)?;
        let i10_i9 = load_gem(&config.path_for(Direction::I10ToI9), Direction::I10ToI9)?;
        Self::new(i9_i10, i10_i9)
    }

    /// Load both directions from the default data directory.
    pub fn load_default() -> Result<Self> {
        Self::load(&GemConfig::default())
    }

    /// The table translating in `direction`.
    pub fn table(&self, direction: Direction) -> &Gem {
        match direction {
            Direction::I9ToI10 => &self.i9_i10,
            Direction::I10ToI9 => &self.i10_i9,
        }
    }

    /// Every code of `revision` either table mentions: the source codes of the
    /// table reading from it and the target codes of the table writing to it.
    pub fn defined_codes(&self, revision: Revision) -> DefinedCodes {
        let (reading, writing) = match revision {
            Revision::Icd9 => (&self.i9_i10, &self.i10_i9),
            Revision::Icd10 => (&self.i10_i9, &self.i9_i10),
        };
        let mut defined = writing.target_codes();
        for code in reading.codes() {
            defined.insert(code.clone());
        }
        defined
    }
}

static INSTALLED: OnceLock<GemRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// The registry is set once, before any reader starts, and never mutated;
/// readers share it without locking.
///
/// # Errors
///
/// Returns [`StandardsError::AlreadyInstalled`] on a second call.
pub fn install(registry: GemRegistry) -> Result<&'static GemRegistry> {
    let mut installed_now = false;
    let current = INSTALLED.get_or_init(|| {
        installed_now = true;
        registry
    });
    if installed_now {
        Ok(current)
    } else {
        Err(StandardsError::AlreadyInstalled)
    }
}

/// The process-wide registry, if one was installed.
pub fn installed() -> Option<&'static GemRegistry> {
    INSTALLED.get()
}
