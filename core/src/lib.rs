//! vnaddr-core
//!
//! Normalization, string-similarity kernels, fuzzy indexes, name
//! dictionaries and the administrative reference graph shared by address
//! resolvers. Nothing in this crate knows about prefixes, token windows
//! or slot admission; that layer lives in the `vnaddr` crate.
//!
//! Public API:
//! - `normalize` - canonical key normalization
//! - `levenshtein` / `lcs_len` - similarity kernels
//! - `FuzzyIndex` / `FuzzyTrie` / `BkTree` - approximate key search
//! - `Dictionary` - key -> original name lookup, plain or compiled
//! - `ReferenceGraph` - ward -> district -> province containment
//! - `Config` - matching parameters and TOML helpers
use serde::{Deserialize, Serialize};

pub mod normalize;
pub use normalize::normalize;

pub mod distance;
pub use distance::{lcs_len, levenshtein};

pub mod index;
pub use index::{build_index, BkTree, FuzzyIndex, FuzzyTrie, IndexKind, Match};

pub mod dictionary;
pub use dictionary::{DictEntry, Dictionary};

pub mod reference;
pub use reference::{RefRecord, ReferenceGraph};

/// Generic matching configuration.
///
/// Only backend-level knobs live here. Resolution-level options (window
/// width, prefix bias) belong to the resolver crate's configuration,
/// which flattens this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fuzzy index realization used for every level dictionary.
    pub index: IndexKind,
    /// Fraction of a query's length granted as edit budget once the
    /// query is long enough for the stepped thresholds not to apply.
    pub distance_ratio: f32,
    /// Capacity of the resolver's query result cache (entries).
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index: IndexKind::default(),
            distance_ratio: 0.2,
            max_cache_size: 1024,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Maximum edit distance granted to a query whose space-free length
    /// is `len`. Very short queries must match exactly, mid-length ones
    /// get a single edit, longer ones a proportional budget.
    pub fn edit_budget(&self, len: usize) -> usize {
        if len <= 2 {
            0
        } else if len <= 5 {
            1
        } else {
            ((len as f32 * self.distance_ratio) as usize).max(1)
        }
    }
}
