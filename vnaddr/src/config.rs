/// Resolution configuration extending the base matching `Config` from
/// `vnaddr-core`.
///
/// The base carries backend-level knobs (index kind, distance ratio,
/// cache size); this type adds the address-specific ones: how wide the
/// token window sweeps and how much a recognized administrative prefix
/// boosts a match.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base matching configuration (index backend, budgets, cache).
    #[serde(flatten)]
    pub base: vnaddr_core::Config,

    /// Widest token window swept over each input segment.
    pub max_window: usize,

    /// Additive score bonus for matches guided by a recognized prefix.
    /// Any strictly positive value keeps prefixed matches ahead of
    /// equal unprefixed ones.
    pub prefix_bias: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base: vnaddr_core::Config::default(),
            max_window: 4,
            prefix_bias: 0.2,
        }
    }
}

impl ResolverConfig {
    /// Convert into the base config.
    pub fn into_base(self) -> vnaddr_core::Config {
        self.base
    }

    /// Get a reference to the base config.
    pub fn base(&self) -> &vnaddr_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config.
    pub fn base_mut(&mut self) -> &mut vnaddr_core::Config {
        &mut self.base
    }

    /// Load a full resolver configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ResolverConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
