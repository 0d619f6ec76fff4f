//! Configuration loading
//!
//! Layers embedded defaults, an optional local file and `MERIDIAN_`
//! environment variables (e.g. `MERIDIAN_PRICING__OPENROUTER_CATALOG`).

use crate::error::{Error, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Embedded default configuration (compiled into the crate)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Pricing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// External OpenRouter catalog; the bundled one is used when unset
    #[serde(default)]
    pub openrouter_catalog: Option<PathBuf>,
    /// Report unknown models as `0.0` rather than `None`
    #[serde(default)]
    pub tolerate_missing_prices: bool,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeridianConfig {
    /// Pricing settings
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl MeridianConfig {
    /// Load defaults, `config/local` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Load with an explicit override file layered over the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(Some(path.as_ref()))
    }

    fn load_with(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("MERIDIAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
