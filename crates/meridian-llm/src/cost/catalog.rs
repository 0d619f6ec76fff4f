//! OpenRouter pricing catalog
//!
//! The catalog is a JSON object keyed by model id. Each value carries a
//! `pricing` object with string-encoded USD-per-token rates, refreshed
//! out-of-band by a separate updater.

use super::pricing::PriceEntry;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Catalog bundled with the crate
const EMBEDDED_CATALOG: &str = include_str!("../../resources/openrouter_pricing.json");

#[derive(Debug, Deserialize)]
struct CatalogModel {
    pricing: CatalogPricing,
}

#[derive(Debug, Deserialize)]
struct CatalogPricing {
    prompt: String,
    completion: String,
    #[serde(default)]
    input_cache_read: Option<String>,
    #[serde(default)]
    input_cache_write: Option<String>,
}

/// Parsed OpenRouter catalog
#[derive(Debug, Clone, Default)]
pub struct OpenRouterCatalog {
    entries: HashMap<String, PriceEntry>,
}

impl OpenRouterCatalog {
    /// Parse the catalog bundled with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Read and parse a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loading OpenRouter catalog");
        Self::from_json(&raw)
    }

    /// Parse catalog JSON.
    ///
    /// Rows with negative or non-finite rates (dynamic routers such as
    /// `openrouter/auto`) are skipped; malformed decimal strings are an error.
    pub fn from_json(raw: &str) -> Result<Self> {
        let models: HashMap<String, CatalogModel> =
            serde_json::from_str(raw).map_err(|e| Error::Catalog(e.to_string()))?;

        let mut entries = HashMap::with_capacity(models.len());
        for (id, model) in models {
            let pricing = &model.pricing;
            let prompt = per_million(&id, "prompt", &pricing.prompt)?;
            let completion = per_million(&id, "completion", &pricing.completion)?;

            if !usable(prompt) || !usable(completion) {
                warn!(model = %id, "Skipping catalog row with variable pricing");
                continue;
            }

            let mut entry = PriceEntry::new(prompt, completion);
            if let Some(rate) = &pricing.input_cache_read {
                let rate = per_million(&id, "input_cache_read", rate)?;
                if usable(rate) {
                    entry = entry.with_cache_read(rate);
                }
            }
            if let Some(rate) = &pricing.input_cache_write {
                let rate = per_million(&id, "input_cache_write", rate)?;
                if usable(rate) {
                    entry = entry.with_cache_write(rate);
                }
            }
            entries.insert(id, entry);
        }

        Ok(Self { entries })
    }

    /// Number of priced models
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no priced models
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Price row for a model id
    #[must_use]
    pub fn get(&self, model: &str) -> Option<&PriceEntry> {
        self.entries.get(model)
    }

    /// Consume into a pricing-table row map
    #[must_use]
    pub fn into_entries(self) -> HashMap<String, PriceEntry> {
        self.entries
    }
}

fn usable(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}

fn per_million(model: &str, field: &str, rate: &str) -> Result<f64> {
    rate.trim()
        .parse::<f64>()
        .map(|per_token| per_token * 1_000_000.0)
        .map_err(|_| Error::Catalog(format!("{model}: invalid {field} rate '{rate}'")))
}
