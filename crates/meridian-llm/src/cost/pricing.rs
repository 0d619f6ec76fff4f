//! Model Pricing - static per-vendor price tables
//!
//! Prices are USD per 1M tokens, except search fees which are USD per query.
//! OpenRouter prices come from the catalog resource (see `catalog`).

use super::catalog::OpenRouterCatalog;
use crate::config::PricingConfig;
use crate::error::{Error, Result};
use crate::vendor::Vendor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-query search fees by context tier (USD per query)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchPricing {
    /// Low context tier
    pub low: f64,
    /// Medium context tier
    pub medium: f64,
    /// High context tier
    pub high: f64,
}

/// Pricing information for a model (per 1M tokens)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Cost per 1M input tokens (USD)
    pub input_cost_per_million: f64,
    /// Cost per 1M tokens written to the prompt cache
    pub cache_write_cost_per_million: Option<f64>,
    /// Cost per 1M tokens read from the prompt cache
    pub cache_read_cost_per_million: Option<f64>,
    /// Cost per 1M output tokens (USD)
    pub output_cost_per_million: f64,
    /// Search fees, for search-augmented vendors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchPricing>,
}

impl PriceEntry {
    /// Entry with input and output rates only
    #[must_use]
    pub const fn new(input: f64, output: f64) -> Self {
        Self {
            input_cost_per_million: input,
            cache_write_cost_per_million: None,
            cache_read_cost_per_million: None,
            output_cost_per_million: output,
            search: None,
        }
    }

    /// Set the cache write rate
    #[must_use]
    pub const fn with_cache_write(mut self, rate: f64) -> Self {
        self.cache_write_cost_per_million = Some(rate);
        self
    }

    /// Set the cache read rate
    #[must_use]
    pub const fn with_cache_read(mut self, rate: f64) -> Self {
        self.cache_read_cost_per_million = Some(rate);
        self
    }

    /// Set the per-query search fees
    #[must_use]
    pub const fn with_search(mut self, low: f64, medium: f64, high: f64) -> Self {
        self.search = Some(SearchPricing { low, medium, high });
        self
    }

    /// Rate applied to cache writes, falling back to the input rate
    #[must_use]
    pub fn cache_write_rate(&self) -> f64 {
        self.cache_write_cost_per_million
            .unwrap_or(self.input_cost_per_million)
    }

    /// Rate applied to cache reads, falling back to the input rate
    #[must_use]
    pub fn cache_read_rate(&self) -> f64 {
        self.cache_read_cost_per_million
            .unwrap_or(self.input_cost_per_million)
    }
}

// ============================================================================
// Static tables
// ============================================================================

const OPENAI_PRICES: &[(&str, PriceEntry)] = &[
    ("gpt-5", PriceEntry::new(1.25, 10.00).with_cache_read(0.125)),
    ("gpt-5-mini", PriceEntry::new(0.25, 2.00).with_cache_read(0.025)),
    ("gpt-5-nano", PriceEntry::new(0.05, 0.40).with_cache_read(0.005)),
    ("gpt-4.1", PriceEntry::new(2.00, 8.00).with_cache_read(0.50)),
    ("gpt-4.1-mini", PriceEntry::new(0.40, 1.60).with_cache_read(0.10)),
    ("gpt-4.1-nano", PriceEntry::new(0.10, 0.40).with_cache_read(0.025)),
    ("gpt-4o", PriceEntry::new(2.50, 10.00).with_cache_read(1.25)),
    ("gpt-4o-mini", PriceEntry::new(0.15, 0.60).with_cache_read(0.075)),
    ("o1", PriceEntry::new(15.00, 60.00).with_cache_read(7.50)),
    ("o3", PriceEntry::new(2.00, 8.00).with_cache_read(0.50)),
    ("o3-mini", PriceEntry::new(1.10, 4.40).with_cache_read(0.55)),
    ("o4-mini", PriceEntry::new(1.10, 4.40).with_cache_read(0.275)),
];

const ANTHROPIC_PRICES: &[(&str, PriceEntry)] = &[
    (
        "claude-opus-4-1-20250805",
        PriceEntry::new(15.00, 75.00).with_cache_write(18.75).with_cache_read(1.50),
    ),
    (
        "claude-opus-4-20250514",
        PriceEntry::new(15.00, 75.00).with_cache_write(18.75).with_cache_read(1.50),
    ),
    (
        "claude-sonnet-4-5-20250929",
        PriceEntry::new(3.00, 15.00).with_cache_write(3.75).with_cache_read(0.30),
    ),
    (
        "claude-sonnet-4-20250514",
        PriceEntry::new(3.00, 15.00).with_cache_write(3.75).with_cache_read(0.30),
    ),
    (
        "claude-3-7-sonnet-20250219",
        PriceEntry::new(3.00, 15.00).with_cache_write(3.75).with_cache_read(0.30),
    ),
    (
        "claude-3-5-sonnet-20241022",
        PriceEntry::new(3.00, 15.00).with_cache_write(3.75).with_cache_read(0.30),
    ),
    (
        "claude-haiku-4-5-20251001",
        PriceEntry::new(1.00, 5.00).with_cache_write(1.25).with_cache_read(0.10),
    ),
    (
        "claude-3-5-haiku-20241022",
        PriceEntry::new(0.80, 4.00).with_cache_write(1.00).with_cache_read(0.08),
    ),
    (
        "claude-3-haiku-20240307",
        PriceEntry::new(0.25, 1.25).with_cache_write(0.30).with_cache_read(0.03),
    ),
];

// DeepSeek bills cache misses at the write rate and hits at the read rate.
const DEEPSEEK_PRICES: &[(&str, PriceEntry)] = &[
    (
        "deepseek-chat",
        PriceEntry::new(0.27, 1.10).with_cache_write(0.27).with_cache_read(0.07),
    ),
    (
        "deepseek-reasoner",
        PriceEntry::new(0.55, 2.19).with_cache_write(0.55).with_cache_read(0.14),
    ),
];

const CEREBRAS_PRICES: &[(&str, PriceEntry)] = &[
    ("llama3.1-8b", PriceEntry::new(0.10, 0.10)),
    ("llama-3.3-70b", PriceEntry::new(0.85, 1.20)),
    ("llama-4-scout-17b-16e-instruct", PriceEntry::new(0.65, 0.85)),
    ("qwen-3-32b", PriceEntry::new(0.40, 0.80)),
    ("gpt-oss-120b", PriceEntry::new(0.25, 0.69)),
];

const PERPLEXITY_PRICES: &[(&str, PriceEntry)] = &[
    ("sonar", PriceEntry::new(1.00, 1.00).with_search(0.005, 0.008, 0.012)),
    ("sonar-pro", PriceEntry::new(3.00, 15.00).with_search(0.006, 0.010, 0.014)),
    (
        "sonar-reasoning",
        PriceEntry::new(1.00, 5.00).with_search(0.005, 0.008, 0.012),
    ),
    (
        "sonar-reasoning-pro",
        PriceEntry::new(2.00, 8.00).with_search(0.006, 0.010, 0.014),
    ),
    (
        "sonar-deep-research",
        PriceEntry::new(2.00, 8.00).with_search(0.005, 0.005, 0.005),
    ),
];

const VOYAGE_PRICES: &[(&str, PriceEntry)] = &[
    ("voyage-3.5", PriceEntry::new(0.06, 0.0)),
    ("voyage-3.5-lite", PriceEntry::new(0.02, 0.0)),
    ("voyage-3-large", PriceEntry::new(0.18, 0.0)),
    ("voyage-3", PriceEntry::new(0.06, 0.0)),
    ("voyage-3-lite", PriceEntry::new(0.02, 0.0)),
    ("voyage-code-3", PriceEntry::new(0.18, 0.0)),
];

fn static_table(vendor: Vendor) -> Option<&'static [(&'static str, PriceEntry)]> {
    match vendor {
        Vendor::OpenAi => Some(OPENAI_PRICES),
        Vendor::Anthropic => Some(ANTHROPIC_PRICES),
        Vendor::DeepSeek => Some(DEEPSEEK_PRICES),
        Vendor::Cerebras => Some(CEREBRAS_PRICES),
        Vendor::Perplexity => Some(PERPLEXITY_PRICES),
        Vendor::Voyage => Some(VOYAGE_PRICES),
        Vendor::OpenRouter => None,
    }
}

lazy_static::lazy_static! {
    static ref DATE_SUFFIX: Regex =
        Regex::new(r"-\d{4}(?:-\d{2}){0,2}$").expect("date suffix regex");

    /// Built-in pricing shared by default normalizers and calculators
    static ref DEFAULT_PRICING: Arc<PricingTable> = Arc::new(PricingTable::builtin());
}

/// Built-in pricing table (static tables plus the embedded OpenRouter catalog)
#[must_use]
pub fn default_pricing() -> Arc<PricingTable> {
    Arc::clone(&DEFAULT_PRICING)
}

/// Strip a trailing `-YYYY`, `-YYYY-MM` or `-YYYY-MM-DD` snapshot suffix
#[must_use]
pub fn strip_date_suffix(model: &str) -> Option<&str> {
    DATE_SUFFIX.find(model).map(|m| &model[..m.start()])
}

// ============================================================================
// Pricing table
// ============================================================================

/// Price rows keyed by vendor, then model id
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    vendors: HashMap<Vendor, HashMap<String, PriceEntry>>,
}

impl PricingTable {
    /// Table with no vendors
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Static tables plus the embedded OpenRouter catalog
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::static_only();
        match OpenRouterCatalog::embedded() {
            Ok(catalog) => {
                table
                    .vendors
                    .insert(Vendor::OpenRouter, catalog.into_entries());
            }
            Err(e) => warn!(error = %e, "Embedded OpenRouter catalog unavailable"),
        }
        table
    }

    /// Build pricing from configuration, reading an external OpenRouter
    /// catalog when one is configured
    pub fn from_config(config: &PricingConfig) -> Result<Self> {
        let catalog = match &config.openrouter_catalog {
            Some(path) => OpenRouterCatalog::from_path(path)?,
            None => OpenRouterCatalog::embedded()?,
        };
        Ok(Self::static_only().with_vendor_table(Vendor::OpenRouter, catalog.into_entries()))
    }

    fn static_only() -> Self {
        let mut table = Self::empty();
        for vendor in Vendor::ALL {
            if let Some(rows) = static_table(vendor) {
                let entries = rows
                    .iter()
                    .map(|(model, entry)| ((*model).to_string(), *entry))
                    .collect();
                table.vendors.insert(vendor, entries);
            }
        }
        table
    }

    /// Replace a vendor's whole table
    #[must_use]
    pub fn with_vendor_table(mut self, vendor: Vendor, entries: HashMap<String, PriceEntry>) -> Self {
        self.vendors.insert(vendor, entries);
        self
    }

    /// Insert or overwrite a single price row
    pub fn insert(&mut self, vendor: Vendor, model: impl Into<String>, entry: PriceEntry) {
        self.vendors
            .entry(vendor)
            .or_default()
            .insert(model.into(), entry);
    }

    /// Whether any price table exists for the vendor
    #[must_use]
    pub fn has_vendor(&self, vendor: Vendor) -> bool {
        self.vendors.contains_key(&vendor)
    }

    /// Number of price rows for a vendor
    #[must_use]
    pub fn model_count(&self, vendor: Vendor) -> usize {
        self.vendors.get(&vendor).map_or(0, HashMap::len)
    }

    /// Find the price row for a model.
    ///
    /// Returns `Ok(None)` when the vendor has a table but no row for the
    /// model, and `Err(MissingPriceTable)` when the vendor has no table.
    pub fn lookup(&self, vendor: Vendor, model: &str) -> Result<Option<&PriceEntry>> {
        let table = self
            .vendors
            .get(&vendor)
            .ok_or(Error::MissingPriceTable(vendor))?;

        if let Some(entry) = table.get(model) {
            return Ok(Some(entry));
        }

        if vendor.uses_exact_model_pricing() {
            if let Some(base) = strip_date_suffix(model) {
                if let Some(entry) = table.get(base) {
                    debug!(%vendor, model, base, "Priced model via date-suffix fallback");
                    return Ok(Some(entry));
                }
            }
        }

        warn!(%vendor, model, "No price row for model");
        Ok(None)
    }
}
