//! Cost Calculator - token usage to USD
//!
//! Each vendor belongs to a [`CostFamily`] whose accounting rules decide
//! which buckets are billed and at which rate.

use super::pricing::{default_pricing, PriceEntry, PricingTable};
use crate::error::Result;
use crate::response::{SearchContextSize, Usage};
use crate::vendor::{CostFamily, Vendor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Token counts fed to the calculator; unreported buckets are zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    /// Input tokens in the vendor's accounting
    pub input: u64,
    /// Cache write tokens
    pub cache_write: u64,
    /// Cache read tokens
    pub cache_read: u64,
    /// Output tokens
    pub output: u64,
    /// Web search queries
    pub search_queries: u64,
    /// Search context tier
    pub search_context_size: Option<SearchContextSize>,
}

impl TokenCounts {
    /// Input and output only
    #[must_use]
    pub fn new(input: u64, output: u64) -> Self {
        Self {
            input,
            output,
            ..Default::default()
        }
    }

    /// Set cache write tokens
    #[must_use]
    pub fn with_cache_write(mut self, tokens: u64) -> Self {
        self.cache_write = tokens;
        self
    }

    /// Set cache read tokens
    #[must_use]
    pub fn with_cache_read(mut self, tokens: u64) -> Self {
        self.cache_read = tokens;
        self
    }

    /// Set search queries and context tier
    #[must_use]
    pub fn with_search(mut self, queries: u64, size: SearchContextSize) -> Self {
        self.search_queries = queries;
        self.search_context_size = Some(size);
        self
    }
}

impl From<&Usage> for TokenCounts {
    fn from(usage: &Usage) -> Self {
        Self {
            input: usage.input_tokens.unwrap_or(0),
            cache_write: usage.cache_write_tokens.unwrap_or(0),
            cache_read: usage.cache_read_tokens.unwrap_or(0),
            output: usage.output_tokens.unwrap_or(0),
            search_queries: usage.search_queries.unwrap_or(0),
            search_context_size: usage.search_context_size,
        }
    }
}

/// Cost split by billing bucket (USD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Plain input tokens
    pub input_cost: f64,
    /// Cache write tokens
    pub cache_write_cost: f64,
    /// Cache read tokens
    pub cache_read_cost: f64,
    /// Output tokens
    pub output_cost: f64,
    /// Search query fees
    pub search_cost: f64,
    /// Sum of all components
    pub total_cost: f64,
}

impl CostBreakdown {
    fn calculate_total(mut self) -> Self {
        self.total_cost = self.input_cost
            + self.cache_write_cost
            + self.cache_read_cost
            + self.output_cost
            + self.search_cost;
        self
    }
}

fn tokens_cost(tokens: u64, rate_per_million: f64) -> f64 {
    (tokens as f64 / TOKENS_PER_MILLION) * rate_per_million
}

/// Apply a family's accounting rules to one price row
#[must_use]
pub fn price_usage(family: CostFamily, entry: &PriceEntry, counts: &TokenCounts) -> CostBreakdown {
    let output_cost = tokens_cost(counts.output, entry.output_cost_per_million);

    let breakdown = match family {
        CostFamily::Anthropic => CostBreakdown {
            input_cost: tokens_cost(counts.input, entry.input_cost_per_million),
            cache_write_cost: tokens_cost(counts.cache_write, entry.cache_write_rate()),
            cache_read_cost: tokens_cost(counts.cache_read, entry.cache_read_rate()),
            output_cost,
            ..Default::default()
        },
        // Input holds the cache-miss count, already billed as cache writes.
        CostFamily::DeepSeek => CostBreakdown {
            input_cost: tokens_cost(counts.input, 0.0),
            cache_write_cost: tokens_cost(counts.cache_write, entry.cache_write_rate()),
            cache_read_cost: tokens_cost(counts.cache_read, entry.cache_read_rate()),
            output_cost,
            ..Default::default()
        },
        // Input is already net of cached tokens.
        CostFamily::OpenAi => CostBreakdown {
            cache_write_cost: tokens_cost(counts.input, entry.cache_write_rate()),
            cache_read_cost: tokens_cost(counts.cache_read, entry.cache_read_rate()),
            output_cost,
            ..Default::default()
        },
        // Catalog cache rates are not applied.
        CostFamily::Aggregator => CostBreakdown {
            input_cost: tokens_cost(counts.input, entry.input_cost_per_million),
            output_cost,
            ..Default::default()
        },
        CostFamily::SearchAugmented => {
            let fee = entry.search.map_or(0.0, |search| {
                match counts.search_context_size.unwrap_or(SearchContextSize::Low) {
                    SearchContextSize::Low => search.low,
                    SearchContextSize::Medium => search.medium,
                    SearchContextSize::High => search.high,
                }
            });
            CostBreakdown {
                input_cost: tokens_cost(counts.input, entry.input_cost_per_million),
                output_cost,
                search_cost: counts.search_queries as f64 * fee,
                ..Default::default()
            }
        }
        CostFamily::Embeddings => CostBreakdown {
            input_cost: tokens_cost(counts.input, entry.input_cost_per_million),
            ..Default::default()
        },
    };

    breakdown.calculate_total()
}

/// Cost calculator over a pricing table
#[derive(Debug, Clone)]
pub struct CostCalculator {
    pricing: Arc<PricingTable>,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::new(default_pricing())
    }
}

impl CostCalculator {
    /// Create a calculator over the given pricing
    #[must_use]
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        Self { pricing }
    }

    /// The pricing table in use
    #[must_use]
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Cost split by bucket, `None` when the model has no price row
    pub fn breakdown(
        &self,
        vendor: Vendor,
        model: &str,
        counts: &TokenCounts,
    ) -> Result<Option<CostBreakdown>> {
        Ok(self
            .pricing
            .lookup(vendor, model)?
            .map(|entry| price_usage(vendor.cost_family(), entry, counts)))
    }

    /// Total cost, `None` when the model has no price row
    pub fn cost_for(&self, vendor: Vendor, model: &str, counts: &TokenCounts) -> Result<Option<f64>> {
        Ok(self
            .breakdown(vendor, model, counts)?
            .map(|breakdown| breakdown.total_cost))
    }

    /// Total cost, `0.0` when the model has no price row.
    ///
    /// Fails only when the vendor has no price table at all.
    pub fn calculate(&self, vendor: Vendor, model: &str, counts: &TokenCounts) -> Result<f64> {
        Ok(self.cost_for(vendor, model, counts)?.unwrap_or(0.0))
    }
}
