//! Vendor tags and their billing families

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An upstream LLM provider or aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages
    Anthropic,
    /// DeepSeek chat completions
    DeepSeek,
    /// Cerebras inference (OpenAI-compatible)
    Cerebras,
    /// OpenRouter gateway
    OpenRouter,
    /// Perplexity search-augmented chat
    Perplexity,
    /// Voyage embeddings
    Voyage,
}

/// How a vendor's token usage turns into money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostFamily {
    /// Every bucket (input, cache write, cache read, output) is billed
    Anthropic,
    /// Input tokens duplicate the cache-miss bucket and are billed at zero
    DeepSeek,
    /// Prompt tokens include cached tokens; the uncached delta is billed at
    /// the write (or base input) rate
    OpenAi,
    /// Catalog `prompt`/`completion` rates only
    Aggregator,
    /// Token cost plus a per-query fee tiered by search context size
    SearchAugmented,
    /// Total tokens billed at the input rate
    Embeddings,
}

impl Vendor {
    /// All vendors with a response normalizer
    pub const ALL: [Vendor; 7] = [
        Vendor::OpenAi,
        Vendor::Anthropic,
        Vendor::DeepSeek,
        Vendor::Cerebras,
        Vendor::OpenRouter,
        Vendor::Perplexity,
        Vendor::Voyage,
    ];

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::DeepSeek => "deepseek",
            Self::Cerebras => "cerebras",
            Self::OpenRouter => "openrouter",
            Self::Perplexity => "perplexity",
            Self::Voyage => "voyage",
        }
    }

    /// Billing family used by the cost calculator
    #[must_use]
    pub fn cost_family(&self) -> CostFamily {
        match self {
            Self::Anthropic => CostFamily::Anthropic,
            Self::DeepSeek => CostFamily::DeepSeek,
            Self::OpenAi | Self::Cerebras => CostFamily::OpenAi,
            Self::OpenRouter => CostFamily::Aggregator,
            Self::Perplexity => CostFamily::SearchAugmented,
            Self::Voyage => CostFamily::Embeddings,
        }
    }

    /// Whether prices are keyed by exact model string, with the
    /// date-suffix fallback applied on a miss
    #[must_use]
    pub fn uses_exact_model_pricing(&self) -> bool {
        !matches!(self, Self::OpenRouter)
    }

    /// Whether the vendor returns reasoning in a dedicated field rather
    /// than inline tags
    #[must_use]
    pub fn has_native_reasoning(&self) -> bool {
        matches!(self, Self::Anthropic | Self::DeepSeek | Self::OpenRouter)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "deepseek" => Ok(Self::DeepSeek),
            "cerebras" => Ok(Self::Cerebras),
            "openrouter" => Ok(Self::OpenRouter),
            "perplexity" => Ok(Self::Perplexity),
            "voyage" | "voyageai" => Ok(Self::Voyage),
            other => Err(Error::UnknownVendor(other.to_string())),
        }
    }
}
