//! Meridian LLM - Vendor Response Normalization
//!
//! This crate turns raw vendor payloads into one canonical response shape:
//! - Vendor: the supported vendors and their accounting families
//! - Normalize: per-vendor payload extraction into [`Response`]
//! - Cost: pricing tables, the OpenRouter catalog and the cost calculator
//! - Thinking: inline `<thinking>` / `<think>` reasoning extraction
//! - Config: layered pricing configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod cost;
pub mod error;
pub mod normalize;
pub mod response;
pub mod thinking;
pub mod vendor;

pub use config::{MeridianConfig, PricingConfig};
pub use cost::{
    default_pricing, price_usage, strip_date_suffix, CostBreakdown, CostCalculator,
    OpenRouterCatalog, PriceEntry, PricingTable, SearchPricing, TokenCounts,
};
pub use error::{Error, Result};
pub use normalize::{normalize, Normalizer};
pub use response::{Response, ResponseStatus, SearchContextSize, ToolCallRequest, Usage};
pub use thinking::{extract_thinking, ThinkingSplit};
pub use vendor::{CostFamily, Vendor};
