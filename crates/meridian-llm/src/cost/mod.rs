//! Cost - pricing tables and cost calculation
//!
//! # Module Structure
//!
//! - `pricing`: Static per-vendor price tables and model lookup
//! - `catalog`: OpenRouter pricing catalog resource
//! - `calculator`: Per-family accounting rules and the CostCalculator

mod calculator;
mod catalog;
mod pricing;

#[cfg(test)]
mod tests;

pub use calculator::{price_usage, CostBreakdown, CostCalculator, TokenCounts};
pub use catalog::OpenRouterCatalog;
pub use pricing::{default_pricing, strip_date_suffix, PriceEntry, PricingTable, SearchPricing};
