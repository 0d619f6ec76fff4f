//! `meridian price` - price token counts

use clap::Args;
use meridian_llm::{CostCalculator, MeridianConfig, PricingTable, SearchContextSize, TokenCounts, Vendor};
use std::sync::Arc;

/// Arguments for `price`
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Vendor to price for
    #[arg(long)]
    pub vendor: Vendor,

    /// Model name as reported by the vendor
    #[arg(long)]
    pub model: String,

    /// Input tokens
    #[arg(long, default_value_t = 0)]
    pub input: u64,

    /// Output tokens
    #[arg(long, default_value_t = 0)]
    pub output: u64,

    /// Cache-write tokens
    #[arg(long, default_value_t = 0)]
    pub cache_write: u64,

    /// Cache-read tokens
    #[arg(long, default_value_t = 0)]
    pub cache_read: u64,

    /// Search queries (search-augmented vendors)
    #[arg(long, default_value_t = 0)]
    pub search_queries: u64,

    /// Search context size: low, medium or high
    #[arg(long, default_value = "low")]
    pub search_context: String,
}

pub fn run(config: &MeridianConfig, args: PriceArgs) -> anyhow::Result<()> {
    let size = SearchContextSize::from_label(&args.search_context)
        .ok_or_else(|| anyhow::anyhow!("unknown search context size: {}", args.search_context))?;

    let counts = TokenCounts::new(args.input, args.output)
        .with_cache_write(args.cache_write)
        .with_cache_read(args.cache_read)
        .with_search(args.search_queries, size);

    let calculator = CostCalculator::new(Arc::new(PricingTable::from_config(&config.pricing)?));
    match calculator.breakdown(args.vendor, &args.model, &counts)? {
        Some(breakdown) => println!("{}", serde_json::to_string_pretty(&breakdown)?),
        None if config.pricing.tolerate_missing_prices => println!("{}", 0.0),
        None => anyhow::bail!("no price row for {} model '{}'", args.vendor, args.model),
    }
    Ok(())
}
