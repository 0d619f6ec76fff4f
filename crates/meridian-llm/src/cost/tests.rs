//! Tests for cost module

use super::*;
use crate::error::Error;
use crate::response::SearchContextSize;
use crate::vendor::{CostFamily, Vendor};
use std::collections::HashMap;
use std::sync::Arc;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn test_anthropic_bills_every_bucket() {
    let entry = PriceEntry::new(3.0, 15.0)
        .with_cache_write(3.75)
        .with_cache_read(0.30);
    let counts = TokenCounts::new(1_000, 500)
        .with_cache_write(2_000)
        .with_cache_read(4_000);

    let breakdown = price_usage(CostFamily::Anthropic, &entry, &counts);

    let expected = 1_000.0 * 3.0e-6 + 2_000.0 * 3.75e-6 + 4_000.0 * 0.30e-6 + 500.0 * 15.0e-6;
    assert!(approx(breakdown.total_cost, expected));
    assert!(breakdown.cache_write_cost > 0.0);
    assert!(breakdown.cache_read_cost > 0.0);
}

#[test]
fn test_deepseek_input_contributes_zero() {
    let entry = PriceEntry::new(0.27, 1.1)
        .with_cache_write(0.27)
        .with_cache_read(0.07);
    let counts = TokenCounts::new(100, 20)
        .with_cache_write(100)
        .with_cache_read(50);

    let breakdown = price_usage(CostFamily::DeepSeek, &entry, &counts);

    let expected = 0.0 * 100.0 + 0.27e-6 * 100.0 + 0.07e-6 * 50.0 + 1.1e-6 * 20.0;
    assert!(approx(breakdown.total_cost, expected));
    assert_eq!(breakdown.input_cost, 0.0);
}

#[test]
fn test_openai_uncached_delta_billed_at_write_or_input_rate() {
    let entry = PriceEntry::new(2.5, 10.0).with_cache_read(1.25);
    // 1000 prompt tokens of which 400 cached
    let counts = TokenCounts::new(600, 100).with_cache_read(400);

    let breakdown = price_usage(CostFamily::OpenAi, &entry, &counts);

    let expected = 600.0 * 2.5e-6 + 400.0 * 1.25e-6 + 100.0 * 10.0e-6;
    assert!(approx(breakdown.total_cost, expected));

    let with_write = entry.with_cache_write(3.0);
    let breakdown = price_usage(CostFamily::OpenAi, &with_write, &counts);
    assert!(approx(breakdown.cache_write_cost, 600.0 * 3.0e-6));
}

#[test]
fn test_aggregator_ignores_cache_rates() {
    let entry = PriceEntry::new(2.0, 8.0)
        .with_cache_write(2.5)
        .with_cache_read(0.5);
    let counts = TokenCounts::new(1_000, 1_000)
        .with_cache_write(1_000)
        .with_cache_read(1_000);

    let breakdown = price_usage(CostFamily::Aggregator, &entry, &counts);

    assert!(approx(breakdown.total_cost, 1_000.0 * 2.0e-6 + 1_000.0 * 8.0e-6));
    assert_eq!(breakdown.cache_read_cost, 0.0);
    assert_eq!(breakdown.cache_write_cost, 0.0);
}

#[test]
fn test_search_fee_follows_context_tier() {
    let entry = PriceEntry::new(1.0, 1.0).with_search(0.005, 0.008, 0.012);

    let high = TokenCounts::new(0, 0).with_search(2, SearchContextSize::High);
    assert!(approx(
        price_usage(CostFamily::SearchAugmented, &entry, &high).total_cost,
        0.024
    ));

    let medium = TokenCounts::new(1_000, 1_000).with_search(1, SearchContextSize::Medium);
    assert!(approx(
        price_usage(CostFamily::SearchAugmented, &entry, &medium).total_cost,
        0.008 + 2_000.0 * 1.0e-6
    ));
}

#[test]
fn test_search_tier_defaults_to_low() {
    let entry = PriceEntry::new(1.0, 1.0).with_search(0.005, 0.008, 0.012);
    let counts = TokenCounts {
        search_queries: 1,
        ..Default::default()
    };
    let breakdown = price_usage(CostFamily::SearchAugmented, &entry, &counts);
    assert!(approx(breakdown.search_cost, 0.005));
}

#[test]
fn test_embeddings_bill_input_only() {
    let entry = PriceEntry::new(0.06, 0.0);
    let breakdown = price_usage(CostFamily::Embeddings, &entry, &TokenCounts::new(1_000_000, 5));
    assert!(approx(breakdown.total_cost, 0.06));
}

#[test]
fn test_calculator_uses_builtin_tables() {
    let calculator = CostCalculator::default();
    let counts = TokenCounts::new(1_000_000, 1_000_000);

    let cost = calculator
        .calculate(Vendor::Cerebras, "llama-3.3-70b", &counts)
        .unwrap();
    assert!(approx(cost, 0.85 + 1.20));
}

#[test]
fn test_calculator_date_suffix_fallback() {
    let calculator = CostCalculator::default();
    let counts = TokenCounts::new(1_000, 1_000);
    let dated = calculator
        .cost_for(Vendor::OpenAi, "gpt-4o-mini-2024-07-18", &counts)
        .unwrap();
    let base = calculator
        .cost_for(Vendor::OpenAi, "gpt-4o-mini", &counts)
        .unwrap();
    assert!(dated.is_some());
    assert_eq!(dated, base);
}

#[test]
fn test_unknown_model_is_null_or_zero() {
    let calculator = CostCalculator::default();
    let counts = TokenCounts::new(10, 10);

    assert_eq!(
        calculator
            .cost_for(Vendor::Anthropic, "claude-unknown", &counts)
            .unwrap(),
        None
    );
    assert_eq!(
        calculator
            .calculate(Vendor::Anthropic, "claude-unknown", &counts)
            .unwrap(),
        0.0
    );
}

#[test]
fn test_missing_vendor_table_is_hard_error() {
    let calculator = CostCalculator::new(Arc::new(PricingTable::empty()));
    let err = calculator
        .calculate(Vendor::DeepSeek, "deepseek-chat", &TokenCounts::new(1, 1))
        .unwrap_err();
    assert!(matches!(err, Error::MissingPriceTable(Vendor::DeepSeek)));
}

#[test]
fn test_costs_are_never_negative() {
    let calculator = CostCalculator::default();
    let counts = TokenCounts::new(123, 456)
        .with_cache_write(78)
        .with_cache_read(90)
        .with_search(3, SearchContextSize::High);

    let models: HashMap<Vendor, &str> = HashMap::from([
        (Vendor::OpenAi, "gpt-4o"),
        (Vendor::Anthropic, "claude-sonnet-4-20250514"),
        (Vendor::DeepSeek, "deepseek-reasoner"),
        (Vendor::Cerebras, "qwen-3-32b"),
        (Vendor::OpenRouter, "openai/gpt-4o-mini"),
        (Vendor::Perplexity, "sonar-pro"),
        (Vendor::Voyage, "voyage-3.5"),
    ]);

    for (vendor, model) in models {
        let breakdown = calculator
            .breakdown(vendor, model, &counts)
            .unwrap()
            .unwrap_or_else(|| panic!("no price for {vendor}/{model}"));
        assert!(breakdown.total_cost >= 0.0, "{vendor}/{model}");
        assert!(breakdown.input_cost >= 0.0);
        assert!(breakdown.search_cost >= 0.0);
    }
}

#[test]
fn test_openrouter_catalog_pricing() {
    let calculator = CostCalculator::default();
    let cost = calculator
        .calculate(
            Vendor::OpenRouter,
            "openai/gpt-4o-mini",
            &TokenCounts::new(1_000_000, 1_000_000),
        )
        .unwrap();
    assert!((cost - 0.75).abs() < 1e-9);
}
