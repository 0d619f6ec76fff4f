use meridian_llm::{
    extract_thinking, normalize, CostCalculator, Error, PriceEntry, PricingTable,
    SearchContextSize, TokenCounts, Vendor,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_thinking_extraction_is_idempotent() {
    let inputs = [
        "<thinking>step 1\nstep 2</thinking>\nFinal answer.",
        "<think>a</think>b<think>c</think>",
        "no tags here",
        "<thinking>x</thinking><think>y</think>z",
    ];

    for input in inputs {
        let once = extract_thinking(input);
        let twice = extract_thinking(&once.visible);
        if twice.reasoning.is_none() {
            assert_eq!(twice.visible, once.visible, "input: {input:?}");
        }
    }
}

#[test]
fn test_long_form_keeps_leading_newline() {
    let split = extract_thinking("<thinking>step 1\nstep 2</thinking>\nFinal answer.");
    assert_eq!(split.reasoning.as_deref(), Some("step 1\nstep 2"));
    assert_eq!(split.visible, "\nFinal answer.");
}

#[test]
fn test_cost_is_never_negative() {
    let calculator = CostCalculator::default();
    let counts = [
        TokenCounts::new(0, 0),
        TokenCounts::new(1, 1),
        TokenCounts::new(123_456, 7_890)
            .with_cache_write(1_000)
            .with_cache_read(2_000)
            .with_search(3, SearchContextSize::High),
    ];
    let models = [
        (Vendor::OpenAi, "gpt-4o-mini-2024-07-18"),
        (Vendor::Anthropic, "claude-sonnet-4-20250514"),
        (Vendor::DeepSeek, "deepseek-reasoner"),
        (Vendor::Cerebras, "llama3.1-8b"),
        (Vendor::OpenRouter, "openai/gpt-4o-mini"),
        (Vendor::Perplexity, "sonar-pro"),
        (Vendor::Voyage, "voyage-3.5"),
        (Vendor::OpenAi, "not-a-model"),
    ];

    for (vendor, model) in models {
        for count in &counts {
            let cost = calculator.calculate(vendor, model, count).unwrap();
            assert!(cost >= 0.0, "{vendor}/{model} priced at {cost}");
        }
    }
}

#[test]
fn test_date_suffix_resolves_to_base_row() {
    let mut table = PricingTable::empty();
    table.insert(Vendor::OpenAi, "gpt-4o-mini", PriceEntry::new(0.15, 0.60));
    let calculator = CostCalculator::new(Arc::new(table));
    let counts = TokenCounts::new(1_000_000, 1_000_000);

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
fn test_missing_vendor_table_is_fatal() {
    let calculator = CostCalculator::new(Arc::new(PricingTable::empty()));
    let err = calculator
        .calculate(Vendor::Perplexity, "sonar", &TokenCounts::new(1, 1))
        .unwrap_err();
    assert!(matches!(err, Error::MissingPriceTable(Vendor::Perplexity)));
}

#[test]
fn test_normalize_never_reports_negative_cost() {
    let raw = json!({
        "id": "gen-2",
        "model": "openrouter/auto",
        "choices": [{"message": {"content": "x"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 10}
    });

    // catalog rows with negative sentinel prices are dropped, not priced
    let response = normalize("openrouter", raw).unwrap();
    assert_eq!(response.cost, None);
}
