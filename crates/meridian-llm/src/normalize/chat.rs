//! Chat-completions payloads (`choices[0].message`)
//!
//! Shared by OpenAI, DeepSeek, Cerebras, OpenRouter and Perplexity. The
//! vendors differ only in how usage is reported, where native reasoning
//! lives, and Perplexity's citations.

use super::{status_code, str_at, u64_at, Extracted, VendorError};
use crate::error::{Error, Result};
use crate::response::{SearchContextSize, ToolCallRequest, Usage};
use crate::vendor::Vendor;
use serde_json::Value;

pub(crate) fn error(raw: &Value) -> Option<VendorError> {
    let error = raw.get("error").filter(|e| !e.is_null())?;

    if let Some(message) = error.as_str() {
        return Some(VendorError {
            message: message.to_string(),
            status: status_code(raw.get("status")),
        });
    }

    let message = str_at(error, "/message").unwrap_or_else(|| error.to_string());
    let status = status_code(error.get("code"))
        .or_else(|| status_code(error.get("status")))
        .or_else(|| status_code(raw.get("status")));

    Some(VendorError { message, status })
}

pub(crate) fn extract(vendor: Vendor, raw: &Value) -> Result<Extracted> {
    let choice = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| Error::InvalidResponse(format!("{vendor} response has no choices")))?;

    let null = Value::Null;
    let message = choice.get("message").unwrap_or(&null);

    let tool_calls = message
        .get("tool_calls")
        .and_then(Value::as_array)
        .map(|calls| calls.iter().map(parse_tool_call).collect())
        .unwrap_or_default();

    let reasoning = match vendor {
        Vendor::DeepSeek => str_at(message, "/reasoning_content"),
        Vendor::OpenRouter => str_at(message, "/reasoning"),
        _ => None,
    };

    let usage = raw
        .get("usage")
        .filter(|u| u.is_object())
        .map(|u| usage_for(vendor, u));

    let citations = match vendor {
        Vendor::Perplexity => citations(raw),
        _ => None,
    };

    Ok(Extracted {
        id: str_at(raw, "/id").unwrap_or_default(),
        model: str_at(raw, "/model").unwrap_or_default(),
        content: str_at(message, "/content"),
        reasoning,
        finish_reason: str_at(choice, "/finish_reason"),
        tool_calls,
        usage,
        citations,
        embeddings: None,
    })
}

fn parse_tool_call(call: &Value) -> ToolCallRequest {
    let arguments = match call.pointer("/function/arguments") {
        Some(Value::String(args)) => args.clone(),
        Some(Value::Null) | None => "{}".to_string(),
        Some(other) => other.to_string(),
    };

    ToolCallRequest {
        id: str_at(call, "/id").unwrap_or_default(),
        function_name: str_at(call, "/function/name").unwrap_or_default(),
        arguments_json: arguments,
    }
}

fn usage_for(vendor: Vendor, usage: &Value) -> Usage {
    let prompt = u64_at(usage, "/prompt_tokens");
    let completion = u64_at(usage, "/completion_tokens");
    let total = u64_at(usage, "/total_tokens");
    let cached = u64_at(usage, "/prompt_tokens_details/cached_tokens");

    match vendor {
        Vendor::DeepSeek => {
            let hit = u64_at(usage, "/prompt_cache_hit_tokens");
            let miss = u64_at(usage, "/prompt_cache_miss_tokens")
                .or_else(|| prompt.map(|p| p.saturating_sub(hit.unwrap_or(0))));
            Usage {
                input_tokens: miss,
                output_tokens: completion,
                cache_write_tokens: miss,
                cache_read_tokens: hit,
                total_tokens: total,
                ..Default::default()
            }
        }
        Vendor::Perplexity => Usage {
            input_tokens: prompt,
            output_tokens: completion,
            total_tokens: total,
            search_queries: u64_at(usage, "/num_search_queries"),
            search_context_size: usage
                .get("search_context_size")
                .and_then(Value::as_str)
                .and_then(SearchContextSize::from_label),
            ..Default::default()
        },
        Vendor::OpenRouter => Usage {
            input_tokens: prompt,
            output_tokens: completion,
            cache_read_tokens: cached,
            total_tokens: total,
            ..Default::default()
        },
        _ => Usage {
            input_tokens: prompt.map(|p| p.saturating_sub(cached.unwrap_or(0))),
            output_tokens: completion,
            cache_read_tokens: cached,
            total_tokens: total,
            ..Default::default()
        },
    }
}

fn citations(raw: &Value) -> Option<Vec<String>> {
    if let Some(list) = raw.get("citations").and_then(Value::as_array) {
        return Some(
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        );
    }

    raw.get("search_results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|r| str_at(r, "/url"))
                .collect()
        })
}
