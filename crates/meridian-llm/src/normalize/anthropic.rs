//! Anthropic messages payloads

use super::{str_at, sum_reported, u64_at, Extracted, VendorError};
use crate::error::{Error, Result};
use crate::response::{ToolCallRequest, Usage};
use serde_json::Value;

/// HTTP status Anthropic documents for each error type
fn status_for_error_type(error_type: &str) -> Option<u16> {
    match error_type {
        "invalid_request_error" => Some(400),
        "authentication_error" => Some(401),
        "billing_error" => Some(402),
        "permission_error" => Some(403),
        "not_found_error" => Some(404),
        "request_too_large" => Some(413),
        "rate_limit_error" => Some(429),
        "api_error" => Some(500),
        "overloaded_error" => Some(529),
        _ => None,
    }
}

pub(crate) fn error(raw: &Value) -> Option<VendorError> {
    let is_error_type = raw.get("type").and_then(Value::as_str) == Some("error");
    let error = raw.get("error").filter(|e| !e.is_null())?;
    if !is_error_type && !error.is_object() {
        return None;
    }

    let message = str_at(error, "/message").unwrap_or_else(|| error.to_string());
    let status = error
        .get("type")
        .and_then(Value::as_str)
        .and_then(status_for_error_type);

    Some(VendorError { message, status })
}

pub(crate) fn extract(raw: &Value) -> Result<Extracted> {
    let blocks = raw
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidResponse("anthropic response has no content".to_string()))?;

    let mut text: Option<String> = None;
    let mut thinking: Option<String> = None;
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block.get("type").and_then(Value::as_str) {
            Some("text") => {
                if let Some(part) = block.get("text").and_then(Value::as_str) {
                    text.get_or_insert_with(String::new).push_str(part);
                }
            }
            Some("tool_use") => {
                let input = block.get("input").cloned().unwrap_or(Value::Object(Default::default()));
                tool_calls.push(ToolCallRequest {
                    id: str_at(block, "/id").unwrap_or_default(),
                    function_name: str_at(block, "/name").unwrap_or_default(),
                    arguments_json: serde_json::to_string(&input)
                        .unwrap_or_else(|_| "{}".to_string()),
                });
            }
            Some("thinking") => {
                if let Some(part) = block.get("thinking").and_then(Value::as_str) {
                    thinking.get_or_insert_with(String::new).push_str(part);
                }
            }
            _ => {}
        }
    }

    let usage = raw.get("usage").filter(|u| u.is_object()).map(|u| {
        let input_tokens = u64_at(u, "/input_tokens");
        let output_tokens = u64_at(u, "/output_tokens");
        let cache_write_tokens = u64_at(u, "/cache_creation_input_tokens");
        let cache_read_tokens = u64_at(u, "/cache_read_input_tokens");
        Usage {
            input_tokens,
            output_tokens,
            cache_write_tokens,
            cache_read_tokens,
            total_tokens: sum_reported(&[
                input_tokens,
                output_tokens,
                cache_write_tokens,
                cache_read_tokens,
            ]),
            ..Default::default()
        }
    });

    Ok(Extracted {
        id: str_at(raw, "/id").unwrap_or_default(),
        model: str_at(raw, "/model").unwrap_or_default(),
        content: text,
        reasoning: thinking,
        finish_reason: str_at(raw, "/stop_reason"),
        tool_calls,
        usage,
        ..Default::default()
    })
}
