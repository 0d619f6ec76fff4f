//! Wire formatting for tool round-trips
//!
//! Pure mappings from registry definitions, dispatch outcomes and
//! normalized responses into the message shapes each vendor expects on the
//! next request. Anthropic uses content blocks; every other vendor speaks
//! the chat-completions dialect.

use crate::dispatcher::ToolOutcome;
use crate::registry::ToolRegistry;
use meridian_llm::{Response, Vendor};
use serde_json::{json, Map, Value};

/// Tool definitions in the vendor's wire format
#[must_use]
pub fn tool_definitions(vendor: Vendor, registry: &ToolRegistry) -> Vec<Value> {
    match vendor {
        Vendor::Anthropic => registry.anthropic_definitions(),
        _ => registry.definitions(),
    }
}

/// Messages carrying dispatch outcomes back to the model.
///
/// Chat-completions vendors get one `role: "tool"` message per outcome.
/// Anthropic gets a single `user` message holding one `tool_result` block
/// per outcome.
#[must_use]
pub fn tool_result_messages(vendor: Vendor, outcomes: &[ToolOutcome]) -> Vec<Value> {
    if outcomes.is_empty() {
        return Vec::new();
    }

    match vendor {
        Vendor::Anthropic => {
            let blocks: Vec<Value> = outcomes
                .iter()
                .map(|outcome| {
                    let mut block = json!({
                        "type": "tool_result",
                        "tool_use_id": outcome.tool_call_id,
                        "content": outcome.content(),
                    });
                    if !outcome.is_success() {
                        block["is_error"] = Value::Bool(true);
                    }
                    block
                })
                .collect();
            vec![json!({"role": "user", "content": blocks})]
        }
        _ => outcomes
            .iter()
            .map(|outcome| {
                json!({
                    "role": "tool",
                    "tool_call_id": outcome.tool_call_id,
                    "content": outcome.content(),
                })
            })
            .collect(),
    }
}

/// Re-encode the assistant's reply, tool calls included, for the history
/// of the next request
#[must_use]
pub fn assistant_turn(vendor: Vendor, response: &Response) -> Value {
    match vendor {
        Vendor::Anthropic => anthropic_assistant_turn(response),
        _ => chat_assistant_turn(response),
    }
}

fn anthropic_assistant_turn(response: &Response) -> Value {
    let mut blocks = Vec::new();

    if let Some(text) = response.assistant_content.as_deref().filter(|t| !t.is_empty()) {
        blocks.push(json!({"type": "text", "text": text}));
    }

    for call in &response.tool_calls {
        // Anthropic expects the input as an object, not a string
        let input = serde_json::from_str::<Value>(&call.arguments_json)
            .ok()
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::Object(Map::new()));
        blocks.push(json!({
            "type": "tool_use",
            "id": call.id,
            "name": call.function_name,
            "input": input,
        }));
    }

    json!({"role": "assistant", "content": blocks})
}

fn chat_assistant_turn(response: &Response) -> Value {
    let mut message = json!({
        "role": "assistant",
        "content": response.assistant_content,
    });

    if !response.tool_calls.is_empty() {
        let calls: Vec<Value> = response
            .tool_calls
            .iter()
            .map(|call| {
                json!({
                    "id": call.id,
                    "type": "function",
                    "function": {
                        "name": call.function_name,
                        "arguments": call.arguments_json,
                    }
                })
            })
            .collect();
        message["tool_calls"] = Value::Array(calls);
    }

    message
}
