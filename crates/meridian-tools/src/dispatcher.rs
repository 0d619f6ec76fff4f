//! Dispatcher - Tool-call execution
//!
//! Runs the tool calls a model requested and packages every outcome,
//! success or failure, as a [`ToolResult`]. Dispatch never fails: bad
//! arguments, unknown names, tool errors and tool panics are all reported
//! back to the model inside the result payload.

use crate::registry::{ToolRegistry, ToolResult};
use futures::FutureExt;
use meridian_llm::ToolCallRequest;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Outcome of one tool call, correlated by the vendor's call id
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    /// Vendor-assigned id of the originating call
    pub tool_call_id: String,
    /// Name of the requested tool
    pub function_name: String,
    /// Structured result
    pub result: ToolResult,
}

impl ToolOutcome {
    fn new(call: &ToolCallRequest, result: ToolResult) -> Self {
        Self {
            tool_call_id: call.id.clone(),
            function_name: call.function_name.clone(),
            result,
        }
    }

    /// The JSON-serialized result, as placed in the follow-up message
    #[must_use]
    pub fn content(&self) -> String {
        self.result.to_value().to_string()
    }

    /// Whether the tool ran and succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

/// Executes model-requested tool calls against a registry
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolDispatcher {
    /// Create a dispatcher over a populated registry
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Get the registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute every call, returning one outcome per call in input order.
    ///
    /// Calls are independent and run concurrently.
    #[instrument(skip_all, fields(calls = calls.len()))]
    pub async fn execute_all(&self, calls: &[ToolCallRequest]) -> Vec<ToolOutcome> {
        let futures = calls.iter().map(|call| self.execute_one(call));
        futures::future::join_all(futures).await
    }

    /// Execute a single call
    pub async fn execute_one(&self, call: &ToolCallRequest) -> ToolOutcome {
        let result = self.run(call).await;
        debug!(
            tool = %call.function_name,
            call_id = %call.id,
            success = result.is_success(),
            "Tool call completed"
        );
        ToolOutcome::new(call, result)
    }

    async fn run(&self, call: &ToolCallRequest) -> ToolResult {
        let input: Value = match serde_json::from_str(&call.arguments_json) {
            Ok(input) => input,
            Err(e) => {
                warn!(tool = %call.function_name, error = %e, "Malformed tool arguments");
                return ToolResult::failure("Invalid JSON in tool arguments");
            }
        };

        let Some(tool) = self.registry.get(&call.function_name) else {
            warn!(tool = %call.function_name, "Model requested an unregistered tool");
            return ToolResult::failure(format!("Tool '{}' not found", call.function_name));
        };

        // a panicking tool fails its own call, not the batch
        let execution = AssertUnwindSafe(async move { tool.execute(input).await });
        match execution.catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!(tool = %call.function_name, error = %e, "Tool execution failed");
                ToolResult::failure(format!("Tool execution failed: {e}"))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(tool = %call.function_name, panic = %message, "Tool panicked");
                ToolResult::failure(format!("Tool execution failed: {message}"))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_string()
    }
}
