//! Registry - Tool registration and discovery
//!
//! Tools are registered once at startup and looked up by name during
//! dispatch. The registry remembers registration order so that the
//! definitions sent to a model are stable between requests.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tool metadata and schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable description, shown to the model
    pub description: String,
    /// JSON schema for parameters
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition with an empty object schema
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Set the parameters schema
    #[must_use]
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }

    /// Names listed in the schema's `required` array
    #[must_use]
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(Value::as_array)
            .map(|keys| keys.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Vendor-neutral function shape:
    /// `{type: "function", function: {name, description, parameters}}`
    #[must_use]
    pub fn to_function_schema(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }

    /// Anthropic's flat shape: `{name, description, input_schema}`
    #[must_use]
    pub fn to_anthropic_schema(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.parameters,
        })
    }
}

/// Result of a tool execution.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed result
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Whether execution succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Output data of a successful result
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Error message of a failed result
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The JSON envelope sent back to the model
    #[must_use]
    pub fn to_value(&self) -> Value {
        if self.success {
            json!({
                "success": true,
                "data": self.data.clone().unwrap_or(Value::Null),
            })
        } else {
            json!({
                "success": false,
                "error": self.error.clone().unwrap_or_default(),
            })
        }
    }
}

/// Trait for tool implementations.
///
/// Tools must be safe to call concurrently; the dispatcher may run the
/// calls of one batch in parallel.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with given input
    async fn execute(&self, input: Value) -> Result<ToolResult>;

    /// Validate input before execution.
    ///
    /// The default checks that the input is an object holding every key in
    /// the schema's `required` list.
    fn validate_input(&self, input: &Value) -> Result<()> {
        let object = input
            .as_object()
            .ok_or_else(|| Error::InvalidArguments("Input must be an object".to_string()))?;

        for key in self.definition().required_parameters() {
            if !object.contains_key(key) {
                return Err(Error::MissingParameter(key.to_string()));
            }
        }
        Ok(())
    }
}

/// Registry for managing tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A later registration under the same name replaces
    /// the earlier tool but keeps its position.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.definition().name.clone();
        debug!(tool = %name, "Registering tool");
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Register several tools in order
    pub fn register_many<I>(&mut self, tools: I)
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        for tool in tools {
            self.register(tool);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Tool definitions in registration order
    #[must_use]
    pub fn list_definitions(&self) -> Vec<&ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Definitions in the vendor-neutral function shape
    #[must_use]
    pub fn definitions(&self) -> Vec<Value> {
        self.list_definitions()
            .into_iter()
            .map(ToolDefinition::to_function_schema)
            .collect()
    }

    /// Definitions in Anthropic's `input_schema` shape
    #[must_use]
    pub fn anthropic_definitions(&self) -> Vec<Value> {
        self.list_definitions()
            .into_iter()
            .map(ToolDefinition::to_anthropic_schema)
            .collect()
    }

    /// Get tool count
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .finish()
    }
}
