//! Current Time Tool

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
struct TimeInput {
    #[serde(default)]
    format: Option<String>,
}

/// Reports the current UTC time
pub struct CurrentTimeTool {
    definition: ToolDefinition,
}

impl CurrentTimeTool {
    /// Create a new current-time tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "current_time",
            "Get the current date and time in UTC",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "description": "Optional strftime format, e.g. '%Y-%m-%d'. Defaults to RFC 3339"
                }
            },
            "required": []
        }));

        Self { definition }
    }
}

impl Default for CurrentTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

fn render(now: DateTime<Utc>, format: Option<&str>) -> Result<String> {
    let Some(format) = format else {
        return Ok(now.to_rfc3339_opts(SecondsFormat::Secs, true));
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidArguments(format!(
            "Invalid time format: {format}"
        )));
    }
    Ok(now.format_with_items(items.into_iter()).to_string())
}

#[async_trait::async_trait]
impl Tool for CurrentTimeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        self.validate_input(&input)?;

        let params: TimeInput = serde_json::from_value(input)
            .map_err(|e| Error::InvalidArguments(format!("Invalid time parameters: {e}")))?;

        let now = Utc::now();
        let formatted = render(now, params.format.as_deref())?;

        Ok(ToolResult::success(json!({
            "time": formatted,
            "timezone": "UTC",
            "unix_timestamp": now.timestamp(),
        })))
    }
}
