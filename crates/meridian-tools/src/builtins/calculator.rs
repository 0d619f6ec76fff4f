//! Calculator Tool
//!
//! Basic arithmetic on two operands. Integer operands stay integers for
//! add, subtract and multiply so `5 + 3` reports `8`, not `8.0`.

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use serde::Deserialize;
use serde_json::{json, Number, Value};
use tracing::debug;

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

#[derive(Debug, Deserialize)]
struct CalculatorInput {
    operation: Operation,
    a: Number,
    b: Number,
}

/// Calculator tool
pub struct CalculatorTool {
    definition: ToolDefinition,
}

impl CalculatorTool {
    /// Create a new calculator tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "calculator",
            "Perform basic arithmetic: add, subtract, multiply or divide two numbers",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["add", "subtract", "multiply", "divide"],
                    "description": "The arithmetic operation to perform"
                },
                "a": {"type": "number", "description": "First operand"},
                "b": {"type": "number", "description": "Second operand"}
            },
            "required": ["operation", "a", "b"]
        }));

        Self { definition }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

fn compute(operation: Operation, a: &Number, b: &Number) -> Result<Value> {
    if operation != Operation::Divide {
        if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
            let exact = match operation {
                Operation::Add => x.checked_add(y),
                Operation::Subtract => x.checked_sub(y),
                _ => x.checked_mul(y),
            };
            if let Some(n) = exact {
                return Ok(Value::from(n));
            }
        }
    }

    let (x, y) = match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(Error::InvalidArguments("Operands must be numbers".to_string())),
    };

    let value = match operation {
        Operation::Add => x + y,
        Operation::Subtract => x - y,
        Operation::Multiply => x * y,
        Operation::Divide => {
            if y == 0.0 {
                return Err(Error::Execution("Division by zero".to_string()));
            }
            x / y
        }
    };

    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| Error::Execution("Result is not a finite number".to_string()))
}

#[async_trait::async_trait]
impl Tool for CalculatorTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        self.validate_input(&input)?;

        let params: CalculatorInput = serde_json::from_value(input)
            .map_err(|e| Error::InvalidArguments(format!("Invalid calculator parameters: {e}")))?;

        let result = compute(params.operation, &params.a, &params.b)?;
        debug!(operation = params.operation.as_str(), %result, "Calculated");

        Ok(ToolResult::success(json!({
            "result": result,
            "operation": params.operation.as_str(),
            "a": params.a,
            "b": params.b,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(input: Value) -> Result<ToolResult> {
        CalculatorTool::new().execute(input).await
    }

    #[tokio::test]
    async fn test_integer_add() {
        let result = run(json!({"operation": "add", "a": 5, "b": 3})).await.unwrap();
        assert_eq!(
            result.data(),
            Some(&json!({"result": 8, "operation": "add", "a": 5, "b": 3}))
        );
    }

    #[tokio::test]
    async fn test_float_operands() {
        let result = run(json!({"operation": "multiply", "a": 1.5, "b": 4})).await.unwrap();
        assert_eq!(result.data().unwrap()["result"], json!(6.0));

        let result = run(json!({"operation": "subtract", "a": 2, "b": 5})).await.unwrap();
        assert_eq!(result.data().unwrap()["result"], json!(-3));
    }

    #[tokio::test]
    async fn test_divide() {
        let result = run(json!({"operation": "divide", "a": 10, "b": 4})).await.unwrap();
        assert_eq!(result.data().unwrap()["result"], json!(2.5));
    }

    #[tokio::test]
    async fn test_division_by_zero() {
        let err = run(json!({"operation": "divide", "a": 10, "b": 0})).await.unwrap_err();
        assert!(matches!(err, Error::Execution(_)));
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[tokio::test]
    async fn test_integer_overflow_falls_back_to_float() {
        let result = run(json!({"operation": "add", "a": i64::MAX, "b": 1})).await.unwrap();
        assert!(result.data().unwrap()["result"].is_f64());
    }

    #[tokio::test]
    async fn test_missing_and_invalid_parameters() {
        let err = run(json!({"operation": "add", "a": 1})).await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter(ref key) if key == "b"));

        let err = run(json!({"operation": "modulo", "a": 1, "b": 2})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }
}
