//! Builtins - Built-in tools for Meridian
//!
//! - calculator: four-function arithmetic
//! - current_time: current UTC time

mod calculator;
mod time;

pub use calculator::CalculatorTool;
pub use time::CurrentTimeTool;

use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Register all built-in tools with the registry
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(CalculatorTool::new()));
    registry.register(Arc::new(CurrentTimeTool::new()));
}
