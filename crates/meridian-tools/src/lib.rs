//! Meridian Tools - Tool Registry and Dispatch
//!
//! This crate provides the tool-calling side of Meridian:
//! - Registry: tool registration, lookup and schema export
//! - Dispatcher: executes model-requested tool calls
//! - Format: per-vendor tool definitions, results and assistant turns
//! - Builtins: calculator and current time

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod registry;

pub use builtins::register_builtins;
pub use dispatcher::{ToolDispatcher, ToolOutcome};
pub use error::{Error, Result};
pub use format::{assistant_turn, tool_definitions, tool_result_messages};
pub use registry::{Tool, ToolDefinition, ToolRegistry, ToolResult};
