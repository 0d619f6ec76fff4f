//! `meridian normalize` - replay a saved vendor payload

use anyhow::Context;
use clap::Args;
use meridian_llm::{MeridianConfig, Normalizer, Vendor};
use meridian_tools::{assistant_turn, tool_result_messages, ToolDispatcher};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Arguments for `normalize`
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Vendor that produced the payload
    #[arg(long)]
    pub vendor: Vendor,

    /// Path to the decoded JSON payload
    pub file: PathBuf,

    /// Run requested tool calls against the built-in tools
    #[arg(long)]
    pub execute_tools: bool,

    /// Include the raw payload in the output
    #[arg(long)]
    pub with_raw: bool,
}

pub async fn run(config: &MeridianConfig, args: NormalizeArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    let normalizer = Normalizer::from_config(&config.pricing)?;
    let response = normalizer.normalize(args.vendor, raw)?;
    info!(
        vendor = %response.vendor,
        model = %response.model,
        status = ?response.status,
        cost = ?response.cost,
        "Normalized payload"
    );

    let mut output = serde_json::to_value(&response)?;
    if !args.with_raw {
        if let Some(object) = output.as_object_mut() {
            object.remove("raw_response");
        }
    }

    if args.execute_tools && response.has_tool_calls() {
        let dispatcher = ToolDispatcher::new(Arc::new(super::builtin_registry()));
        let outcomes = dispatcher.execute_all(&response.tool_calls).await;

        let mut follow_up = vec![assistant_turn(args.vendor, &response)];
        follow_up.extend(tool_result_messages(args.vendor, &outcomes));
        output = json!({
            "response": output,
            "follow_up_messages": follow_up,
        });
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
