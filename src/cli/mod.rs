//! CLI module for Meridian
//!
//! Provides commands:
//! - `normalize`: map a saved vendor payload into the canonical response
//! - `price`: price token counts for a vendor and model
//! - `tools`: print the built-in tool definitions in a vendor's format

use clap::{Parser, Subcommand};
use meridian_llm::{MeridianConfig, Vendor};
use meridian_tools::{register_builtins, tool_definitions, ToolRegistry};
use std::path::PathBuf;

pub mod normalize;
pub mod price;

/// Meridian CLI
#[derive(Parser, Debug)]
#[command(name = "meridian")]
#[command(about = "Normalize LLM vendor responses, price usage and run tool calls")]
#[command(version)]
pub struct Cli {
    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a saved vendor payload
    Normalize(normalize::NormalizeArgs),
    /// Price token usage
    Price(price::PriceArgs),
    /// Print built-in tool definitions
    Tools {
        /// Vendor whose wire format to use
        #[arg(long, default_value = "openai")]
        vendor: Vendor,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => MeridianConfig::load_from(path)?,
        None => MeridianConfig::load()?,
    };

    match cli.command {
        Some(Commands::Normalize(args)) => normalize::run(&config, args).await,
        Some(Commands::Price(args)) => price::run(&config, args),
        Some(Commands::Tools { vendor }) => {
            let registry = builtin_registry();
            let definitions = tool_definitions(vendor, &registry);
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(())
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

pub(crate) fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    registry
}
