//! CLI interface for sentibal
//!
//! Provides subcommands for:
//! - `run`: Drive the strategy over a session range
//! - `pipeline`: Print the pipeline output for one session
//! - `status`: Show current state
//! - `config`: Show configuration

mod pipeline;
mod run;

pub use pipeline::PipelineArgs;
pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sentibal")]
#[command(about = "Weekly sentiment-driven long/short rebalancing engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive the strategy over a session range
    Run(RunArgs),
    /// Print the pipeline output for one session
    Pipeline(PipelineArgs),
    /// Show current state
    Status,
    /// Show configuration
    Config,
}
