//! CLI for the fac split-archive combiner.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_combine, run_fetch, run_pipeline, run_status};

/// Top-level CLI for the fac split-archive combiner.
#[derive(Debug, Parser)]
#[command(name = "fac")]
#[command(about = "fac: fetch and reassemble split FreeBSD release archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch and combine every component in the release configuration.
    Run {
        /// Path to the TOML release configuration.
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Keep processing remaining components after one fails.
        #[arg(long)]
        keep_going: bool,
    },

    /// Download missing parts without combining them.
    Fetch {
        /// Path to the TOML release configuration.
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Only process the component with this directory name.
        #[arg(long, value_name = "DIR")]
        component: Option<String>,
    },

    /// Combine already-fetched parts without touching the network.
    Combine {
        /// Path to the TOML release configuration.
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Only process the component with this directory name.
        #[arg(long, value_name = "DIR")]
        component: Option<String>,
    },

    /// Show per-component fetch/combine state.
    Status {
        /// Path to the TOML release configuration.
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        match cli.command {
            CliCommand::Run { config, keep_going } => run_pipeline(&config, keep_going),
            CliCommand::Fetch { config, component } => run_fetch(&config, component.as_deref()),
            CliCommand::Combine { config, component } => {
                run_combine(&config, component.as_deref())
            }
            CliCommand::Status { config } => run_status(&config),
        }
    }
}
