//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "buildlight")]
#[command(about = "Buildlight - show a Buildbot builder's health on a Hue light", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (JSON or YAML) [default: config.json]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long = "log", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// List supported colors and exit
    #[arg(long)]
    pub list_colors: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Poll the builder and drive the light until interrupted (default)
    Run,

    /// List supported colors and exit
    ListColors,
}

impl Cli {
    /// Command to execute once flags and defaults are applied
    pub fn resolved_command(&self) -> Commands {
        if self.list_colors {
            Commands::ListColors
        } else {
            self.command.unwrap_or(Commands::Run)
        }
    }
}
