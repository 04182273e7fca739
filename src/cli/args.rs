//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Campfire - Resolve deployment config from remote app templates.
#[derive(Debug, Parser)]
#[command(name = "campfire")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the app registry (overrides ~/.config/campfire/config.yml)
    #[arg(short, long, global = true, env = "CAMPFIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch, render, and print the config for an app and its dependencies
    Process(ProcessArgs),

    /// List apps in the registry
    Apps(AppsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output encoding for the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the `process` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProcessArgs {
    /// App to process
    pub app: String,

    /// Namespace the config is rendered for
    #[arg(short, long)]
    pub namespace: String,

    /// Do not pull in ClowdApp dependencies
    #[arg(long)]
    pub no_get_dependencies: bool,

    /// Override a parameter for one app (repeatable)
    #[arg(short = 'p', long = "set-parameter", value_name = "APP/KEY=VALUE")]
    pub set_parameter: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// HTTP timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `apps` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AppsArgs {
    /// Print names only
    #[arg(long)]
    pub names_only: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
