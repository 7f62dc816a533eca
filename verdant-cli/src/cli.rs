//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verdant - database readiness check for the sustainability dashboard
#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(version)]
#[command(about = "Verdant - check that the dashboard database is reachable", long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `check`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the default `check` command
    #[command(flatten)]
    pub check: CheckArgs,
}

impl Cli {
    /// The command to run, with `check` as the no-argument default.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Check(self.check))
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe the database with bounded retries (default)
    Check(CheckArgs),

    /// Parse the connection string and show its parts
    Parse(ParseArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Check Command
// =============================================================================

/// Arguments for the `check` command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Connection URL (overrides the environment variable)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Environment variable holding the connection URL [default: DATABASE_URL]
    #[arg(short, long)]
    pub env_var: Option<String>,

    /// Path to a verdant.toml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of connection attempts [default: 5]
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Seconds to wait between attempts [default: 2]
    #[arg(short = 'd', long)]
    pub retry_delay: Option<u64>,

    /// Seconds allowed for a single connection attempt [default: 10]
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout: Option<u64>,

    /// Delay strategy between attempts
    #[arg(short, long)]
    pub backoff: Option<BackoffKind>,
}

/// Delay strategy between attempts
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// Constant delay
    #[default]
    Fixed,
    /// Capped exponential delay with jitter
    Exponential,
}

impl std::fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackoffKind::Fixed => write!(f, "fixed"),
            BackoffKind::Exponential => write!(f, "exponential"),
        }
    }
}

// =============================================================================
// Parse Command
// =============================================================================

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Connection URL (overrides the environment variable)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Environment variable holding the connection URL [default: DATABASE_URL]
    #[arg(short, long)]
    pub env_var: Option<String>,

    /// Path to a verdant.toml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
