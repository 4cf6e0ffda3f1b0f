//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// logship - polling log-tailing and forwarding agent
#[derive(Parser, Debug)]
#[command(
    name = "logship",
    author,
    version,
    about = "Polling log-tailing and forwarding agent",
    long_about = "Watches append-only log files for growth, truncation, appearance and \n\
                  disappearance, and forwards newly written bytes to configured \n\
                  destinations (local file, UDP syslog, HTTP endpoint)."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOGSHIP_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "LOGSHIP_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitoring and forwarding agent
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),

    /// Append synthetic log lines to a file (load/testing helper)
    Generate(GenerateArgs),

    /// Watch a directory for create/delete/modify of its entries
    Watch(WatchArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "logship.toml", env = "LOGSHIP_CONFIG")]
    pub config: PathBuf,

    /// Override the global poll interval in seconds
    #[arg(long, env = "LOGSHIP_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Validate configuration and exit without running the agent
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "logship.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "logship.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `generate` command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// File the synthetic log lines are appended to
    #[arg(
        short,
        long,
        default_value = "source_logs/systemlogs.log",
        env = "LOGSHIP_GENERATE_TARGET"
    )]
    pub target: PathBuf,

    /// Minimum delay between lines, milliseconds
    #[arg(long, default_value = "500")]
    pub min_delay_ms: u64,

    /// Maximum delay between lines, milliseconds
    #[arg(long, default_value = "3000")]
    pub max_delay_ms: u64,

    /// Number of lines to generate (0 = until interrupted)
    #[arg(long, default_value = "0")]
    pub count: u64,
}

/// Arguments for the `watch` command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Directory to watch
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Seconds between directory snapshots
    #[arg(long, default_value = "2")]
    pub interval: u64,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
