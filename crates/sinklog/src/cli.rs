//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sinklog")]
#[command(version, about = "Leveled logging to the console or to rotating log files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Logger settings shared by every command; flags override the config file
#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: sinklog.toml/yaml/yml/json in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output method: console or file
    #[arg(long, global = true)]
    pub method: Option<String>,

    /// Minimum severity to write
    #[arg(long, global = true)]
    pub level: Option<String>,

    /// Log directory (file method)
    #[arg(long, global = true)]
    pub dir: Option<String>,

    /// Main log file name (file method)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Rotation threshold in bytes (file method)
    #[arg(long, global = true)]
    pub max_size: Option<u64>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log one message
    Emit(EmitArgs),

    /// Show the end of the main or error log
    Tail(TailArgs),

    /// Show the resolved settings, log files, and backups
    Check,
}

#[derive(Args)]
pub struct EmitArgs {
    /// Severity: debug, trace, info, warn, error, panic, fatal
    pub severity: String,

    /// Message text
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

#[derive(Args)]
pub struct TailArgs {
    /// Number of lines to show, continuing into rotated backups
    #[arg(short = 'n', long, default_value = "20")]
    pub lines: usize,

    /// Read the error-only log instead of the main log
    #[arg(long)]
    pub err: bool,

    /// Only show lines matching this regex
    #[arg(long)]
    pub grep: Option<String>,

    /// Keep printing new lines (follows rotation)
    #[arg(short, long)]
    pub follow: bool,
}
