//! Command-line interface
//!
//! Every flag is optional; running without arguments performs one full run
//! against the default exchanges.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Exchange Latency Tester - measures REST latency to exchange server-time endpoints
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "exchange-latency-tester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Write results to this file instead of a timestamped name
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Pause after each exchange in milliseconds
    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,

    /// Exchange to probe (can be used multiple times; replaces the default list)
    #[arg(short, long = "exchange", value_name = "ID", action = ArgAction::Append)]
    pub exchanges: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Skip writing the results file
    #[arg(long)]
    pub no_save: bool,
}
