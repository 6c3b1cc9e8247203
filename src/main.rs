//! Exchange Latency Tester - Main CLI Application
//!
//! Probes each configured exchange's server-time endpoint once, prints a
//! summary and saves the results as JSON.

use clap::Parser;
use exchange_latency_tester::{app::run_application, cli::Cli};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    // Only startup failures reach here; run errors are logged inside.
    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);
        process::exit(2);
    }
}
