//! Exchange Latency Tester
//!
//! Measures the round-trip latency of the unauthenticated "server time" REST
//! endpoint of several cryptocurrency exchanges, prints a summary and writes
//! the results to a timestamped JSON file.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod persistence;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{ExchangeProber, RunOutcome, SequentialRunner};
pub use models::{Config, ProbeOutcome, ProbeResult, ResultsSet};
pub use output::{OutputFormatter, OutputFormatterFactory};
pub use persistence::{ResultsPersister, SavedResults};
pub use types::{Exchange, TestType};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);
    pub const DEFAULT_EXCHANGES: &[&str] = &["binance", "bybit", "gateio"];
    pub const DEFAULT_USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
    pub const DEFAULT_ACCEPT: &str = "application/json";
    pub const DEFAULT_OUTPUT_DIR: &str = ".";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const RESULTS_FILE_PREFIX: &str = "latency_test_results_";
}
