//! Data models and structures for the exchange latency tester

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use probe::{ProbeOutcome, ProbeRecord, ProbeResult, ResultsSet, SUCCESS_STATUS};
