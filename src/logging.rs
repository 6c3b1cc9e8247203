//! Structured logging for the exchange latency tester
//!
//! Progress lines (timestamp, level, message) go to stderr through a
//! `tracing-subscriber` fmt layer. The final summary is rendered separately
//! by [`crate::output`] and never passes through this sink.

use crate::error::{AppError, Result};
use crate::models::Config;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Timestamp layout of log lines
const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - detailed information for debugging
    Debug = 1,
    /// Info level - general application information
    Info = 2,
    /// Warning level - potentially harmful situations
    Warn = 3,
    /// Error level - error events but application can continue
    Error = 4,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Filter directive for this crate at this level
    pub fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.as_str().to_lowercase())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!(
                "Invalid log level: {}. Valid levels are: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

/// Build the filter: `RUST_LOG` wins when set, otherwise the configured level
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,{}", level.directive()))
    })
}

/// Install the global log subscriber
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging(config: &Config) -> Result<()> {
    let level = config.effective_log_level()?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_target(config.debug)
        .with_ansi(config.enable_color);

    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(layer)
        .try_init();

    Ok(())
}
