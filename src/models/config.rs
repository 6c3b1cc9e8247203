//! Configuration data model and validation

use crate::logging::LogLevel;
use crate::types::{AppError, Exchange, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Exchanges to probe, in probe order
    pub exchanges: Vec<Exchange>,

    /// Endpoint overrides keyed by exchange
    pub endpoint_overrides: HashMap<Exchange, String>,

    /// Request timeout duration
    pub timeout_seconds: u64,

    /// Pause after each exchange probe, in milliseconds
    pub pause_ms: u64,

    /// Directory for generated result files
    pub output_dir: PathBuf,

    /// Explicit result file path, bypassing the generated name
    pub output_file: Option<PathBuf>,

    /// Persist results after the run
    pub save_results: bool,

    /// Minimum log level
    pub log_level: String,

    /// Enable colored terminal output
    pub enable_color: bool,

    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchanges: default_exchanges(),
            endpoint_overrides: HashMap::new(),
            timeout_seconds: default_timeout_secs(),
            pause_ms: default_pause_ms(),
            output_dir: default_output_dir(),
            output_file: None,
            save_results: default_save_results(),
            log_level: default_log_level(),
            enable_color: default_enable_color(),
            debug: false,
        }
    }
}

impl Config {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Get the inter-exchange pause as Duration
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Effective log level; debug mode wins over the configured level
    pub fn effective_log_level(&self) -> Result<LogLevel> {
        if self.debug {
            return Ok(LogLevel::Debug);
        }
        self.log_level.parse()
    }

    /// Endpoint for one exchange, honoring overrides
    pub fn endpoint(&self, exchange: Exchange) -> String {
        self.endpoint_overrides
            .get(&exchange)
            .cloned()
            .unwrap_or_else(|| exchange.default_endpoint().to_string())
    }

    /// Endpoint table covering every supported exchange
    pub fn endpoints(&self) -> HashMap<Exchange, String> {
        Exchange::ALL
            .iter()
            .map(|&exchange| (exchange, self.endpoint(exchange)))
            .collect()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.exchanges.is_empty() {
            return Err(AppError::config("At least one exchange must be configured"));
        }

        for (exchange, endpoint) in &self.endpoint_overrides {
            match url::Url::parse(endpoint) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        return Err(AppError::config(format!(
                            "Endpoint for {} must use http or https: {}",
                            exchange, endpoint
                        )));
                    }
                }
                Err(e) => {
                    return Err(AppError::config(format!(
                        "Invalid endpoint for {} '{}': {}",
                        exchange, endpoint, e
                    )));
                }
            }
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > 300 {
            return Err(AppError::config("Timeout cannot exceed 300 seconds"));
        }

        if self.pause_ms > 60_000 {
            return Err(AppError::config("Pause cannot exceed 60000 milliseconds"));
        }

        self.log_level
            .parse::<LogLevel>()
            .map_err(|e| AppError::config(e.to_string()))?;

        Ok(())
    }

    /// Merge values from an arbitrary key lookup, using the environment variable names
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(exchanges) = lookup("EXCHANGES") {
            self.exchanges = exchanges
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<Exchange>())
                .collect::<Result<Vec<_>>>()
                .map_err(|e| AppError::config(format!("Invalid EXCHANGES value: {}", e)))?;
        }

        for exchange in Exchange::ALL {
            if let Some(endpoint) = lookup(exchange.endpoint_env_var()) {
                let endpoint = endpoint.trim().to_string();
                if !endpoint.is_empty() {
                    self.endpoint_overrides.insert(exchange, endpoint);
                }
            }
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e))
            })?;
        }

        if let Some(pause) = lookup("PAUSE_MS") {
            self.pause_ms = pause.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid PAUSE_MS value '{}': {}", pause, e))
            })?;
        }

        if let Some(output_dir) = lookup("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir.trim());
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level.trim().to_string();
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid ENABLE_COLOR value '{}': {}",
                    enable_color, e
                ))
            })?;
        }

        Ok(())
    }
}

fn default_exchanges() -> Vec<Exchange> {
    Exchange::ALL.to_vec()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_pause_ms() -> u64 {
    crate::defaults::DEFAULT_PAUSE.as_millis() as u64
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_OUTPUT_DIR)
}

fn default_save_results() -> bool {
    true
}

fn default_log_level() -> String {
    crate::defaults::DEFAULT_LOG_LEVEL.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.exchanges, vec![Exchange::Binance, Exchange::Bybit, Exchange::Gateio]);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.pause(), Duration::from_secs(1));
        assert!(config.save_results);
        assert!(config.output_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoints_default_and_override() {
        let mut config = Config::default();
        assert_eq!(config.endpoint(Exchange::Bybit), "https://api.bybit.com/v5/market/time");

        config.endpoint_overrides.insert(Exchange::Bybit, "http://127.0.0.1:9000/time".to_string());
        assert_eq!(config.endpoint(Exchange::Bybit), "http://127.0.0.1:9000/time");

        let table = config.endpoints();
        assert_eq!(table.len(), 3);
        assert_eq!(table[&Exchange::Binance], "https://api.binance.com/api/v3/time");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.exchanges.clear();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = Config::default();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timeout_seconds = 301;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pause_ms = 60_001;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.endpoint_overrides.insert(Exchange::Gateio, "ftp://example.com/time".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.endpoint_overrides.insert(Exchange::Gateio, "not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_from_lookup() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("EXCHANGES", "gateio, binance"),
            ("BINANCE_ENDPOINT", "http://localhost:8080/api/v3/time"),
            ("TIMEOUT_SECONDS", "5"),
            ("PAUSE_MS", "0"),
            ("OUTPUT_DIR", "/tmp/results"),
            ("LOG_LEVEL", "warn"),
            ("ENABLE_COLOR", "false"),
        ]);

        config.merge_from_lookup(lookup).unwrap();

        assert_eq!(config.exchanges, vec![Exchange::Gateio, Exchange::Binance]);
        assert_eq!(config.endpoint(Exchange::Binance), "http://localhost:8080/api/v3/time");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.pause_ms, 0);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/results"));
        assert_eq!(config.log_level, "warn");
        assert!(!config.enable_color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_from_lookup_invalid_values() {
        let mut config = Config::default();
        let result = config.merge_from_lookup(lookup_from(&[("EXCHANGES", "binance,kraken")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let mut config = Config::default();
        let result = config.merge_from_lookup(lookup_from(&[("TIMEOUT_SECONDS", "ten")]));
        assert!(result.is_err());

        let mut config = Config::default();
        let result = config.merge_from_lookup(lookup_from(&[("ENABLE_COLOR", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_effective_log_level() {
        let mut config = Config::default();
        assert_eq!(config.effective_log_level().unwrap(), LogLevel::Info);

        config.debug = true;
        assert_eq!(config.effective_log_level().unwrap(), LogLevel::Debug);
    }
}
