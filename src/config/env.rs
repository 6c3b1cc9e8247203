//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the working directory if it exists
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load a specific env file if it exists; variables already set win
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path).map_err(|e| {
            AppError::config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok(true)
    }

    /// Variables read by [`crate::models::Config::merge_from_lookup`]
    pub const KNOWN_VARS: &'static [&'static str] = &[
        "EXCHANGES",
        "BINANCE_ENDPOINT",
        "BYBIT_ENDPOINT",
        "GATEIO_ENDPOINT",
        "TIMEOUT_SECONDS",
        "PAUSE_MS",
        "OUTPUT_DIR",
        "LOG_LEVEL",
        "ENABLE_COLOR",
    ];

    /// Validate every known variable currently set in the environment
    pub fn validate_environment() -> Result<()> {
        for key in Self::KNOWN_VARS {
            if let Ok(value) = std::env::var(key) {
                Self::validate_env_var(key, &value)?;
            }
        }
        Ok(())
    }

    /// Validate one environment variable before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        let invalid = |e: &dyn std::fmt::Display| {
            AppError::config(format!("Invalid {} value '{}': {}", key, value, e))
        };

        match key {
            "EXCHANGES" => {
                for exchange in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    exchange.parse::<crate::types::Exchange>().map_err(|e| {
                        AppError::config(format!("Invalid EXCHANGES entry: {}", e))
                    })?;
                }
            }
            "BINANCE_ENDPOINT" | "BYBIT_ENDPOINT" | "GATEIO_ENDPOINT" => {
                url::Url::parse(value.trim()).map_err(|e| invalid(&e))?;
            }
            "TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse().map_err(|e| invalid(&e))?;
                if timeout == 0 || timeout > 300 {
                    return Err(AppError::config(format!(
                        "TIMEOUT_SECONDS must be between 1 and 300, got: {}",
                        timeout
                    )));
                }
            }
            "PAUSE_MS" => {
                value.trim().parse::<u64>().map_err(|e| invalid(&e))?;
            }
            "LOG_LEVEL" => {
                value
                    .parse::<crate::logging::LogLevel>()
                    .map_err(|e| AppError::config(e.to_string()))?;
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>().map_err(|e| invalid(&e))?;
            }
            _ => {}
        }
        Ok(())
    }
}
