//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Exchanges whose server-time endpoint can be probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Bybit,
    Gateio,
}

impl Exchange {
    /// All supported exchanges in the default probe order
    pub const ALL: [Exchange; 3] = [Exchange::Binance, Exchange::Bybit, Exchange::Gateio];

    /// Lowercase identifier used as the results key
    pub fn id(&self) -> &'static str {
        match self {
            Exchange::Binance => "binance",
            Exchange::Bybit => "bybit",
            Exchange::Gateio => "gateio",
        }
    }

    /// Public server-time endpoint
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Exchange::Binance => "https://api.binance.com/api/v3/time",
            Exchange::Bybit => "https://api.bybit.com/v5/market/time",
            Exchange::Gateio => "https://api.gateio.ws/api/v4/spot/time",
        }
    }

    /// Environment variable that overrides the endpoint
    pub fn endpoint_env_var(&self) -> &'static str {
        match self {
            Exchange::Binance => "BINANCE_ENDPOINT",
            Exchange::Bybit => "BYBIT_ENDPOINT",
            Exchange::Gateio => "GATEIO_ENDPOINT",
        }
    }

    /// Uppercase name for console and log output
    pub fn display_name(&self) -> String {
        self.id().to_uppercase()
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Exchange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "binance" => Ok(Exchange::Binance),
            "bybit" => Ok(Exchange::Bybit),
            "gateio" | "gate.io" => Ok(Exchange::Gateio),
            other => Err(AppError::validation(format!("Unknown exchange: '{}'", other))),
        }
    }
}

/// Kind of latency test performed. Only REST exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Rest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_ids_and_order() {
        let ids: Vec<&str> = Exchange::ALL.iter().map(|e| e.id()).collect();
        assert_eq!(ids, crate::defaults::DEFAULT_EXCHANGES);
    }

    #[test]
    fn test_exchange_from_str() {
        assert_eq!("binance".parse::<Exchange>().unwrap(), Exchange::Binance);
        assert_eq!(" ByBit ".parse::<Exchange>().unwrap(), Exchange::Bybit);
        assert_eq!("gate.io".parse::<Exchange>().unwrap(), Exchange::Gateio);

        let err = "kraken".parse::<Exchange>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("kraken"));
    }

    #[test]
    fn test_exchange_display_name() {
        assert_eq!(Exchange::Gateio.display_name(), "GATEIO");
        assert_eq!(Exchange::Binance.to_string(), "binance");
    }

    #[test]
    fn test_default_endpoints_are_https() {
        for exchange in Exchange::ALL {
            let url = url::Url::parse(exchange.default_endpoint()).unwrap();
            assert_eq!(url.scheme(), "https");
        }
    }

    #[test]
    fn test_test_type_serializes_as_rest() {
        assert_eq!(serde_json::to_string(&TestType::Rest).unwrap(), "\"rest\"");
    }
}
