//! Probe result data models
//!
//! A [`ProbeResult`] carries an explicit [`ProbeOutcome`] internally. On the
//! wire it keeps the flat record shape existing consumers read, where a
//! failed probe reports its latency as the string `"inf"`.

use crate::types::{Exchange, TestType};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// HTTP status that counts as a successful probe
pub const SUCCESS_STATUS: u16 = 200;

/// Classified result of a single request
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The endpoint answered 200
    Success { latency_ms: f64 },
    /// The endpoint answered with any other status
    HttpStatus { status_code: u16 },
    /// No HTTP response was received
    Transport { error: String },
}

/// Latency measurement of one exchange in one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProbeRecord", try_from = "ProbeRecord")]
pub struct ProbeResult {
    pub exchange: Exchange,
    pub test_type: TestType,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// Classify an HTTP response by status code
    pub fn from_response(exchange: Exchange, status_code: u16, elapsed: Duration) -> Self {
        if status_code == SUCCESS_STATUS {
            Self::success(exchange, elapsed.as_secs_f64() * 1000.0)
        } else {
            Self::http_status(exchange, status_code)
        }
    }

    /// Successful probe with the measured latency in milliseconds
    pub fn success(exchange: Exchange, latency_ms: f64) -> Self {
        Self {
            exchange,
            test_type: TestType::Rest,
            outcome: ProbeOutcome::Success { latency_ms },
        }
    }

    /// Probe that received a non-200 response
    ///
    /// Public callers go through [`ProbeResult::from_response`], which routes
    /// 200 to a success.
    pub(crate) fn http_status(exchange: Exchange, status_code: u16) -> Self {
        debug_assert_ne!(
            status_code, SUCCESS_STATUS,
            "a 200 response is a success, not a status failure"
        );
        Self {
            exchange,
            test_type: TestType::Rest,
            outcome: ProbeOutcome::HttpStatus { status_code },
        }
    }

    /// Probe that failed before any response arrived
    pub fn transport<S: Into<String>>(exchange: Exchange, error: S) -> Self {
        Self {
            exchange,
            test_type: TestType::Rest,
            outcome: ProbeOutcome::Transport { error: error.into() },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Success { .. })
    }

    /// Measured latency, or positive infinity for failed probes
    pub fn latency(&self) -> f64 {
        match self.outcome {
            ProbeOutcome::Success { latency_ms } => latency_ms,
            _ => f64::INFINITY,
        }
    }

    /// Measured latency of a successful probe
    pub fn latency_ms(&self) -> Option<f64> {
        match self.outcome {
            ProbeOutcome::Success { latency_ms } => Some(latency_ms),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Success { .. } => Some(SUCCESS_STATUS),
            ProbeOutcome::HttpStatus { status_code } => Some(status_code),
            ProbeOutcome::Transport { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Transport { error } => Some(error),
            _ => None,
        }
    }
}

/// Flat JSON shape of a probe result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub exchange: Exchange,
    #[serde(default)]
    pub test_type: TestType,
    #[serde(with = "latency_sentinel")]
    pub latency: f64,
    #[serde(default)]
    pub status_code: Option<u16>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ProbeResult> for ProbeRecord {
    fn from(result: ProbeResult) -> Self {
        Self {
            exchange: result.exchange,
            test_type: result.test_type,
            latency: result.latency(),
            status_code: result.status_code(),
            success: result.is_success(),
            error: result.error().map(str::to_string),
        }
    }
}

impl TryFrom<ProbeRecord> for ProbeResult {
    type Error = String;

    fn try_from(record: ProbeRecord) -> Result<Self, Self::Error> {
        let outcome = if record.success {
            if record.status_code != Some(SUCCESS_STATUS) {
                return Err(format!(
                    "successful result for {} must carry status {}",
                    record.exchange, SUCCESS_STATUS
                ));
            }
            if !record.latency.is_finite() || record.latency < 0.0 {
                return Err(format!(
                    "successful result for {} must carry a finite latency",
                    record.exchange
                ));
            }
            ProbeOutcome::Success { latency_ms: record.latency }
        } else if let Some(error) = record.error {
            ProbeOutcome::Transport { error }
        } else if record.status_code == Some(SUCCESS_STATUS) {
            return Err(format!(
                "failed result for {} cannot carry status {}",
                record.exchange, SUCCESS_STATUS
            ));
        } else if let Some(status_code) = record.status_code {
            ProbeOutcome::HttpStatus { status_code }
        } else {
            return Err(format!(
                "failed result for {} has neither a status code nor an error",
                record.exchange
            ));
        };

        Ok(Self {
            exchange: record.exchange,
            test_type: record.test_type,
            outcome,
        })
    }
}

/// Writes infinite latencies as the string `"inf"` and reads them back
pub mod latency_sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const INFINITY_SENTINEL: &str = "inf";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() && value.is_sign_positive() {
            serializer.serialize_str(INFINITY_SENTINEL)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLatency {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match RawLatency::deserialize(deserializer)? {
            RawLatency::Number(value) => Ok(value),
            RawLatency::Text(text) if text == INFINITY_SENTINEL => Ok(f64::INFINITY),
            RawLatency::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{}\", found \"{}\"",
                INFINITY_SENTINEL, text
            ))),
        }
    }
}

/// Most recent result per exchange, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsSet {
    entries: Vec<ProbeResult>,
}

impl ResultsSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, replacing any earlier one for the same exchange in place
    pub fn insert(&mut self, result: ProbeResult) -> Option<ProbeResult> {
        match self.entries.iter_mut().find(|r| r.exchange == result.exchange) {
            Some(existing) => Some(std::mem::replace(existing, result)),
            None => {
                self.entries.push(result);
                None
            }
        }
    }

    pub fn get(&self, exchange: Exchange) -> Option<&ProbeResult> {
        self.entries.iter().find(|r| r.exchange == exchange)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeResult> {
        self.entries.iter()
    }

    /// Exchanges in iteration order
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.entries.iter().map(|r| r.exchange).collect()
    }

    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_success()).count()
    }
}

impl<'a> IntoIterator for &'a ResultsSet {
    type Item = &'a ProbeResult;
    type IntoIter = std::slice::Iter<'a, ProbeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ProbeResult> for ResultsSet {
    fn from_iter<I: IntoIterator<Item = ProbeResult>>(iter: I) -> Self {
        let mut set = ResultsSet::new();
        for result in iter {
            set.insert(result);
        }
        set
    }
}

impl Serialize for ResultsSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for result in &self.entries {
            map.serialize_entry(result.exchange.id(), result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResultsSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultsSetVisitor;

        impl<'de> Visitor<'de> for ResultsSetVisitor {
            type Value = ResultsSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of exchange identifiers to probe results")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = ResultsSet::new();
                while let Some((key, result)) = access.next_entry::<String, ProbeResult>()? {
                    if key != result.exchange.id() {
                        return Err(de::Error::custom(format!(
                            "result keyed '{}' belongs to exchange '{}'",
                            key, result.exchange
                        )));
                    }
                    set.insert(result);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(ResultsSetVisitor)
    }
}
