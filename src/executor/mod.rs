//! Probe execution
//!
//! [`ExchangeProber`] performs one timed request per exchange and classifies
//! the outcome. [`SequentialRunner`] walks the exchange list strictly one
//! after another, pausing after every probe, and can be interrupted by a
//! shutdown future between or during probes.


use crate::{
    client::{HttpClient, HttpRequest},
    error::{AppError, Result},
    models::{Config, ProbeResult, ResultsSet},
    types::Exchange,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Issues a single timed GET against an exchange's server-time endpoint
pub struct ExchangeProber {
    client: Arc<dyn HttpClient>,
    endpoints: HashMap<Exchange, String>,
    timeout: Duration,
}

impl ExchangeProber {
    pub fn new(
        client: Arc<dyn HttpClient>,
        endpoints: HashMap<Exchange, String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoints,
            timeout,
        }
    }

    /// Build a prober from the endpoint table and timeout in `config`
    pub fn from_config(client: Arc<dyn HttpClient>, config: &Config) -> Self {
        Self::new(client, config.endpoints(), config.timeout())
    }

    pub fn endpoint(&self, exchange: Exchange) -> Option<&str> {
        self.endpoints.get(&exchange).map(String::as_str)
    }

    /// Probe one exchange
    ///
    /// Network failures and non-200 responses become failed results. The
    /// only error returned is a missing endpoint for `exchange`.
    pub async fn probe(&self, exchange: Exchange) -> Result<ProbeResult> {
        let endpoint = self.endpoint(exchange).ok_or_else(|| {
            AppError::validation(format!("No endpoint configured for exchange '{}'", exchange))
        })?;

        info!("Testing REST latency for {}", exchange.display_name());
        debug!(endpoint, "sending GET");

        let request = HttpRequest::get(endpoint.to_string()).with_timeout(self.timeout);

        let result = match self.client.execute_request(request).await {
            Ok(response) => {
                let result =
                    ProbeResult::from_response(exchange, response.status_code, response.elapsed);
                if result.is_success() {
                    info!("Request: {:.2} ms (Status: {})", result.latency(), response.status_code);
                } else {
                    warn!("Request failed with status code {}", response.status_code);
                }
                result
            }
            Err(e) => {
                error!("Request error: {}", e);
                ProbeResult::transport(exchange, e.to_string())
            }
        };

        Ok(result)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every exchange was probed
    Completed(ResultsSet),
    /// The shutdown future fired; holds only fully completed probes
    Interrupted(ResultsSet),
}

impl RunOutcome {
    pub fn results(&self) -> &ResultsSet {
        match self {
            RunOutcome::Completed(results) | RunOutcome::Interrupted(results) => results,
        }
    }

    pub fn into_results(self) -> ResultsSet {
        match self {
            RunOutcome::Completed(results) | RunOutcome::Interrupted(results) => results,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, RunOutcome::Interrupted(_))
    }
}

/// Probes exchanges one at a time with a fixed pause after each
pub struct SequentialRunner {
    prober: ExchangeProber,
    pause: Duration,
}

impl SequentialRunner {
    pub fn new(prober: ExchangeProber, pause: Duration) -> Self {
        Self { prober, pause }
    }

    /// Probe every exchange in order
    pub async fn run_all(&self, exchanges: &[Exchange]) -> Result<ResultsSet> {
        self.run_until(exchanges, std::future::pending::<()>())
            .await
            .map(RunOutcome::into_results)
    }

    /// Probe every exchange in order, stopping early when `shutdown` resolves
    pub async fn run_until<F>(&self, exchanges: &[Exchange], shutdown: F) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!("Starting latency tests...");
        let mut results = ResultsSet::new();

        for &exchange in exchanges {
            info!("{}", "=".repeat(50));
            info!("Testing {}", exchange.display_name());
            info!("{}", "=".repeat(50));

            let result = tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(RunOutcome::Interrupted(results)),
                result = self.prober.probe(exchange) => result?,
            };
            results.insert(result);

            tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(RunOutcome::Interrupted(results)),
                _ = tokio::time::sleep(self.pause) => {}
            }
        }

        debug!(
            exchanges = ?results.exchanges(),
            succeeded = results.success_count(),
            "latency tests finished"
        );
        Ok(RunOutcome::Completed(results))
    }
}
