//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::{HttpClient, NetworkClient},
    config::{display_config_summary, load_config},
    error::Result,
    executor::{ExchangeProber, RunOutcome, SequentialRunner},
    logging::init_logging,
    models::Config,
    output::{OutputCoordinator, OutputFormatterFactory},
    persistence::ResultsPersister,
    PKG_NAME, VERSION,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run once against the real network, stopping on Ctrl-C
    pub async fn run(&self) -> Result<RunOutcome> {
        let client = Arc::new(NetworkClient::with_timeout(self.config.timeout())?);
        self.run_with(client, ctrl_c()).await
    }

    /// Probe, report and persist using `client`, stopping early when `shutdown` resolves
    ///
    /// An interrupted run is neither reported nor saved.
    pub async fn run_with<F>(&self, client: Arc<dyn HttpClient>, shutdown: F) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        let prober = ExchangeProber::from_config(client, &self.config);
        let runner = SequentialRunner::new(prober, self.config.pause());

        let outcome = runner.run_until(&self.config.exchanges, shutdown).await?;

        match &outcome {
            RunOutcome::Interrupted(_) => info!("Test interrupted by user"),
            RunOutcome::Completed(results) => {
                let formatter = OutputFormatterFactory::create_formatter(self.config.enable_color);
                OutputCoordinator::new(formatter).print_report(results);

                if self.config.save_results {
                    ResultsPersister::new(&self.config.output_dir)
                        .save(results, self.config.output_file.as_deref());
                } else {
                    debug!("Saving disabled, skipping results file");
                }
            }
        }

        Ok(outcome)
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Load configuration, install logging and perform one run
///
/// Configuration and logging setup failures are returned to the caller.
/// Anything that goes wrong after that is logged and swallowed.
pub async fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(cli)?;
    init_logging(&config)?;

    debug!("{} v{}", PKG_NAME, VERSION);
    debug!("Configuration:\n{}", display_config_summary(&config));

    let app = App::new(config);
    if let Err(e) = app.run().await {
        let category = e.category();
        let e = anyhow::Error::new(e).context("latency test run aborted");
        error!(category, "Test failed with error: {:?}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exchange;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn mock_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/time"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"serverTime":1}"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v5/market/time"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        server
    }

    fn test_config(server: &MockServer, output_file: PathBuf) -> Config {
        Config {
            exchanges: vec![Exchange::Binance, Exchange::Bybit],
            endpoint_overrides: HashMap::from([
                (Exchange::Binance, format!("{}/api/v3/time", server.uri())),
                (Exchange::Bybit, format!("{}/v5/market/time", server.uri())),
            ]),
            timeout_seconds: 5,
            pause_ms: 0,
            output_file: Some(output_file),
            enable_color: false,
            ..Config::default()
        }
    }

    fn client() -> Arc<dyn HttpClient> {
        Arc::new(NetworkClient::with_timeout(Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_completed_run_is_saved() {
        let server = mock_server().await;
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("results.json");
        let app = App::new(test_config(&server, output.clone()));

        let outcome = app
            .run_with(client(), std::future::pending::<()>())
            .await
            .unwrap();

        assert!(!outcome.is_interrupted());
        assert_eq!(outcome.results().len(), 2);
        assert!(outcome.results().get(Exchange::Binance).unwrap().is_success());
        assert_eq!(outcome.results().get(Exchange::Bybit).unwrap().status_code(), Some(503));

        let saved = ResultsPersister::load(&output).unwrap();
        assert_eq!(&saved.results, outcome.results());
    }

    #[tokio::test]
    async fn test_interrupted_run_is_not_saved() {
        let server = mock_server().await;
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("results.json");
        let app = App::new(test_config(&server, output.clone()));

        let outcome = app.run_with(client(), std::future::ready(())).await.unwrap();

        assert!(outcome.is_interrupted());
        assert!(outcome.results().is_empty());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_no_save_skips_results_file() {
        let server = mock_server().await;
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("results.json");
        let mut config = test_config(&server, output.clone());
        config.save_results = false;

        let outcome = App::new(config)
            .run_with(client(), std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome.results().len(), 2);
        assert!(!output.exists());
    }
}
