//! HTTP client implementation and timing measurements

use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request with timing measurements
    async fn execute_request(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(url: String, method: Method) -> Self {
        Self {
            url,
            method,
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            user_agent: Some(crate::defaults::DEFAULT_USER_AGENT.to_string()),
            headers: vec![("Accept".to_string(), crate::defaults::DEFAULT_ACCEPT.to_string())],
        }
    }

    /// Create a GET request
    pub fn get(url: String) -> Self {
        Self::new(url, Method::GET)
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP response with timing information
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    /// Time spent sending the request and reading the full response
    pub elapsed: Duration,
}

/// reqwest-backed client used against the exchange endpoints
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    /// Create a new network client with an overall request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Send the request and read the body, timing only the exchange itself
    async fn send_timed(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = Url::parse(&request.url)
            .map_err(|e| AppError::parse(format!("Invalid URL '{}': {}", request.url, e)))?;

        let mut req_builder = self
            .client
            .request(request.method, url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(ref ua) = request.user_agent {
            req_builder = req_builder.header("User-Agent", ua);
        }

        let exchange = async {
            let response = req_builder.send().await?;
            let status_code = response.status().as_u16();
            response.bytes().await?;
            Ok::<_, reqwest::Error>(status_code)
        };

        let request_start = Instant::now();
        let outcome = timeout(request.timeout, exchange).await;
        let elapsed = request_start.elapsed();

        let status_code = outcome
            .map_err(|_| {
                AppError::timeout(format!(
                    "Request timed out after {}s",
                    request.timeout.as_secs_f64()
                ))
            })?
            .map_err(AppError::from)?;

        Ok(HttpResponse { status_code, elapsed })
    }
}

#[async_trait]
impl HttpClient for NetworkClient {
    async fn execute_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.send_timed(request).await
    }
}
