use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{AnalysisRequest, AnalysisResult, HealthResponse};

/// Errors that can occur while talking to the analysis backend.
///
/// The UI collapses all of these into one "analysis failed" message; the
/// variants exist so the log says what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network-level failure (connection refused, DNS, reset).
    Network(String),
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// 2xx response whose body didn't match the expected shape.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Base URL this client talks to (shown in the title bar).
    fn base_url(&self) -> &str;

    /// Submits one review for analysis.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError>;

    /// Checks that the backend is up; returns its greeting.
    async fn health(&self) -> Result<String, ClientError>;
}

/// reqwest-backed client for the review analysis backend.
pub struct HttpAnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Lists stored analyses, newest first.
    pub async fn list_reviews(&self) -> Result<Vec<AnalysisResult>, ClientError> {
        let url = format!("{}/api/reviews", self.base_url);
        info!("Fetching review history from {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        read_json(response).await
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        let url = format!("{}/api/analyze-review", self.base_url);
        info!(
            "POST {} (product_len={}, review_len={})",
            url,
            request.product_name.len(),
            request.review_text.len()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(response).await
    }

    async fn health(&self) -> Result<String, ClientError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let health: HealthResponse = read_json(response).await?;
        Ok(health.message)
    }
}

/// Checks the status, then decodes the body as `T`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    debug!("Backend response status: {}", status);

    if !status.is_success() {
        let err_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Backend error: {} - {}", status.as_u16(), err_body);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: err_body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;
    debug!("Backend response body: {} bytes", body.len());

    serde_json::from_str(&body).map_err(|e| {
        warn!("Unexpected response body: {}", e);
        ClientError::Parse(e.to_string())
    })
}
