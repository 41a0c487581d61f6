//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{AnalysisClient, AnalysisRequest, AnalysisResult, ClientError};
use crate::core::state::App;

/// A client that answers every call with a canned outcome and records requests.
pub struct ScriptedClient {
    pub outcome: Result<AnalysisResult, ClientError>,
    pub requests: Mutex<Vec<AnalysisRequest>>,
}

impl ScriptedClient {
    pub fn succeeding(payload: AnalysisResult) -> Self {
        Self {
            outcome: Ok(payload),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AnalysisClient for ScriptedClient {
    fn base_url(&self) -> &str {
        "http://backend.test"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }

    async fn health(&self) -> Result<String, ClientError> {
        self.outcome.as_ref().map(|_| "ok".to_string()).map_err(Clone::clone)
    }
}

/// Creates a test App pointed at a fake backend.
pub fn test_app() -> App {
    App::new("http://backend.test".to_string())
}
