//! HTTP seam to the review analysis backend.

pub mod client;
pub mod types;

pub use client::{AnalysisClient, ClientError, HttpAnalysisClient};
pub use types::{AnalysisRequest, AnalysisResult, HealthResponse};
