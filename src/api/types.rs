//! Wire types for the review analysis backend.
//!
//! ```text
//! POST /api/analyze-review   AnalysisRequest  → AnalysisResult
//! GET  /api/reviews                           → Vec<AnalysisResult>
//! GET  /                                      → HealthResponse
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::state::FormInput;

/// Request body for `POST /api/analyze-review`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub product_name: String,
    pub review_text: String,
}

impl From<&FormInput> for AnalysisRequest {
    fn from(input: &FormInput) -> Self {
        Self {
            product_name: input.product_name.clone(),
            review_text: input.review_text.clone(),
        }
    }
}

/// A successful analysis as returned by the backend.
///
/// Only `sentiment` is required. The backend also echoes the stored record
/// (`id`, `created_at`, ...), which we keep when present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Opaque label, e.g. "POSITIVE". Never validated against a closed set.
    pub sentiment: String,
    /// Newline-delimited key points. Missing or `null` reads as empty text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_points: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl AnalysisResult {
    /// Builds a bare result with no stored-record metadata.
    pub fn new(sentiment: impl Into<String>, key_points: impl Into<String>) -> Self {
        Self {
            sentiment: sentiment.into(),
            key_points: key_points.into(),
            id: None,
            product_name: None,
            review_text: None,
            created_at: None,
        }
    }

    /// `created_at` formatted as `YYYY-MM-DD HH:MM`.
    ///
    /// The backend emits naive ISO timestamps (with or without fractional
    /// seconds). Anything we can't parse is returned as-is.
    pub fn created_at_display(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?;
        Some(
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| raw.to_string()),
        )
    }
}

/// Body of `GET /`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
