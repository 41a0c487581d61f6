//! Turns a successful analysis into something displayable.
//!
//! Derived on every draw from the current `Result` payload and never stored,
//! so it can't drift out of sync with the state it came from.

use crate::api::AnalysisResult;

/// Display-ready view of an `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    /// The backend's label, verbatim. Also the styling key.
    pub sentiment_label: String,
    /// Non-empty, trimmed lines of `key_points`, in order.
    pub points: Vec<String>,
}

pub fn render(payload: &AnalysisResult) -> Breakdown {
    Breakdown {
        sentiment_label: payload.sentiment.clone(),
        points: split_points(&payload.key_points),
    }
}

/// Splits key-point text into trimmed, non-empty lines.
///
/// Lines are plain text: bullets, asterisks and markup are left untouched.
pub fn split_points(key_points: &str) -> Vec<String> {
    key_points
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
