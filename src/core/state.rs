//! # Application State
//!
//! Core business state for the analyzer. Domain logic only, no TUI types.
//! Presentation state (field buffers, focus, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── display: DisplayState       // Idle | Loading | Error | Result
//! ├── status: Status              // title bar status
//! ├── backend_url: String         // where requests go
//! ├── min_review_chars: usize     // soft length hint for the review field
//! └── latest_request: u64         // id of the most recently issued request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::AnalysisResult;
use crate::core::config::{DEFAULT_MIN_REVIEW_CHARS, ResolvedConfig};

/// Shown for every failed analysis, whatever the cause.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Analysis failed. Make sure the backend is running and reachable, then try again.";

/// What the user typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInput {
    pub product_name: String,
    pub review_text: String,
}

impl FormInput {
    pub fn new(product_name: impl Into<String>, review_text: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            review_text: review_text.into(),
        }
    }

    /// Both fields hold something other than whitespace.
    pub fn is_submittable(&self) -> bool {
        !self.product_name.trim().is_empty() && !self.review_text.trim().is_empty()
    }

    /// Review length in characters (not bytes).
    pub fn review_chars(&self) -> usize {
        self.review_text.chars().count()
    }

    /// Soft guidance only: short reviews are still sent.
    pub fn meets_length_hint(&self, min_chars: usize) -> bool {
        self.review_chars() >= min_chars
    }
}

/// The one thing the result area shows. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Error { message: String },
    Result { payload: AnalysisResult },
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            DisplayState::Result { payload } => Some(payload),
            _ => None,
        }
    }
}

/// Title bar status. Updated alongside `display` and by the backend probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    CheckingBackend,
    BackendOnline,
    BackendUnreachable,
    Analyzing,
    AnalysisComplete,
    AnalysisFailed,
}

/// How a status reads at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Good,
    Bad,
    Pending,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::CheckingBackend => "Checking backend...",
            Status::BackendOnline => "Backend online",
            Status::BackendUnreachable => "Backend unreachable",
            Status::Analyzing => "Analyzing review...",
            Status::AnalysisComplete => "Analysis complete",
            Status::AnalysisFailed => "Analysis failed",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            Status::BackendOnline | Status::AnalysisComplete => StatusTone::Good,
            Status::BackendUnreachable | Status::AnalysisFailed => StatusTone::Bad,
            Status::CheckingBackend | Status::Analyzing => StatusTone::Pending,
        }
    }
}

pub struct App {
    pub display: DisplayState,
    pub status: Status,
    pub backend_url: String,
    pub min_review_chars: usize,
    /// Settlements carrying any other id are stale and dropped.
    pub latest_request: u64,
}

impl App {
    pub fn new(backend_url: String) -> Self {
        Self {
            display: DisplayState::Idle,
            status: Status::CheckingBackend,
            backend_url,
            min_review_chars: DEFAULT_MIN_REVIEW_CHARS,
            latest_request: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            min_review_chars: config.min_review_chars,
            ..Self::new(config.base_url.clone())
        }
    }
}
