//! # Actions
//!
//! Everything that can happen becomes an `Action`.
//! User submits the form? That's `Action::Submit(input)`.
//! Backend answers? That's `Action::AnalysisSettled { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing any I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Request lifecycle
//!
//! ```text
//! Idle ──Submit──▶ Loading ──Settled(Ok)──▶ Result
//!                     ▲    ──Settled(Err)─▶ Error
//!                     └────────Submit─────────┘
//! ```
//!
//! Every submit gets a fresh request id. Only the settlement carrying the
//! latest id is applied, so the last submit always wins.

use log::{debug, info, warn};

use crate::api::{AnalysisRequest, AnalysisResult, ClientError};
use crate::core::state::{ANALYSIS_FAILED_MESSAGE, App, DisplayState, FormInput, Status};

#[derive(Debug)]
pub enum Action {
    /// The form was submitted. The form binding guarantees both fields are filled.
    Submit(FormInput),
    /// The request identified by `request_id` finished.
    AnalysisSettled {
        request_id: u64,
        outcome: Result<AnalysisResult, ClientError>,
    },
    /// Startup reachability probe finished.
    BackendProbed(Result<String, ClientError>),
    Quit,
}

/// Side effects the caller must carry out after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue exactly one POST and report back with `AnalysisSettled { request_id, .. }`.
    SpawnAnalysis {
        request_id: u64,
        request: AnalysisRequest,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(input) => {
            app.latest_request += 1;
            let request_id = app.latest_request;
            info!(
                "Submitting review #{} for '{}' ({} chars)",
                request_id,
                input.product_name,
                input.review_chars()
            );
            // Replaces any Error/Result so nothing stale shows next to the spinner
            app.display = DisplayState::Loading;
            app.status = Status::Analyzing;
            Effect::SpawnAnalysis {
                request_id,
                request: AnalysisRequest::from(&input),
            }
        }
        Action::AnalysisSettled {
            request_id,
            outcome,
        } => {
            if request_id != app.latest_request {
                debug!(
                    "Ignoring settlement of superseded request #{} (latest is #{})",
                    request_id, app.latest_request
                );
                return Effect::None;
            }
            match outcome {
                Ok(payload) => {
                    info!(
                        "Request #{} succeeded: sentiment={}, key_points_len={}",
                        request_id,
                        payload.sentiment,
                        payload.key_points.len()
                    );
                    app.status = Status::AnalysisComplete;
                    app.display = DisplayState::Result { payload };
                }
                Err(e) => {
                    warn!("Request #{} failed: {}", request_id, e);
                    app.status = Status::AnalysisFailed;
                    app.display = DisplayState::Error {
                        message: ANALYSIS_FAILED_MESSAGE.to_string(),
                    };
                }
            }
            Effect::None
        }
        Action::BackendProbed(outcome) => {
            let status = match outcome {
                Ok(message) => {
                    info!("Backend reachable: {}", message);
                    Status::BackendOnline
                }
                Err(e) => {
                    warn!("Backend probe failed: {}", e);
                    Status::BackendUnreachable
                }
            };
            // Reachability is only shown until the first submit
            if app.display == DisplayState::Idle {
                app.status = status;
            } else {
                debug!("Probe finished after first submit, keeping {:?}", app.status);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn review() -> FormInput {
        FormInput::new("Phone X", "Battery lasts two days and the screen is great.")
    }

    fn settle_ok(app: &mut App, request_id: u64, payload: AnalysisResult) -> Effect {
        update(
            app,
            Action::AnalysisSettled {
                request_id,
                outcome: Ok(payload),
            },
        )
    }

    fn settle_err(app: &mut App, request_id: u64) -> Effect {
        update(
            app,
            Action::AnalysisSettled {
                request_id,
                outcome: Err(ClientError::Network("connection refused".to_string())),
            },
        )
    }

    #[test]
    fn test_submit_enters_loading_and_requests_once() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit(review()));

        assert_eq!(app.display, DisplayState::Loading);
        assert_eq!(
            effect,
            Effect::SpawnAnalysis {
                request_id: 1,
                request: AnalysisRequest {
                    product_name: "Phone X".to_string(),
                    review_text: "Battery lasts two days and the screen is great.".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_success_shows_result() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        let payload = AnalysisResult::new("positive", "Good battery\nGreat screen");
        let effect = settle_ok(&mut app, 1, payload.clone());

        assert_eq!(effect, Effect::None);
        assert_eq!(app.display, DisplayState::Result { payload });
        assert_eq!(app.status, Status::AnalysisComplete);
    }

    #[test]
    fn test_failure_shows_fixed_message() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        settle_err(&mut app, 1);

        assert_eq!(app.display.error_message(), Some(ANALYSIS_FAILED_MESSAGE));
    }

    #[test]
    fn test_api_and_parse_errors_look_the_same_to_the_user() {
        for err in [
            ClientError::Api {
                status: 422,
                message: "bad input".to_string(),
            },
            ClientError::Parse("missing field `sentiment`".to_string()),
        ] {
            let mut app = test_app();
            update(&mut app, Action::Submit(review()));
            update(
                &mut app,
                Action::AnalysisSettled {
                    request_id: 1,
                    outcome: Err(err),
                },
            );
            assert_eq!(app.display.error_message(), Some(ANALYSIS_FAILED_MESSAGE));
        }
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        settle_ok(&mut app, 1, AnalysisResult::new("positive", "Good"));

        update(&mut app, Action::Submit(review()));
        assert_eq!(app.display, DisplayState::Loading);
        assert!(app.display.result().is_none());
    }

    #[test]
    fn test_resubmit_clears_previous_error() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        settle_err(&mut app, 1);

        update(&mut app, Action::Submit(review()));
        assert_eq!(app.display, DisplayState::Loading);
        assert!(app.display.error_message().is_none());
    }

    #[test]
    fn test_error_after_result_drops_the_result() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        settle_ok(&mut app, 1, AnalysisResult::new("positive", "Good"));
        update(&mut app, Action::Submit(review()));
        settle_err(&mut app, 2);

        assert!(app.display.result().is_none());
        assert!(app.display.error_message().is_some());
    }

    #[test]
    fn test_latest_submit_wins() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        update(&mut app, Action::Submit(review()));
        assert_eq!(app.latest_request, 2);

        // Second request settles first, then the superseded one arrives late
        let fresh = AnalysisResult::new("negative", "Too slow");
        settle_ok(&mut app, 2, fresh.clone());
        settle_err(&mut app, 1);

        assert_eq!(app.display, DisplayState::Result { payload: fresh });
    }

    #[test]
    fn test_stale_settlement_does_not_end_loading() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        update(&mut app, Action::Submit(review()));
        settle_ok(&mut app, 1, AnalysisResult::new("positive", "Old"));

        assert_eq!(app.display, DisplayState::Loading);
    }

    #[test]
    fn test_probe_only_touches_status() {
        let mut app = test_app();
        update(&mut app, Action::BackendProbed(Ok("running".to_string())));
        assert_eq!(app.display, DisplayState::Idle);
        assert_eq!(app.status, Status::BackendOnline);

        update(
            &mut app,
            Action::BackendProbed(Err(ClientError::Network("refused".to_string()))),
        );
        assert_eq!(app.display, DisplayState::Idle);
        assert_eq!(app.status, Status::BackendUnreachable);
    }

    #[test]
    fn test_late_probe_keeps_loading_status() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        update(&mut app, Action::BackendProbed(Ok("running".to_string())));
        assert_eq!(app.status, Status::Analyzing);
        assert_eq!(app.display, DisplayState::Loading);
    }

    #[test]
    fn test_probe_after_settlement_keeps_outcome_status() {
        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        settle_ok(&mut app, 1, AnalysisResult::new("positive", "Good"));
        update(&mut app, Action::BackendProbed(Ok("running".to_string())));
        assert_eq!(app.status, Status::AnalysisComplete);

        let mut app = test_app();
        update(&mut app, Action::Submit(review()));
        settle_err(&mut app, 1);
        update(&mut app, Action::BackendProbed(Ok("running".to_string())));
        assert_eq!(app.status, Status::AnalysisFailed);
        assert_eq!(app.display.error_message(), Some(ANALYSIS_FAILED_MESSAGE));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
