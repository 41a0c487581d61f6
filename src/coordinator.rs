//! Executes coordinator effects against an [`AnalysisClient`].
//!
//! `core::update` decides *that* a request must be sent; this module sends it
//! and turns the outcome back into an `Action`. The TUI calls [`settle`] from
//! a spawned task; the one-shot CLI calls [`analyze_once`] inline.

use log::debug;

use crate::api::{AnalysisClient, AnalysisRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::state::{App, DisplayState, FormInput};

/// Performs one analysis request and wraps the outcome for `update()`.
pub async fn settle(client: &dyn AnalysisClient, request_id: u64, request: AnalysisRequest) -> Action {
    let outcome = client.analyze(&request).await;
    debug!(
        "Request #{} settled ({})",
        request_id,
        if outcome.is_ok() { "ok" } else { "error" }
    );
    Action::AnalysisSettled {
        request_id,
        outcome,
    }
}

/// Runs submit → request → settlement to completion and returns the final state.
pub async fn analyze_once<'a>(
    app: &'a mut App,
    client: &dyn AnalysisClient,
    input: FormInput,
) -> &'a DisplayState {
    if let Effect::SpawnAnalysis {
        request_id,
        request,
    } = update(app, Action::Submit(input))
    {
        let action = settle(client, request_id, request).await;
        update(app, action);
    }
    &app.display
}
