//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Everything that mutates `App` runs on this thread. The analysis request
//! and the startup health probe run as tokio tasks and report back over an
//! `mpsc` channel of `Action`s, drained once per loop iteration.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Otherwise**: sleeps up to 500ms, only redraws on events or settlements.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::{AnalysisClient, AnalysisRequest, HttpAnalysisClient};
use crate::coordinator;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, ResultPanelState, ReviewForm};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form: ReviewForm,
    pub result_panel: ResultPanelState,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            form: ReviewForm::new(app.min_review_chars),
            result_panel: ResultPanelState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture is only for wheel scrolling of the result panel
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client: Arc<dyn AnalysisClient> = Arc::new(HttpAnalysisClient::new(config.base_url.clone()));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = TerminalModeGuard::new();
        event_loop(&mut terminal, &mut app, &mut tui, client)
    };
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    client: Arc<dyn AnalysisClient>,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_probe(client.clone(), tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.display.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit | TuiEvent::Quit => {
                    if update(app, Action::Quit) == Effect::Quit {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.result_panel.handle_event(&event);
                }
                _ => {
                    // Re-sync so a second submit in the same batch sees Loading
                    tui.form.busy = app.display.is_loading();
                    if let Some(FormEvent::Submit(input)) = tui.form.handle_event(&event) {
                        let effect = dispatch(app, tui, Action::Submit(input));
                        apply_effect(effect, &client, &tx);
                    }
                }
            }
        }

        // Settlements and probe results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = dispatch(app, tui, action);
            if effect == Effect::Quit {
                return Ok(());
            }
            apply_effect(effect, &client, &tx);
        }
    }
}

/// Runs `update()` and keeps presentation state in step with the new display.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let was_loading = app.display.is_loading();
    let effect = update(app, action);
    // A freshly settled result or error starts at the top
    if was_loading && !app.display.is_loading() {
        tui.result_panel.reset_scroll();
    }
    effect
}

fn apply_effect(effect: Effect, client: &Arc<dyn AnalysisClient>, tx: &mpsc::Sender<Action>) {
    if let Effect::SpawnAnalysis {
        request_id,
        request,
    } = effect
    {
        spawn_analysis(client.clone(), request_id, request, tx.clone());
    }
}

/// Sends one analysis request. The task runs to completion; there is no abort.
fn spawn_analysis(
    client: Arc<dyn AnalysisClient>,
    request_id: u64,
    request: AnalysisRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning analysis request #{}", request_id);
    tokio::spawn(async move {
        let action = coordinator::settle(client.as_ref(), request_id, request).await;
        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver settlement of request #{}: receiver dropped",
                request_id
            );
        }
    });
}

fn spawn_probe(client: Arc<dyn AnalysisClient>, tx: mpsc::Sender<Action>) {
    info!("Probing backend at {}", client.base_url());
    tokio::spawn(async move {
        let outcome = client.health().await;
        if tx.send(Action::BackendProbed(outcome)).is_err() {
            warn!("Failed to deliver probe result: receiver dropped");
        }
    });
}
