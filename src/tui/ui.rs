use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ResultPanel, TitleBar};

const KEY_HELP: &str = "Tab switch field · Ctrl+S analyze · PgUp/PgDn scroll result · Esc quit";

/// Top-level layout:
///
/// ```text
/// ┌ title bar (1) ─────────────────────┐
/// │ form (product, review, hint, btn)  │
/// │ result panel (rest)                │
/// └ key help (1) ──────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let [title_area, form_area, result_area, help_area] = split(frame.area(), tui.form.height());

    TitleBar::new(app.backend_url.clone(), app.status).render(frame, title_area);

    tui.form.busy = app.display.is_loading();
    tui.form.spinner_frame = spinner_frame;
    tui.form.render(frame, form_area);

    ResultPanel::new(&app.display, spinner_frame).render(frame, result_area, &mut tui.result_panel);

    frame.render_widget(
        Line::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn split(area: Rect, form_height: u16) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Length(form_height), Min(0), Length(1)]).areas(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AnalysisResult;
    use crate::core::state::{ANALYSIS_FAILED_MESSAGE, DisplayState};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_idle() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Review Analyzer"));
        assert!(text.contains("Product name"));
        assert!(text.contains("Customer review"));
        assert!(text.contains("[ Analyze Review ]"));
        assert!(!text.contains("Analysis Result"));
    }

    #[test]
    fn test_draw_loading_disables_submit() {
        let mut app = test_app();
        app.display = DisplayState::Loading;
        let mut tui = TuiState::new(&app);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Analyzing with AI..."));
        assert!(tui.form.busy);
    }

    #[test]
    fn test_draw_error_has_no_result() {
        let mut app = test_app();
        app.display = DisplayState::Error {
            message: ANALYSIS_FAILED_MESSAGE.to_string(),
        };
        let mut tui = TuiState::new(&app);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Analysis failed."));
        assert!(!text.contains("Analysis Result"));
        assert!(!tui.form.busy);
    }

    #[test]
    fn test_draw_result() {
        let mut app = test_app();
        app.display = DisplayState::Result {
            payload: AnalysisResult::new("NEGATIVE", "Arrived broken\nSlow refund"),
        };
        let mut tui = TuiState::new(&app);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Analysis Result"));
        assert!(text.contains("NEGATIVE"));
        assert!(text.contains("Arrived broken"));
        assert!(text.contains("Slow refund"));
    }
}
