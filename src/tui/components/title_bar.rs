//! # TitleBar Component
//!
//! Single-line header: app name, backend URL and the current status.
//!
//! Stateless: everything it shows is passed in as props.
//!
//! `"Review Analyzer (backend: http://…) | Backend online"`

use crate::core::state::{Status, StatusTone};
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Backend base URL
    pub backend_url: String,
    pub status: Status,
}

impl TitleBar {
    pub fn new(backend_url: String, status: Status) -> Self {
        Self {
            backend_url,
            status,
        }
    }

    fn status_style(&self) -> Style {
        match self.status.tone() {
            StatusTone::Bad => Style::default().fg(Color::Red),
            StatusTone::Good => Style::default().fg(Color::Green),
            StatusTone::Pending => Style::default().fg(Color::Gray),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spans = vec![
            Span::styled(
                "Review Analyzer",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" (backend: {})", self.backend_url)),
            Span::raw(" | "),
            Span::styled(self.status.message(), self.status_style()),
        ];
        frame.render_widget(Line::from(spans), area);
    }
}
