//! # ResultPanel Component
//!
//! The area under the form. What it shows is a pure function of `DisplayState`:
//!
//! | State     | Shows                                    |
//! |-----------|------------------------------------------|
//! | `Idle`    | short usage hint                         |
//! | `Loading` | spinner                                  |
//! | `Error`   | the fixed failure message, in red        |
//! | `Result`  | sentiment badge + scrollable key points  |
//!
//! The breakdown is re-derived from the payload on every render. Scroll
//! position is the only state kept across frames.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::AnalysisResult;
use crate::core::render::{Breakdown, render};
use crate::core::state::DisplayState;
use crate::tui::component::EventHandler;
use crate::tui::components::review_form::SPINNER_FRAMES;
use crate::tui::event::TuiEvent;

/// Visual treatment for a sentiment label.
///
/// Labels are opaque, so matching is case-insensitive and anything unknown
/// falls back to `Other` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
    Other,
}

impl SentimentTone {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => SentimentTone::Positive,
            "negative" => SentimentTone::Negative,
            "neutral" => SentimentTone::Neutral,
            _ => SentimentTone::Other,
        }
    }

    pub fn style(self) -> Style {
        let color = match self {
            SentimentTone::Positive => Color::Green,
            SentimentTone::Negative => Color::Red,
            SentimentTone::Neutral => Color::Yellow,
            SentimentTone::Other => Color::Magenta,
        };
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
    }
}

/// Persistent presentation state for the result area.
#[derive(Default)]
pub struct ResultPanelState {
    pub scroll_state: ScrollViewState,
}

impl ResultPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, e.g. when a new result arrives.
    pub fn reset_scroll(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for ResultPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Transient component built each frame from the current display state.
pub struct ResultPanel<'a> {
    pub display: &'a DisplayState,
    pub spinner_frame: usize,
}

impl<'a> ResultPanel<'a> {
    pub fn new(display: &'a DisplayState, spinner_frame: usize) -> Self {
        Self {
            display,
            spinner_frame,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut ResultPanelState) {
        match self.display {
            DisplayState::Idle => {
                let hint = Paragraph::new(
                    "Fill in the product name and the review, then press Ctrl+S to analyze.",
                )
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
                frame.render_widget(hint, area);
            }
            DisplayState::Loading => {
                let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
                let loading = Paragraph::new(format!("{} Waiting for the analysis service...", spinner))
                    .style(Style::default().fg(Color::Cyan));
                frame.render_widget(loading, area);
            }
            DisplayState::Error { message } => {
                let error = Paragraph::new(message.as_str())
                    .block(
                        Block::bordered()
                            .border_type(BorderType::Rounded)
                            .border_style(Style::default().fg(Color::Red))
                            .title(" Error "),
                    )
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true });
                frame.render_widget(error, area);
            }
            DisplayState::Result { payload } => {
                render_result(frame, area, payload, state);
            }
        }
    }
}

fn render_result(frame: &mut Frame, area: Rect, payload: &AnalysisResult, state: &mut ResultPanelState) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Analysis Result ")
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Leave a column for the scrollbar
    let content_width = inner.width.saturating_sub(1);
    let body = result_paragraph(&render(payload), payload);
    let content_height = (body.line_count(content_width) as u16).max(1);

    let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
    scroll_view.render_widget(body, Rect::new(0, 0, content_width, content_height));
    frame.render_stateful_widget(scroll_view, inner, &mut state.scroll_state);
}

fn result_paragraph(breakdown: &Breakdown, payload: &AnalysisResult) -> Paragraph<'static> {
    let tone = SentimentTone::from_label(&breakdown.sentiment_label);

    let mut lines = vec![Line::from(vec![
        Span::raw("Sentiment: "),
        Span::styled(format!(" {} ", breakdown.sentiment_label), tone.style()),
    ])];

    if let Some(id) = payload.id {
        let saved = match payload.created_at_display() {
            Some(ts) => format!("Saved as review #{} ({})", id, ts),
            None => format!("Saved as review #{}", id),
        };
        lines.push(Line::from(Span::styled(saved, Style::default().fg(Color::DarkGray))));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Key points",
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));

    if breakdown.points.is_empty() {
        lines.push(Line::from(Span::styled(
            "No key points returned.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(breakdown.points.iter().map(|point| Line::raw(point.clone())));
    }

    Paragraph::new(lines).wrap(Wrap { trim: false })
}
