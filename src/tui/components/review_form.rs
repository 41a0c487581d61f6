//! # ReviewForm Component
//!
//! The two inputs plus the submit control. This is where the "both fields
//! filled" rule is enforced: `FormEvent::Submit` is only ever emitted with a
//! submittable `FormInput`, and never while a request is running.
//!
//! ## Props
//!
//! - `busy`: a request is in flight (submit disabled, button relabeled)
//! - `min_review_chars`: soft length hint for the review
//! - `spinner_frame`: animation tick for the busy button
//!
//! ## Keys
//!
//! Tab / Shift+Tab switch fields, Enter in the product field jumps to the
//! review (or submits when the review is already filled), Ctrl+S submits
//! from anywhere.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::FormInput;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

const REVIEW_VISIBLE_ROWS: u16 = 6;
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Product,
    Review,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit(FormInput),
}

pub struct ReviewForm {
    pub product: TextField,
    pub review: TextField,
    pub focus: Focus,
    /// Shown under the review field after a rejected submit
    pub validation_message: Option<&'static str>,
    // Props
    pub busy: bool,
    pub min_review_chars: usize,
    pub spinner_frame: usize,
}

impl ReviewForm {
    pub fn new(min_review_chars: usize) -> Self {
        let mut form = Self {
            product: TextField::single_line(" Product name ", "e.g. iPhone 15, Skincare X..."),
            review: TextField::multi_line(
                " Customer review ",
                "Paste the full review here...",
                REVIEW_VISIBLE_ROWS,
            ),
            focus: Focus::Product,
            validation_message: None,
            busy: false,
            min_review_chars,
            spinner_frame: 0,
        };
        form.sync_focus();
        form
    }

    /// Rows needed to draw the whole form.
    pub fn height(&self) -> u16 {
        // product + review + hint line + button line
        self.product.height() + self.review.height() + 2
    }

    pub fn input(&self) -> FormInput {
        FormInput::new(self.product.buffer.clone(), self.review.buffer.clone())
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.product.focused = self.focus == Focus::Product;
        self.review.focused = self.focus == Focus::Review;
    }

    fn toggle_focus(&mut self) {
        let next = match self.focus {
            Focus::Product => Focus::Review,
            Focus::Review => Focus::Product,
        };
        self.set_focus(next);
    }

    fn try_submit(&mut self) -> Option<FormEvent> {
        if self.busy {
            return None;
        }
        let input = self.input();
        if input.is_submittable() {
            self.validation_message = None;
            return Some(FormEvent::Submit(input));
        }

        // Send the user to the first empty field
        if input.product_name.trim().is_empty() {
            self.validation_message = Some("Please enter a product name.");
            self.set_focus(Focus::Product);
        } else {
            self.validation_message = Some("Please enter the review text.");
            self.set_focus(Focus::Review);
        }
        None
    }

    fn hint_line(&self) -> Line<'static> {
        if let Some(message) = self.validation_message {
            return Line::from(Span::styled(message, Style::default().fg(Color::Red)));
        }
        let input = self.input();
        let chars = input.review_chars();
        let style = if input.meets_length_hint(self.min_review_chars) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Line::from(vec![
            Span::styled(format!("{}/{} characters", chars, self.min_review_chars), style),
            Span::styled(
                "  (longer reviews give better key points)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }

    fn button_line(&self) -> Line<'static> {
        if self.busy {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            Line::from(Span::styled(
                format!("[ {} Analyzing with AI... ]", spinner),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    "[ Analyze Review ]",
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Ctrl+S", Style::default().fg(Color::DarkGray)),
            ])
        }
    }
}

impl Component for ReviewForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [product_area, review_area, hint_area, button_area] = Layout::vertical([
            Constraint::Length(self.product.height()),
            Constraint::Length(self.review.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.product.render(frame, product_area);
        self.review.render(frame, review_area);
        frame.render_widget(Paragraph::new(self.hint_line()), hint_area);
        frame.render_widget(Paragraph::new(self.button_line()), button_area);
    }
}

impl EventHandler for ReviewForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit => self.try_submit(),
            TuiEvent::NextField | TuiEvent::PrevField => {
                self.toggle_focus();
                None
            }
            _ => {
                let field_event = match self.focus {
                    Focus::Product => self.product.handle_event(event),
                    Focus::Review => self.review.handle_event(event),
                };
                match field_event {
                    Some(FieldEvent::Enter) => {
                        if self.review.buffer.trim().is_empty() {
                            self.set_focus(Focus::Review);
                            None
                        } else {
                            self.try_submit()
                        }
                    }
                    Some(FieldEvent::Changed) => {
                        self.validation_message = None;
                        None
                    }
                    None => None,
                }
            }
        }
    }
}
