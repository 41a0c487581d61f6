//! # TextField Component
//!
//! A bordered, editable text field. Used twice by the review form: once as a
//! single-line product name input and once as the multi-line review area.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `focused` is a prop set by the
//! parent form. Rows are recomputed from the buffer on demand; the only
//! cached layout value is the inner width from the last render, which
//! vertical cursor movement needs.

mod rows;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use rows::{
    BORDER_OFFSET, VERTICAL_OVERHEAD, cursor_cell, inner_width, layout_rows, next_char_boundary,
    offset_at_column, prev_char_boundary,
};

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Buffer or cursor changed
    Changed,
    /// Enter pressed in a single-line field
    Enter,
}

pub struct TextField {
    pub title: &'static str,
    pub placeholder: &'static str,
    pub buffer: String,
    /// Prop: whether this field receives keyboard input
    pub focused: bool,
    multiline: bool,
    visible_rows: u16,
    /// Cursor as byte offset into `buffer`
    cursor: usize,
    /// First visible row
    scroll_offset: u16,
    /// Inner width from the last render
    last_width: u16,
}

impl TextField {
    const DEFAULT_WIDTH: u16 = 78;

    /// A one-row field; Enter is reported to the parent instead of inserted.
    pub fn single_line(title: &'static str, placeholder: &'static str) -> Self {
        Self::build(title, placeholder, false, 1)
    }

    /// A field that accepts newlines and shows `visible_rows` rows at a time.
    pub fn multi_line(title: &'static str, placeholder: &'static str, visible_rows: u16) -> Self {
        Self::build(title, placeholder, true, visible_rows.max(1))
    }

    fn build(title: &'static str, placeholder: &'static str, multiline: bool, visible_rows: u16) -> Self {
        Self {
            title,
            placeholder,
            buffer: String::new(),
            focused: false,
            multiline,
            visible_rows,
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Outer height including borders.
    pub fn height(&self) -> u16 {
        self.visible_rows + VERTICAL_OVERHEAD
    }

    /// Replace the whole buffer and put the cursor at the end.
    #[cfg(test)]
    pub fn set_text(&mut self, text: &str) {
        self.buffer = if self.multiline {
            text.to_string()
        } else {
            flatten(text)
        };
        self.cursor = self.buffer.len();
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Move the cursor one visual row up (`-1`) or down (`1`).
    fn move_vertically(&mut self, direction: i8) -> bool {
        let rows = layout_rows(&self.buffer, self.last_width);
        let (row, col) = cursor_cell(&self.buffer, &rows, self.cursor, self.last_width);
        let target = match direction {
            d if d < 0 => match row.checked_sub(1) {
                Some(t) => t,
                None => return false,
            },
            _ => row + 1,
        };
        let Some(&target_row) = rows.get(target) else {
            return false;
        };
        self.cursor = offset_at_column(&self.buffer, target_row, col);
        true
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll_offset(&mut self, cursor_row: u16) {
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = cursor_row + 1 - self.visible_rows;
        }
    }
}

/// Single-line fields turn pasted newlines into spaces.
fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.last_width = width;

        let rows = layout_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_cell(&self.buffer, &rows, self.cursor, width);
        self.update_scroll_offset(cursor_row as u16);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            let lines: Vec<Line> = rows
                .iter()
                .skip(self.scroll_offset as usize)
                .take(self.visible_rows as usize)
                .map(|r| Line::raw(&self.buffer[r.start..r.end]))
                .collect();
            Paragraph::new(lines)
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let visible_row = (cursor_row as u16).saturating_sub(self.scroll_offset);
            frame.set_cursor_position((
                area.x + BORDER_OFFSET + cursor_col,
                area.y + BORDER_OFFSET + visible_row,
            ));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('\n') if !self.multiline => None,
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text = if self.multiline {
                    text.replace("\r\n", "\n")
                } else {
                    flatten(text)
                };
                self.insert(&text);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Enter if self.multiline => {
                self.insert("\n");
                Some(FieldEvent::Changed)
            }
            TuiEvent::Enter => Some(FieldEvent::Enter),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorUp if self.multiline => {
                self.move_vertically(-1).then_some(FieldEvent::Changed)
            }
            TuiEvent::CursorDown if self.multiline => {
                self.move_vertically(1).then_some(FieldEvent::Changed)
            }
            _ => None,
        }
    }
}
