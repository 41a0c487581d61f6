//! Word-wrapping of a text buffer into visual rows, plus cursor mapping.
//!
//! Each logical line (split at `\n`) is wrapped with textwrap. Rows are then
//! mapped back to byte ranges of the buffer so the cursor can be placed on
//! them. Widths are display columns, so CJK and emoji count double.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Borders consumed on each axis by the bordered block.
pub(super) const BORDER_OFFSET: u16 = 1;
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2 * BORDER_OFFSET;
pub(super) const VERTICAL_OVERHEAD: u16 = 2 * BORDER_OFFSET;

/// One visual row as a byte range into the buffer (excluding any `\n`).
///
/// A soft-wrapped row keeps the spaces it was broken at, so consecutive rows
/// of one logical line tile it without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Build textwrap options for the given inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(inner_width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Content width for a block of the given outer width. Never 0.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1)
}

/// Splits `text` into rows no wider than `width` columns, breaking at spaces
/// and only splitting words longer than a whole row.
///
/// Always returns at least one row; an empty logical line is an empty row.
pub(super) fn layout_rows(text: &str, width: u16) -> Vec<Row> {
    let options = wrap_options(width);
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let line_end = line_start + line.len();
        let mut row_start = line_start;
        let mut search_from = 0;

        for segment in textwrap::wrap(line, &options) {
            // Segments come back in order and never start with a space,
            // except for leading indentation on the first one
            let Some(found) = line[search_from..].find(segment.as_ref()) else {
                break;
            };
            let segment_start = line_start + search_from + found;
            if segment_start > row_start {
                rows.push(Row {
                    start: row_start,
                    end: segment_start,
                });
                row_start = segment_start;
            }
            search_from += found + segment.len();
        }
        rows.push(Row {
            start: row_start,
            end: line_end,
        });

        line_start = line_end + 1;
    }

    rows
}

/// Row index and display column of the cursor at byte offset `pos`.
///
/// A cursor sitting right after a full-width row is reported at the start of
/// the following visual row, so it never lands on the border.
pub(super) fn cursor_cell(text: &str, rows: &[Row], pos: usize, width: u16) -> (usize, u16) {
    let idx = rows.iter().rposition(|r| r.start <= pos).unwrap_or(0);
    let row = rows[idx];
    let col = text[row.start..pos.min(row.end).max(row.start)].width() as u16;
    if col >= width { (idx + 1, 0) } else { (idx, col) }
}

/// Byte offset in `row` closest to display column `col` without passing it.
pub(super) fn offset_at_column(text: &str, row: Row, col: u16) -> usize {
    let col = usize::from(col);
    let mut used = 0;
    for (i, c) in text[row.start..row.end].char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > col {
            return row.start + i;
        }
        used += w;
    }

    // Past the end. A soft-wrapped row's end is the next row's start, so stay
    // on the last character to keep the cursor on this row.
    let hard_end = row.end == text.len() || text.as_bytes()[row.end] == b'\n';
    if hard_end || row.start == row.end {
        row.end
    } else {
        prev_char_boundary(text, row.end)
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
