//! # InputBox Component
//!
//! A bordered text field. Single-line boxes back the search query and the
//! title/tags fields; multi-line boxes back post content and the append
//! composer.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `title` and `focused` are props
//! set by the parent each frame. Submitting does not clear the buffer: the
//! parent clears it once the store has accepted the text, so a rejected
//! submission keeps what the user typed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Left + right borders consumed horizontally
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Maximum content lines a multi-line box asks for when laid out by height
pub const MAX_VISIBLE_LINES: u16 = 6;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; carries the current text
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Block title (Prop)
    pub title: String,
    /// Whether the box owns the terminal cursor (Prop)
    pub focused: bool,
    /// Text buffer (Internal State)
    pub buffer: String,
    multiline: bool,
    /// Cursor position as byte offset in buffer
    cursor: usize,
}

impl InputBox {
    pub fn single_line(title: impl Into<String>) -> Self {
        Self::new(title.into(), false)
    }

    pub fn multi_line(title: impl Into<String>) -> Self {
        Self::new(title.into(), true)
    }

    fn new(title: String, multiline: bool) -> Self {
        Self {
            title,
            focused: false,
            buffer: String::new(),
            multiline,
            cursor: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Height needed for the current content, clamped to `MAX_VISIBLE_LINES`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        if !self.multiline {
            return 1 + VERTICAL_OVERHEAD;
        }
        let lines = wrap(&self.buffer, inner_width(area_width)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) {
        let text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// (row, column) of the cursor within the wrapped text.
    fn cursor_cell(&self, width: usize) -> (usize, usize) {
        let before = &self.buffer[..self.cursor];
        let row = wrap(before, width).len().saturating_sub(1);

        // Column from the last logical line; wrapped lines drop trailing spaces
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical = &before[line_start..];
        let segments = wrap(logical, width);
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|s| s.width())
            .sum();
        let col = logical.width().saturating_sub(consumed).min(width);
        (row, col)
    }
}

/// Wrap text into display lines; a trailing newline yields a trailing empty line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = textwrap::Options::new(width.max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let mut lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() || (text.ends_with('\n') && lines.last().is_some_and(|l| !l.is_empty())) {
        lines.push(String::new());
    }
    lines
}

fn inner_width(area_width: u16) -> usize {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD) as usize
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width).max(1);
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1) as usize;

        let lines = wrap(&self.buffer, width);
        let (row, col) = self.cursor_cell(width);
        let scroll = row.saturating_sub(visible - 1);
        let shown = lines
            .iter()
            .skip(scroll)
            .take(visible)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());

        frame.render_widget(Paragraph::new(shown).block(block), area);

        if self.focused {
            let x = area.x + 1 + col as u16;
            let y = area.y + 1 + (row - scroll) as u16;
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('\n') if !self.multiline => None,
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputBox::single_line("Search");
        typed(&mut input, "ab");
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_insert_at_cursor_multibyte() {
        let mut input = InputBox::single_line("Title");
        typed(&mut input, "café");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        typed(&mut input, "-");
        assert_eq!(input.buffer, "ca-fé");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "ca-f");
    }

    #[test]
    fn test_single_line_drops_newlines() {
        let mut input = InputBox::single_line("Tags");
        assert_eq!(input.handle_event(&TuiEvent::InputChar('\n')), None);
        input.handle_event(&TuiEvent::Paste("a\nb".to_string()));
        assert_eq!(input.buffer, "a b");
    }

    #[test]
    fn test_multi_line_keeps_newlines() {
        let mut input = InputBox::multi_line("Content");
        typed(&mut input, "one\ntwo");
        assert_eq!(input.buffer, "one\ntwo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "one\nwo");
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut input = InputBox::multi_line("Today");
        typed(&mut input, "hello");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hello".to_string()))
        );
        assert_eq!(input.buffer, "hello");
        input.clear();
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_calculate_height() {
        let mut input = InputBox::multi_line("Content");
        assert_eq!(input.calculate_height(40), 3);
        typed(&mut input, "a\nb\nc");
        assert_eq!(input.calculate_height(40), 5);
        typed(&mut input, &"\nx".repeat(20));
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + 2);
    }

    #[test]
    fn test_cursor_after_trailing_newline() {
        let mut input = InputBox::multi_line("Content");
        typed(&mut input, "abc\n");
        assert_eq!(input.cursor_cell(20), (1, 0));
    }

    #[test]
    fn test_render_shows_title_and_text() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::single_line("Search Blog Posts");
        input.focused = true;
        typed(&mut input, "trip");

        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Search Blog Posts"));
        assert!(text.contains("trip"));
    }
}
