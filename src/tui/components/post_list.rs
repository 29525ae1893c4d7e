//! # Post List Component
//!
//! Selectable list of post filenames, used by both Search and Browse.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListState` lives in `TuiState`
//! - `PostList` is created each frame with borrowed props and state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::post::title_from_filename;

pub struct PostList<'a> {
    posts: &'a [String],
    selected: usize,
    title: &'a str,
    empty_message: &'a str,
    state: &'a mut ListState,
}

impl<'a> PostList<'a> {
    pub fn new(
        posts: &'a [String],
        selected: usize,
        title: &'a str,
        empty_message: &'a str,
        state: &'a mut ListState,
    ) -> Self {
        Self {
            posts,
            selected,
            title,
            empty_message,
            state,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title);

        if self.posts.is_empty() {
            self.state.select(None);
            let empty = Paragraph::new(self.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .posts
            .iter()
            .map(|name| ListItem::new(format_row(name, inner_width)))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        self.state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, self.state);
    }
}

/// `filename` on the left, the derived title dimmed on the right when it fits.
fn format_row(filename: &str, width: usize) -> Line<'static> {
    let title = title_from_filename(filename);
    let used = filename.width() + 2 + title.width();
    if used > width || title == filename {
        return Line::from(truncate_str(filename, width));
    }
    let gap = " ".repeat(width - filename.width() - title.width());
    Line::from(vec![
        Span::raw(filename.to_string()),
        Span::raw(gap),
        Span::styled(title, Style::default().fg(Color::DarkGray)),
    ])
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
