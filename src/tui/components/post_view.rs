//! # Post View Component
//!
//! Shows a whole post document, header lines first, appended entries with
//! their date stamps highlighted. Scrolls with PageUp/PageDown and Up/Down.
//!
//! The scroll offset is persistent (`TuiState::view_scroll`) and clamped
//! here against the wrapped line count on every render.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::post::{PostHeader, is_stamp_line};
use crate::core::state::OpenPost;

pub struct PostView<'a> {
    post: &'a OpenPost,
    scroll: &'a mut u16,
}

impl<'a> PostView<'a> {
    pub fn new(post: &'a OpenPost, scroll: &'a mut u16) -> Self {
        Self { post, scroll }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = PostHeader::parse(&self.post.content);
        let title = if header.title.is_empty() {
            format!(" Complete Blog: {} ", self.post.filename)
        } else {
            format!(" Complete Blog: {} ({}) ", self.post.filename, header.title)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);

        let paragraph = Paragraph::new(styled_document(&self.post.content))
            .block(block)
            .wrap(Wrap { trim: false });

        // line_count includes the block's borders
        let total = paragraph.line_count(area.width) as u16;
        let max_scroll = total.saturating_sub(area.height);
        *self.scroll = (*self.scroll).min(max_scroll);

        frame.render_widget(paragraph.scroll((*self.scroll, 0)), area);
    }
}

fn styled_document(document: &str) -> Text<'_> {
    let header_style = Style::default().fg(Color::Yellow);
    let stamp_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = document
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i < 4 && is_header_line(line) {
                Line::from(Span::styled(line, header_style))
            } else if is_stamp_line(line) {
                Line::from(Span::styled(line, stamp_style))
            } else {
                Line::raw(line)
            }
        })
        .collect();
    Text::from(lines)
}

fn is_header_line(line: &str) -> bool {
    ["Title: ", "Category: ", "Tags: "]
        .iter()
        .any(|p| line.starts_with(p))
        || line == "Content:"
}
