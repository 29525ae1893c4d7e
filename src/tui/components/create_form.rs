//! # Create Form Component
//!
//! Title, category, tags and content for a new post. Tab / Shift+Tab move
//! between fields, Left/Right pick a category, Enter advances and submits
//! from the content field. Ctrl+J breaks lines inside the content.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::post::Draft;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::InputBox;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Category,
    Tags,
    Content,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Title, Field::Category, Field::Tags, Field::Content];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit(Draft),
}

pub struct CreateForm {
    pub title: InputBox,
    pub tags: InputBox,
    pub content: InputBox,
    pub categories: Vec<String>,
    pub category_index: usize,
    pub focus: Field,
}

impl CreateForm {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            title: InputBox::single_line("Title"),
            tags: InputBox::single_line("Tags (comma-separated)"),
            content: InputBox::multi_line("Content"),
            categories,
            category_index: 0,
            focus: Field::Title,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.categories.get(self.category_index).map(String::as_str)
    }

    pub fn draft(&self) -> Draft {
        Draft {
            title: self.title.buffer.clone(),
            category: self.category().unwrap_or_default().to_string(),
            tags: self.tags.buffer.clone(),
            content: self.content.buffer.clone(),
        }
    }

    /// Clear the text fields after a successful save. The category stays.
    pub fn reset(&mut self) {
        self.title.clear();
        self.tags.clear();
        self.content.clear();
        self.focus = Field::Title;
    }

    fn cycle_category(&mut self, forward: bool) {
        let n = self.categories.len();
        if n == 0 {
            return;
        }
        self.category_index = if forward {
            (self.category_index + 1) % n
        } else {
            (self.category_index + n - 1) % n
        };
    }

    fn focused_input(&mut self) -> Option<&mut InputBox> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Tags => Some(&mut self.tags),
            Field::Content => Some(&mut self.content),
            Field::Category => None,
        }
    }

    fn render_category(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Field::Category;
        let border_style = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled("◀ ", border_style),
            Span::styled(self.category().unwrap_or("(none)"), value_style),
            Span::styled(" ▶", border_style),
        ]);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Category");
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

impl Component for CreateForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [title_area, category_area, tags_area, content_area] =
            Layout::vertical([Length(3), Length(3), Length(3), Min(3)]).areas(area);

        self.title.focused = self.focus == Field::Title;
        self.tags.focused = self.focus == Field::Tags;
        self.content.focused = self.focus == Field::Content;

        self.title.render(frame, title_area);
        self.render_category(frame, category_area);
        self.tags.render(frame, tags_area);
        self.content.render(frame, content_area);
    }
}

impl EventHandler for CreateForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::NextField => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::PrevField => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::Submit if self.focus == Field::Content => Some(FormEvent::Submit(self.draft())),
            TuiEvent::Submit => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::CursorLeft if self.focus == Field::Category => {
                self.cycle_category(false);
                None
            }
            TuiEvent::CursorRight if self.focus == Field::Category => {
                self.cycle_category(true);
                None
            }
            // Text fields consume the rest; the category picker ignores typing
            _ => {
                self.focused_input()?.handle_event(event);
                None
            }
        }
    }
}
