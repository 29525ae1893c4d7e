//! # Sidebar Component
//!
//! The three sections, with the active one highlighted. Stateless: the
//! current section is a prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::state::Section;
use crate::tui::component::Component;

pub struct Sidebar {
    pub current: Section,
}

impl Sidebar {
    pub fn new(current: Section) -> Self {
        Self { current }
    }
}

fn line_for(section: Section, index: usize, active: bool) -> Line<'static> {
    let marker = if active { "● " } else { "○ " };
    let style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(format!("F{} ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(marker, style),
        Span::styled(section.label(), style),
    ])
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = Section::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| line_for(*s, i, *s == self.current))
            .collect();

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Choose an Option ");

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_line_is_marked() {
        let active = line_for(Section::Browse, 1, true).to_string();
        assert_eq!(active, "F2 ● View All Saved Posts");
        let idle = line_for(Section::Create, 2, false).to_string();
        assert_eq!(idle, "F3 ○ Create New Blog Post");
    }
}
