//! # TitleBar Component
//!
//! Top status bar: app name, where posts live, and the latest status.
//!
//! Purely presentational; all fields are props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(tui.store_label.clone(), app.status_message.clone());
//! title_bar.render(frame, title_area);
//! ```
//!
//! The text collapses as space runs out:
//!
//! 1. `"Daybook (blog_posts) | Complete Blog: Trip.txt"`
//! 2. `"Daybook (blog_posts)"` when the status is empty

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Display form of the posts directory
    pub store_label: String,
    /// Status message (e.g., "Today's content added successfully.")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(store_label: String, status_message: String) -> Self {
        Self {
            store_label,
            status_message,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Daybook ({})", self.store_label)
        } else {
            format!("Daybook ({}) | {}", self.store_label, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_title_with_status() {
        let bar = TitleBar::new("blog_posts".to_string(), "2 post(s)".to_string());
        assert_eq!(bar.title_text(), "Daybook (blog_posts) | 2 post(s)");
    }

    #[test]
    fn test_title_without_status() {
        let bar = TitleBar::new("blog_posts".to_string(), String::new());
        assert_eq!(bar.title_text(), "Daybook (blog_posts)");
    }

    #[test]
    fn test_render() {
        let mut terminal = Terminal::new(TestBackend::new(50, 1)).unwrap();
        let mut bar = TitleBar::new("journal".to_string(), "Ready".to_string());
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area);
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.starts_with("Daybook (journal) | Ready"));
    }
}
