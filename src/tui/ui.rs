use crate::core::state::{App, Section};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{PostList, PostView, Sidebar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Sidebar width: the longest "F3 ○ Create New Blog Post" line plus its border
const SIDEBAR_WIDTH: u16 = 26;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);

    TitleBar::new(tui.store_label.clone(), app.status_message.clone()).render(frame, title_area);
    Sidebar::new(app.section).render(frame, sidebar_area);

    if let Some(post) = &app.open_post {
        if app.composing {
            let composer_height = tui.composer.calculate_height(main_area.width);
            let [view_area, composer_area] =
                Layout::vertical([Min(3), Length(composer_height)]).areas(main_area);
            PostView::new(post, &mut tui.view_scroll).render(frame, view_area);
            tui.composer.focused = true;
            tui.composer.render(frame, composer_area);
        } else {
            PostView::new(post, &mut tui.view_scroll).render(frame, main_area);
        }
    } else {
        draw_section(frame, main_area, app, tui);
    }

    draw_footer(frame, footer_area, app);
}

fn draw_section(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    match app.section {
        Section::Search => {
            let [search_area, list_area] = Layout::vertical([Length(3), Min(0)]).areas(area);
            tui.search_box.focused = true;
            tui.search_box.render(frame, search_area);

            let empty = if app.query.is_empty() {
                "Type a title or regular expression to search."
            } else {
                "No posts match your search query."
            };
            PostList::new(&app.posts, app.selected, " Results ", empty, &mut tui.list_state)
                .render(frame, list_area);
        }
        Section::Browse => {
            PostList::new(
                &app.posts,
                app.selected,
                " Saved Posts ",
                "No saved blog posts available.",
                &mut tui.list_state,
            )
            .render(frame, area);
        }
        Section::Create => tui.form.render(frame, area),
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let span = match &app.error {
        Some(error) => Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(help_text(app), Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(span, area);
}

/// Key hints for whatever currently has focus.
pub fn help_text(app: &App) -> &'static str {
    if app.composing {
        return "Enter save entry · Ctrl+J newline · Esc cancel";
    }
    if app.open_post.is_some() {
        return "Ctrl+A add today's content · Ctrl+D download · PgUp/PgDn scroll · Esc back";
    }
    match app.section {
        Section::Search => "Type to search · ↑/↓ select · Enter open · F1-F3 sections · Ctrl+C quit",
        Section::Browse => "↑/↓ select · Enter open · F1-F3 sections · Ctrl+C quit",
        Section::Create => "Tab next field · ←/→ category · Ctrl+J newline · Enter on content saves",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::OpenPost;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn app(section: Section) -> App {
        App::new(section, vec!["Other".to_string()])
    }

    fn draw(app: &App) -> String {
        let mut tui = TuiState::new("blog_posts", app.categories.clone());
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_help_text_follows_focus() {
        let mut app = app(Section::Browse);
        assert!(help_text(&app).starts_with("↑/↓ select"));

        app.open_post = Some(OpenPost {
            filename: "a.txt".to_string(),
            content: String::new(),
        });
        assert!(help_text(&app).contains("Ctrl+A"));

        app.composing = true;
        assert!(help_text(&app).contains("Esc cancel"));
    }

    #[test]
    fn test_draw_browse_lists_posts() {
        let mut app = app(Section::Browse);
        app.posts = vec!["Hello_World.txt".to_string()];
        let screen = draw(&app);
        assert!(screen.contains("Daybook (blog_posts)"));
        assert!(screen.contains("View All Saved Posts"));
        assert!(screen.contains("Hello_World.txt"));
    }

    #[test]
    fn test_draw_error_in_footer() {
        let mut app = app(Section::Create);
        app.error = Some("Content cannot be empty.".to_string());
        let screen = draw(&app);
        assert!(screen.contains("Error: Content cannot be empty."));
        assert!(screen.contains("Category"));
    }

    #[test]
    fn test_draw_open_post() {
        let mut app = app(Section::Search);
        app.open_post = Some(OpenPost {
            filename: "Trip.txt".to_string(),
            content: "Title: Trip\nCategory: Other\nTags: t\nContent:\nDay 1\n".to_string(),
        });
        app.composing = true;
        let screen = draw(&app);
        assert!(screen.contains("Complete Blog: Trip.txt"));
        assert!(screen.contains("Add Today's Content"));
    }
}
