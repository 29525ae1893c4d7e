//! # Application State
//!
//! Core business state for Daybook. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── section: Section            // Search | Browse | Create
//! ├── posts: Vec<String>          // filenames currently listed
//! ├── selected: usize             // index into posts
//! ├── query: String               // search box text
//! ├── open_post: Option<OpenPost> // post being viewed
//! ├── composing: bool             // append composer open
//! ├── status_message: String      // status bar text
//! ├── error: Option<String>       // error message
//! └── categories: Vec<String>     // choices for new posts
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use clap::ValueEnum;

use crate::core::config::ResolvedConfig;

/// Top-level navigation, one per sidebar entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Section {
    #[default]
    Search,
    Browse,
    Create,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Search, Section::Browse, Section::Create];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Search => "Search Blog Posts",
            Section::Browse => "View All Saved Posts",
            Section::Create => "Create New Blog Post",
        }
    }
}

/// A post loaded for viewing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPost {
    pub filename: String,
    pub content: String,
}

pub struct App {
    pub section: Section,
    pub posts: Vec<String>,
    pub selected: usize,
    pub query: String,
    pub open_post: Option<OpenPost>,
    /// True while the "add today's content" composer is showing.
    pub composing: bool,
    pub status_message: String,
    pub error: Option<String>,
    pub categories: Vec<String>,
}

impl App {
    pub fn new(section: Section, categories: Vec<String>) -> Self {
        Self {
            section,
            posts: Vec::new(),
            selected: 0,
            query: String::new(),
            open_post: None,
            composing: false,
            status_message: String::from("Welcome to Daybook!"),
            error: None,
            categories,
        }
    }

    pub fn from_config(section: Section, config: &ResolvedConfig) -> Self {
        Self::new(section, config.categories.clone())
    }

    pub fn selected_post(&self) -> Option<&str> {
        self.posts.get(self.selected).map(String::as_str)
    }

    /// The query to list with for the current section, or `None` when the
    /// section lists nothing (Create, or Search with an empty box).
    pub fn list_query(&self) -> Option<Option<String>> {
        match self.section {
            Section::Browse => Some(None),
            Section::Search if !self.query.is_empty() => Some(Some(self.query.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Section::Search, vec!["Other".to_string()])
    }

    #[test]
    fn test_app_new_defaults() {
        let app = app();
        assert_eq!(app.status_message, "Welcome to Daybook!");
        assert!(app.posts.is_empty());
        assert!(app.open_post.is_none());
        assert!(!app.composing);
    }

    #[test]
    fn test_list_query_per_section() {
        let mut app = app();
        assert_eq!(app.list_query(), None);

        app.query = "trip".to_string();
        assert_eq!(app.list_query(), Some(Some("trip".to_string())));

        app.section = Section::Browse;
        assert_eq!(app.list_query(), Some(None));

        app.section = Section::Create;
        assert_eq!(app.list_query(), None);
    }

    #[test]
    fn test_selected_post() {
        let mut app = app();
        assert_eq!(app.selected_post(), None);
        app.posts = vec!["a.txt".to_string(), "b.txt".to_string()];
        app.selected = 1;
        assert_eq!(app.selected_post(), Some("b.txt"));
    }
}
