//! # Actions
//!
//! Everything that can happen in Daybook becomes an `Action`.
//! User picks a post? That's `Action::OpenSelected`.
//! The store hands the post back? That's `Action::PostLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` naming the store operation
//! the adapter should run next. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;

use log::debug;

use crate::core::post::{self, Draft};
use crate::core::state::{App, OpenPost, Section};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SwitchSection(Section),
    QueryChanged(String),
    PostsListed(Vec<String>),
    ListFailed(String),
    SelectNext,
    SelectPrev,
    OpenSelected,
    PostLoaded { filename: String, content: String },
    /// Esc: closes the composer if open, otherwise the post.
    Back,
    StartAppend,
    SubmitAppend(String),
    Appended { filename: String },
    SubmitPost(Draft),
    PostCreated { title: String, overwritten: bool },
    Download,
    Downloaded(PathBuf),
    Failed(String),
    Quit,
}

/// Work the adapter must do after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    RefreshList(Option<String>),
    LoadPost(String),
    CreatePost(Draft),
    AppendEntry { filename: String, content: String },
    Download(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::SwitchSection(section) => {
            app.section = section;
            app.open_post = None;
            app.composing = false;
            app.error = None;
            app.selected = 0;
            app.posts.clear();
            app.status_message = section.label().to_string();
            refresh(app)
        }
        Action::QueryChanged(query) => {
            app.query = query;
            app.open_post = None;
            app.composing = false;
            app.error = None;
            app.selected = 0;
            if app.query.is_empty() {
                app.posts.clear();
                app.status_message.clear();
            }
            refresh(app)
        }
        Action::PostsListed(posts) => {
            app.posts = posts;
            app.error = None;
            app.selected = app.selected.min(app.posts.len().saturating_sub(1));
            app.status_message = if !app.posts.is_empty() {
                format!("{} post(s)", app.posts.len())
            } else if app.section == Section::Search {
                "No posts match your search query.".to_string()
            } else {
                "No saved blog posts available.".to_string()
            };
            Effect::None
        }
        Action::ListFailed(message) => {
            app.posts.clear();
            app.selected = 0;
            app.error = Some(message);
            Effect::None
        }
        Action::SelectNext => {
            if app.open_post.is_none() && !app.posts.is_empty() {
                app.selected = (app.selected + 1).min(app.posts.len() - 1);
            }
            Effect::None
        }
        Action::SelectPrev => {
            if app.open_post.is_none() {
                app.selected = app.selected.saturating_sub(1);
            }
            Effect::None
        }
        Action::OpenSelected => match app.selected_post() {
            Some(name) => Effect::LoadPost(name.to_string()),
            None => Effect::None,
        },
        Action::PostLoaded { filename, content } => {
            // A reload after appending keeps the append's status
            let reloaded = app
                .open_post
                .as_ref()
                .is_some_and(|open| open.filename == filename);
            if !reloaded {
                app.status_message = format!("Complete Blog: {filename}");
            }
            app.error = None;
            app.open_post = Some(OpenPost { filename, content });
            Effect::None
        }
        Action::Back => {
            if app.composing {
                app.composing = false;
            } else {
                app.open_post = None;
            }
            app.error = None;
            Effect::None
        }
        Action::StartAppend => {
            if app.open_post.is_some() {
                app.composing = true;
                app.error = None;
            }
            Effect::None
        }
        Action::SubmitAppend(content) => {
            let Some(open) = &app.open_post else {
                return Effect::None;
            };
            match post::validate_entry(&content) {
                Ok(()) => Effect::AppendEntry {
                    filename: open.filename.clone(),
                    content,
                },
                Err(e) => {
                    app.error = Some(e.to_string());
                    Effect::None
                }
            }
        }
        Action::Appended { filename } => {
            app.composing = false;
            app.error = None;
            app.status_message = "Today's content added successfully.".to_string();
            Effect::LoadPost(filename)
        }
        Action::SubmitPost(draft) => match draft.validate() {
            Ok(()) => Effect::CreatePost(draft),
            Err(e) => {
                app.error = Some(e.to_string());
                Effect::None
            }
        },
        Action::PostCreated { title, overwritten } => {
            app.error = None;
            app.status_message = if overwritten {
                format!("Blog post '{title}' saved successfully (replaced an existing post).")
            } else {
                format!("Blog post '{title}' saved successfully.")
            };
            Effect::None
        }
        Action::Download => match &app.open_post {
            Some(open) => Effect::Download(open.filename.clone()),
            None => Effect::None,
        },
        Action::Downloaded(path) => {
            app.status_message = format!("Downloaded to {}", path.display());
            Effect::None
        }
        Action::Failed(message) => {
            app.error = Some(message);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn refresh(app: &App) -> Effect {
    match app.list_query() {
        Some(query) => Effect::RefreshList(query),
        None => Effect::None,
    }
}
