//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! core reducer returns an `Effect`; `perform` runs it against the
//! `PostStore` and feeds the outcome back in as the next `Action`, until
//! nothing is left to do.
//!
//! ```text
//! TuiEvent → dispatch() → Action → update() → Effect → perform() → Action → ...
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event (including terminal resize).

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::widgets::ListState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::post::Stamp;
use crate::core::state::{App, Section};
use crate::core::store::PostStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{CreateForm, FormEvent, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Lines moved per PageUp/PageDown in the post view
const PAGE_LINES: u16 = 10;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search_box: InputBox,
    pub composer: InputBox,
    pub form: CreateForm,
    pub list_state: ListState,
    /// Post view scroll offset; clamped by `PostView` on render
    pub view_scroll: u16,
    /// Posts directory as shown in the title bar
    pub store_label: String,
}

impl TuiState {
    pub fn new(store_label: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            search_box: InputBox::single_line("Search Blog Posts"),
            composer: InputBox::multi_line("Add Today's Content"),
            form: CreateForm::new(categories),
            list_state: ListState::default(),
            view_scroll: 0,
            store_label: store_label.into(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // DISAMBIGUATE_ESCAPE_CODES lets Ctrl+J and Enter arrive as different keys
        execute!(
            stdout(),
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig, section: Section) -> io::Result<()> {
    let store = PostStore::new(&config.posts_dir);
    let mut app = App::from_config(section, &config);
    let mut tui = TuiState::new(
        config.posts_dir.display().to_string(),
        config.categories.clone(),
    );
    info!(
        "Starting TUI in {:?} with posts in {}",
        section,
        store.root().display()
    );

    if let Some(query) = app.list_query() {
        run_effects(
            &mut app,
            &mut tui,
            &store,
            &config.download_dir,
            Effect::RefreshList(query),
        );
    }

    let mut terminal = ratatui::init();
    let mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable terminal modes: {}", e);
            None
        }
    };

    let mut needs_redraw = true; // Force first frame
    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = dispatch(&app, &mut tui, &event) else {
                continue;
            };
            if apply(&mut app, &mut tui, &store, &config.download_dir, action) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break Ok(());
        }
    };

    drop(mode_guard);
    ratatui::restore();
    info!("TUI exited");
    result
}

// ============================================================================
// Event → Action
// ============================================================================

/// Route a terminal event to whatever has focus. Component-local events
/// (typing, scrolling) are handled in place and yield no action.
fn dispatch(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::SwitchSection(section) => return Some(Action::SwitchSection(*section)),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if app.composing {
        if matches!(event, TuiEvent::Escape) {
            return Some(Action::Back);
        }
        return match tui.composer.handle_event(event)? {
            InputEvent::Submit(text) => Some(Action::SubmitAppend(text)),
            InputEvent::ContentChanged => None,
        };
    }

    if app.open_post.is_some() {
        match event {
            TuiEvent::Escape => return Some(Action::Back),
            TuiEvent::StartAppend => return Some(Action::StartAppend),
            TuiEvent::Download => return Some(Action::Download),
            TuiEvent::CursorUp => tui.view_scroll = tui.view_scroll.saturating_sub(1),
            TuiEvent::CursorDown => tui.view_scroll = tui.view_scroll.saturating_add(1),
            TuiEvent::PageUp => tui.view_scroll = tui.view_scroll.saturating_sub(PAGE_LINES),
            TuiEvent::PageDown => tui.view_scroll = tui.view_scroll.saturating_add(PAGE_LINES),
            _ => {}
        }
        return None;
    }

    match app.section {
        Section::Search => match event {
            TuiEvent::CursorUp => Some(Action::SelectPrev),
            TuiEvent::CursorDown => Some(Action::SelectNext),
            TuiEvent::Escape if !tui.search_box.buffer.is_empty() => {
                tui.search_box.clear();
                Some(Action::QueryChanged(String::new()))
            }
            _ => match tui.search_box.handle_event(event)? {
                InputEvent::Submit(_) => Some(Action::OpenSelected),
                InputEvent::ContentChanged => {
                    Some(Action::QueryChanged(tui.search_box.buffer.clone()))
                }
            },
        },
        Section::Browse => match event {
            TuiEvent::CursorUp => Some(Action::SelectPrev),
            TuiEvent::CursorDown => Some(Action::SelectNext),
            TuiEvent::Submit => Some(Action::OpenSelected),
            _ => None,
        },
        Section::Create => match tui.form.handle_event(event)? {
            FormEvent::Submit(draft) => Some(Action::SubmitPost(draft)),
        },
    }
}

// ============================================================================
// Action → Effect → Action ...
// ============================================================================

/// Run an action and every effect it chains into. Returns true to quit.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    store: &PostStore,
    download_dir: &Path,
    action: Action,
) -> bool {
    let effect = step(app, tui, action);
    run_effects(app, tui, store, download_dir, effect)
}

fn run_effects(
    app: &mut App,
    tui: &mut TuiState,
    store: &PostStore,
    download_dir: &Path,
    mut effect: Effect,
) -> bool {
    loop {
        match effect {
            Effect::Quit => return true,
            Effect::None => return false,
            other => match perform(store, download_dir, other) {
                Some(action) => effect = step(app, tui, action),
                None => return false,
            },
        }
    }
}

/// Sync presentation state the reducer doesn't own, then update.
fn step(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    match &action {
        Action::OpenSelected => {
            tui.view_scroll = 0;
            tui.composer.clear();
        }
        Action::Appended { .. } => {
            tui.composer.clear();
            // Show the new entry; PostView clamps to the last page
            tui.view_scroll = u16::MAX;
        }
        Action::PostCreated { .. } => tui.form.reset(),
        _ => {}
    }
    update(app, action)
}

/// Execute one effect against the store, returning the outcome as an action.
fn perform(store: &PostStore, download_dir: &Path, effect: Effect) -> Option<Action> {
    debug!("perform: {:?}", effect);
    let action = match effect {
        Effect::None | Effect::Quit => return None,
        Effect::RefreshList(query) => match store.list(query.as_deref()) {
            Ok(posts) => Action::PostsListed(posts),
            Err(e) => Action::ListFailed(e.to_string()),
        },
        Effect::LoadPost(filename) => match store.load(&filename) {
            Ok(content) => Action::PostLoaded { filename, content },
            Err(e) => Action::Failed(e.to_string()),
        },
        Effect::CreatePost(draft) => {
            let overwritten = store.exists(&draft.filename());
            match store.create(&draft, &Stamp::now()) {
                Ok(_) => Action::PostCreated {
                    title: draft.title,
                    overwritten,
                },
                Err(e) => Action::Failed(e.to_string()),
            }
        }
        Effect::AppendEntry { filename, content } => {
            // The store would create a header-less file; refuse instead
            if !store.exists(&filename) {
                Action::Failed(format!("Post '{filename}' no longer exists."))
            } else {
                match store.append(&filename, &content, &Stamp::now()) {
                    Ok(_) => Action::Appended { filename },
                    Err(e) => Action::Failed(e.to_string()),
                }
            }
        }
        Effect::Download(filename) => match store.export(&filename, download_dir) {
            Ok(path) => Action::Downloaded(path),
            Err(e) => Action::Failed(e.to_string()),
        },
    };
    Some(action)
}
