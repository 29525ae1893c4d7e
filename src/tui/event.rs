use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::state::Section;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Global
    ForceQuit, // Ctrl+C
    SwitchSection(Section),
    Resize,

    // Navigation
    Escape,
    Submit,
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    NextField,
    PrevField,

    // Post actions
    StartAppend, // Ctrl+A
    Download,    // Ctrl+D

    // Text editing
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::StartAppend),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(TuiEvent::Download),
        // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
        (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
        (_, KeyCode::F(1)) => Some(TuiEvent::SwitchSection(Section::Search)),
        (_, KeyCode::F(2)) => Some(TuiEvent::SwitchSection(Section::Browse)),
        (_, KeyCode::F(3)) => Some(TuiEvent::SwitchSection(Section::Create)),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        (_, KeyCode::Tab) => Some(TuiEvent::NextField),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('j')),
            Some(TuiEvent::InputChar('\n'))
        );
        // Unbound control chords are not typed as text
        assert_eq!(map_key(KeyModifiers::CONTROL, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_shifted_chars_are_text() {
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::Char('T')),
            Some(TuiEvent::InputChar('T'))
        );
    }

    #[test]
    fn test_function_keys_switch_section() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::F(2)),
            Some(TuiEvent::SwitchSection(Section::Browse))
        );
    }
}
