use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a `Rect`.
///
/// Data comes in as props (public fields set by the parent). `render` takes
/// `&mut self` because focused inputs place the terminal cursor while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes key events while it has focus.
pub trait EventHandler {
    /// What the parent gets back (a submitted query, a finished draft).
    type Event;

    /// `None` means the event was handled locally or ignored.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
