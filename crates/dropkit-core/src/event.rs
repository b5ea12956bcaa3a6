use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Terminal input delivered to components by global listeners.
///
/// Each variant wraps the corresponding [`crossterm::event::Event`] payload,
/// so key codes, modifiers and mouse buttons are matched with the full
/// crossterm API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl InputEvent {
    /// The cell under the pointer if this is a primary-button press.
    pub fn pointer_down(&self) -> Option<Position> {
        match self {
            InputEvent::Mouse(mouse) => pointer_down(mouse),
            _ => None,
        }
    }
}

/// The cell under the pointer if `mouse` is a primary-button press.
pub fn pointer_down(mouse: &MouseEvent) -> Option<Position> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Position::new(mouse.column, mouse.row)),
        _ => None,
    }
}

/// Whether `position` lies inside any of `regions`.
///
/// Empty rectangles never contain anything.
pub fn hit_any(regions: &[Rect], position: Position) -> bool {
    regions
        .iter()
        .any(|rect| !rect.is_empty() && rect.contains(position))
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => InputEvent::Key(k),
            crossterm::event::Event::Mouse(m) => InputEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => InputEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => InputEvent::FocusGained,
            crossterm::event::Event::FocusLost => InputEvent::FocusLost,
            crossterm::event::Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}
