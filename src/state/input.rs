//! Input Module - Event conversion
//!
//! Bridges crossterm's event system with the page's pointer/key events.
//! Conversion only - routing lives in the composition root
//! ([`Page::handle_event`](crate::page::Page::handle_event)), which knows
//! which collaborators are wired.
//!
//! Terminal mapping notes: there is no per-element mouseleave in a
//! terminal, so losing terminal focus stands in for the pointer leaving
//! the page; wheel events carry a fixed row delta.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Rows scrolled per wheel notch.
pub const WHEEL_SCROLL: i32 = 3;

// =============================================================================
// EVENT TYPES
// =============================================================================

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Closes the overlay menu.
    Escape,
    /// Activates the focused link.
    Enter,
    /// Anything else the page ignores.
    Other,
}

/// Unified event type for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Pointer moved to screen cell (x, y).
    PointerMove { x: u16, y: u16 },
    /// Pointer pressed at screen cell (x, y).
    PointerDown { x: u16, y: u16 },
    /// Pointer left the page.
    PointerLeft,
    /// Wheel scroll by a signed row delta.
    Scroll { delta: i32 },
    /// Key press.
    Key(Key),
    /// Terminal resized to (width, height).
    Resize { width: u16, height: u16 },
    /// No event or unhandled event type.
    None,
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm event into a page event.
pub fn convert_event(event: CrosstermEvent) -> PageEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Resize(width, height) => PageEvent::Resize { width, height },
        CrosstermEvent::FocusLost => PageEvent::PointerLeft,
        _ => PageEvent::None,
    }
}

fn convert_mouse_event(event: CrosstermMouseEvent) -> PageEvent {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PageEvent::PointerMove { x, y },
        MouseEventKind::Down(_) => PageEvent::PointerDown { x, y },
        MouseEventKind::ScrollUp => PageEvent::Scroll {
            delta: -WHEEL_SCROLL,
        },
        MouseEventKind::ScrollDown => PageEvent::Scroll {
            delta: WHEEL_SCROLL,
        },
        _ => PageEvent::None,
    }
}

fn convert_key_event(event: CrosstermKeyEvent) -> PageEvent {
    if event.kind == KeyEventKind::Release {
        return PageEvent::None;
    }
    let key = match event.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    };
    PageEvent::Key(key)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_pointer_events() {
        assert_eq!(
            convert_event(mouse(MouseEventKind::Moved, 10, 4)),
            PageEvent::PointerMove { x: 10, y: 4 }
        );
        assert_eq!(
            convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 2)),
            PageEvent::PointerDown { x: 3, y: 2 }
        );
    }

    #[test]
    fn test_wheel_scroll_delta() {
        assert_eq!(
            convert_event(mouse(MouseEventKind::ScrollUp, 0, 0)),
            PageEvent::Scroll { delta: -3 }
        );
        assert_eq!(
            convert_event(mouse(MouseEventKind::ScrollDown, 0, 0)),
            PageEvent::Scroll { delta: 3 }
        );
    }

    #[test]
    fn test_key_conversion() {
        let escape = CrosstermEvent::Key(CrosstermKeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(convert_event(escape), PageEvent::Key(Key::Escape));

        let other = CrosstermEvent::Key(CrosstermKeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
        ));
        assert_eq!(convert_event(other), PageEvent::Key(Key::Other));
    }

    #[test]
    fn test_focus_lost_is_pointer_leave() {
        assert_eq!(convert_event(CrosstermEvent::FocusLost), PageEvent::PointerLeft);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            convert_event(CrosstermEvent::Resize(80, 24)),
            PageEvent::Resize {
                width: 80,
                height: 24
            }
        );
    }
}
