//! Cursor Module - Pointer-following custom cursor state
//!
//! The custom cursor tracks pointer coordinates, becomes `active` on the
//! first movement, clears when the pointer leaves the page, and raises a
//! `hover` flag while the pointer sits inside a registered interactive
//! region (links, buttons, cards).
//!
//! Initialization guards: no cursor element on the page means no cursor
//! state - init no-ops instead of failing.

use std::cell::RefCell;

use spark_signals::{Signal, signal};

use crate::types::Rect;

// =============================================================================
// CURSOR ELEMENT
// =============================================================================

/// Marker for the page's cursor element. Present or not; it carries no
/// geometry of its own - the renderer draws it at the tracked coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorElement;

// =============================================================================
// CURSOR STATE
// =============================================================================

/// Reactive state of the custom cursor.
pub struct CursorState {
    x: Signal<u16>,
    y: Signal<u16>,
    active: Signal<bool>,
    hover: Signal<bool>,
    regions: RefCell<Vec<Rect>>,
}

impl CursorState {
    /// Wire the cursor. `None` (missing element) wires nothing.
    pub fn init(element: Option<CursorElement>) -> Option<Self> {
        element?;
        Some(Self {
            x: signal(0),
            y: signal(0),
            active: signal(false),
            hover: signal(false),
            regions: RefCell::new(Vec::new()),
        })
    }

    /// Current tracked position.
    pub fn position(&self) -> (u16, u16) {
        (self.x.get(), self.y.get())
    }

    /// Whether the cursor has seen pointer movement and is on-page.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Whether the pointer is over an interactive region.
    pub fn is_hovering(&self) -> bool {
        self.hover.get()
    }

    /// Reactive handle on the active flag.
    pub fn active_signal(&self) -> Signal<bool> {
        self.active.clone()
    }

    /// Reactive handle on the hover flag.
    pub fn hover_signal(&self) -> Signal<bool> {
        self.hover.clone()
    }

    /// Register an interactive region the cursor reacts to.
    pub fn add_hover_region(&self, region: Rect) {
        self.regions.borrow_mut().push(region);
    }

    /// Track a pointer movement: follow the coordinates, activate, and
    /// refresh the hover flag from region containment.
    pub fn pointer_moved(&self, x: u16, y: u16) {
        self.x.set(x);
        self.y.set(y);
        if !self.active.get() {
            self.active.set(true);
        }
        let hovering = self
            .regions
            .borrow()
            .iter()
            .any(|region| region.contains(x, y));
        if self.hover.get() != hovering {
            self.hover.set(hovering);
        }
    }

    /// The pointer left the page: deactivate, keep the last position.
    pub fn pointer_left(&self) {
        if self.active.get() {
            self.active.set(false);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_noops() {
        assert!(CursorState::init(None).is_none());
    }

    #[test]
    fn test_follows_pointer_and_activates() {
        let cursor = CursorState::init(Some(CursorElement)).unwrap();
        assert!(!cursor.is_active());

        cursor.pointer_moved(12, 7);
        assert_eq!(cursor.position(), (12, 7));
        assert!(cursor.is_active());

        cursor.pointer_moved(13, 7);
        assert_eq!(cursor.position(), (13, 7));
    }

    #[test]
    fn test_leave_deactivates_keeps_position() {
        let cursor = CursorState::init(Some(CursorElement)).unwrap();
        cursor.pointer_moved(5, 5);

        cursor.pointer_left();
        assert!(!cursor.is_active());
        assert_eq!(cursor.position(), (5, 5));

        // Movement re-activates.
        cursor.pointer_moved(6, 5);
        assert!(cursor.is_active());
    }

    #[test]
    fn test_hover_tracks_regions() {
        let cursor = CursorState::init(Some(CursorElement)).unwrap();
        cursor.add_hover_region(Rect::new(10, 10, 5, 2));
        cursor.add_hover_region(Rect::new(30, 10, 5, 2));

        cursor.pointer_moved(0, 0);
        assert!(!cursor.is_hovering());

        cursor.pointer_moved(12, 11);
        assert!(cursor.is_hovering());

        cursor.pointer_moved(20, 11);
        assert!(!cursor.is_hovering());

        cursor.pointer_moved(31, 10);
        assert!(cursor.is_hovering());
    }
}
