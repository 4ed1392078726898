//! Menu Module - Overlay navigation menu state
//!
//! The hamburger/menu/overlay triad. Toggling sets `open`, mirrors
//! `aria_expanded`, and locks page scroll while the menu covers it. The
//! menu closes on link activation, overlay activation, or Escape.
//!
//! Initialization guards: an incomplete triad means there is no menu on the
//! page, and init no-ops instead of failing.
//!
//! # Example
//!
//! ```ignore
//! use reveal_tui::state::menu::{MenuState, MenuTriad};
//! use reveal_tui::types::Rect;
//!
//! let menu = MenuState::init(Some(MenuTriad {
//!     hamburger: Rect::new(76, 0, 3, 1),
//!     menu: Rect::new(60, 1, 20, 10),
//!     overlay: Rect::new(0, 1, 60, 23),
//! }));
//! if let Some(menu) = &menu {
//!     menu.toggle();
//!     assert!(menu.is_open());
//! }
//! ```

use spark_signals::{Signal, signal};

use crate::types::Rect;

// =============================================================================
// TRIAD
// =============================================================================

/// Screen regions of the three menu elements.
///
/// All three must exist for the menu to be wired at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTriad {
    /// The toggle button.
    pub hamburger: Rect,
    /// The slide-in menu panel.
    pub menu: Rect,
    /// The backdrop covering the rest of the page while open.
    pub overlay: Rect,
}

// =============================================================================
// MENU STATE
// =============================================================================

/// Reactive state of the overlay menu.
pub struct MenuState {
    triad: MenuTriad,
    open: Signal<bool>,
    aria_expanded: Signal<bool>,
    scroll_locked: Signal<bool>,
}

impl MenuState {
    /// Wire the menu. `None` (missing triad) wires nothing.
    pub fn init(triad: Option<MenuTriad>) -> Option<Self> {
        let triad = triad?;
        Some(Self {
            triad,
            open: signal(false),
            aria_expanded: signal(false),
            scroll_locked: signal(false),
        })
    }

    /// The triad regions, for the renderer and pointer routing.
    pub fn triad(&self) -> MenuTriad {
        self.triad
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Reactive handle on the open flag.
    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    /// Mirrored `aria-expanded` attribute value.
    pub fn aria_expanded(&self) -> bool {
        self.aria_expanded.get()
    }

    /// Whether page scroll is locked behind the menu.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
        self.aria_expanded.set(open);
        self.scroll_locked.set(open);
    }

    /// Flip the menu open/closed (hamburger activation).
    pub fn toggle(&self) {
        self.set_open(!self.open.get());
    }

    /// Close the menu. A no-op when already closed.
    pub fn close(&self) {
        if self.open.get() {
            self.set_open(false);
        }
    }

    /// A nav link was activated: close so the page behind is visible.
    pub fn link_activated(&self) {
        self.close();
    }

    /// Escape pressed: close only when open.
    pub fn escape_pressed(&self) {
        self.close();
    }

    /// Route a pointer press by region: hamburger toggles, the overlay
    /// closes while open, everything else is ignored.
    pub fn pointer_down(&self, x: u16, y: u16) {
        if self.triad.hamburger.contains(x, y) {
            self.toggle();
        } else if self.open.get() && self.triad.overlay.contains(x, y) {
            self.close();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
