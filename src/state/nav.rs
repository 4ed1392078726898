//! Nav Module - Active-section tracking and smooth in-page scroll
//!
//! Two concerns wired to the same section list:
//! - The active nav item follows scroll position: the last section whose
//!   top sits within [`ACTIVE_PROBE`] rows above the scroll offset.
//! - Anchor navigation smooth-scrolls to a section's top minus the fixed
//!   [`HEADER_OFFSET`], easing toward the target in timer-driven steps.
//!
//! Unknown anchor ids are a no-op, never an error.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::clock::TimerQueue;
use crate::types::{Bounds, Ticks};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Fixed header height subtracted from every scroll target.
pub const HEADER_OFFSET: u32 = 80;

/// How far above the scroll offset a section top may sit and still count
/// as the active section.
pub const ACTIVE_PROBE: u32 = 100;

/// Gap between smooth-scroll easing steps.
pub const SCROLL_STEP: Ticks = 16;

// =============================================================================
// SECTIONS
// =============================================================================

/// An anchored page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Anchor id (`#id` in nav links).
    pub id: String,
    /// Document extent of the section.
    pub bounds: Bounds,
}

impl Section {
    /// Create a section.
    pub fn new(id: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            bounds,
        }
    }
}

/// Target scroll offset for a section top: header-adjusted, floored at 0.
#[inline]
pub fn scroll_target(section_top: u32) -> u32 {
    section_top.saturating_sub(HEADER_OFFSET)
}

/// The id of the last section whose top is at or above `scroll_top +
/// ACTIVE_PROBE`, if any.
pub fn active_section(sections: &[Section], scroll_top: u32) -> Option<&str> {
    let probe = scroll_top + ACTIVE_PROBE;
    sections
        .iter()
        .filter(|section| section.bounds.top <= probe)
        .next_back()
        .map(|section| section.id.as_str())
}

// =============================================================================
// NAV STATE
// =============================================================================

struct NavInner {
    sections: Vec<Section>,
    scroll_top: Signal<u32>,
    /// Active section id; empty string = none.
    active: Signal<String>,
    max_scroll: u32,
}

/// Reactive nav state. Cheap to clone; clones share state, which lets the
/// smooth-scroll timer chain carry a handle.
#[derive(Clone)]
pub struct NavState {
    inner: Rc<NavInner>,
}

impl NavState {
    /// Wire nav state over the page's sections. `max_scroll` clamps smooth
    /// scrolling to the document end.
    pub fn new(sections: Vec<Section>, max_scroll: u32) -> Self {
        let nav = Self {
            inner: Rc::new(NavInner {
                sections,
                scroll_top: signal(0),
                active: signal(String::new()),
                max_scroll,
            }),
        };
        nav.recompute_active();
        nav
    }

    /// Current scroll offset.
    pub fn scroll_top(&self) -> u32 {
        self.inner.scroll_top.get()
    }

    /// Reactive handle on the scroll offset.
    pub fn scroll_signal(&self) -> Signal<u32> {
        self.inner.scroll_top.clone()
    }

    /// Active section id; empty when no section is reached yet.
    pub fn active_id(&self) -> String {
        self.inner.active.get()
    }

    /// Reactive handle on the active section id.
    pub fn active_signal(&self) -> Signal<String> {
        self.inner.active.clone()
    }

    /// Record a scroll position and refresh the active section.
    pub fn set_scroll(&self, scroll_top: u32) {
        let clamped = scroll_top.min(self.inner.max_scroll);
        if self.inner.scroll_top.get() != clamped {
            self.inner.scroll_top.set(clamped);
        }
        self.recompute_active();
    }

    /// Scroll by a signed delta (wheel input).
    pub fn scroll_by(&self, delta: i32) {
        let current = self.inner.scroll_top.get() as i64;
        let next = (current + delta as i64).clamp(0, self.inner.max_scroll as i64);
        self.set_scroll(next as u32);
    }

    fn recompute_active(&self) {
        let scroll_top = self.inner.scroll_top.get();
        let current = active_section(&self.inner.sections, scroll_top)
            .unwrap_or("")
            .to_string();
        if self.inner.active.get() != current {
            self.inner.active.set(current);
        }
    }

    /// Header-adjusted scroll target for an anchor id.
    pub fn target_for(&self, id: &str) -> Option<u32> {
        self.inner
            .sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| scroll_target(section.bounds.top).min(self.inner.max_scroll))
    }

    /// Smooth-scroll to an anchor. Unknown ids are a no-op. The easing
    /// moves a quarter of the remaining distance per step (at least one
    /// row), so it terminates exactly at the target.
    pub fn scroll_to(&self, queue: &TimerQueue, id: &str) {
        let Some(target) = self.target_for(id) else {
            return;
        };
        ease_step(self.clone(), queue.clone(), target);
    }
}

fn ease_step(nav: NavState, queue: TimerQueue, target: u32) {
    let current = nav.scroll_top();
    if current == target {
        return;
    }
    let remaining = target.abs_diff(current);
    let step = (remaining / 4).max(1);
    let next = if target > current {
        current + step
    } else {
        current - step
    };
    nav.set_scroll(next);
    if next != target {
        let chain_queue = queue.clone();
        queue.schedule(SCROLL_STEP, move || ease_step(nav, chain_queue, target));
    }
}

// =============================================================================
// TESTS
// =============================================================================
