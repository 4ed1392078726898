//! Core types for reveal-tui.
//!
//! These types define the foundation that everything builds on: time units,
//! timing configurations, page geometry, and the class-like styling flags
//! the renderer reads.

// =============================================================================
// Time
// =============================================================================

/// Logical time in milliseconds.
///
/// All scheduling runs on integer milliseconds against the manually pumped
/// [`TimerQueue`](crate::clock::TimerQueue) - no wall-clock reads inside the
/// library, which keeps every schedule deterministic and testable.
pub type Ticks = u64;

// =============================================================================
// Timing configuration
// =============================================================================

/// Timing for the batch line scheduler.
///
/// Line `i` activates at
/// `start_delay + sum over j<i of (word_count(j) * inter_word_delay + inter_line_delay)`.
/// Within a line, word `k` reveals at `activation + k * inter_word_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Delay before the first line activates.
    pub start_delay: Ticks,
    /// Gap between consecutive word reveals within a line.
    pub inter_word_delay: Ticks,
    /// Extra gap added after each line, before the next activates.
    pub inter_line_delay: Ticks,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_delay: 500,
            inter_word_delay: 150,
            inter_line_delay: 400,
        }
    }
}

/// Timing for the sequential single-block driver.
///
/// An independent strategy from [`TimingConfig`] with its own constants.
/// The two are composed on the same queue, never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Delay before the first word reveals.
    pub start_delay: Ticks,
    /// Wait after each word's reveal before advancing to the next.
    pub word_reveal_duration: Ticks,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            start_delay: 300,
            word_reveal_duration: 400,
        }
    }
}

/// Gap between a line's last scheduled word slot and its annotation reveal.
pub const ANNOTATION_DELAY: Ticks = 200;

// =============================================================================
// Geometry
// =============================================================================

/// Vertical extent of a page element, in document coordinates (rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    /// Distance from the top of the document.
    pub top: u32,
    /// Element height. Zero-height elements are legal (anchors).
    pub height: u32,
}

impl Bounds {
    /// Create bounds from top offset and height.
    pub const fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// One past the last row covered by this element.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// The visible window over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Current scroll offset (top visible document row).
    pub scroll_top: u32,
    /// Number of visible rows.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport at a scroll offset.
    pub const fn new(scroll_top: u32, height: u32) -> Self {
        Self { scroll_top, height }
    }

    /// One past the last visible document row.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.scroll_top + self.height
    }

    /// Whether a document row lies inside the viewport.
    #[inline]
    pub const fn contains_row(&self, row: u32) -> bool {
        row >= self.scroll_top && row < self.bottom()
    }
}

/// Screen-space rectangle (cells), used for pointer hover regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

// =============================================================================
// Style classes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Class-like styling flags as a bitfield.
    ///
    /// State lives in signals; the renderer derives a `Classes` value from
    /// them to decide the visual treatment. Combine with bitwise OR:
    /// `Classes::SHOW | Classes::HIGHLIGHT`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Classes: u8 {
        const NONE = 0;
        /// Word has been revealed.
        const SHOW = 1 << 0;
        /// Observed element / annotation has been revealed.
        const REVEALED = 1 << 1;
        /// Line has activated and is typing.
        const TYPING = 1 << 2;
        /// Word belongs to the highlight vocabulary.
        const HIGHLIGHT = 1 << 3;
        /// Nav link / menu / cursor is active.
        const ACTIVE = 1 << 4;
        /// Cursor is over an interactive region.
        const HOVER = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        let timing = TimingConfig::default();
        assert_eq!(timing.start_delay, 500);
        assert_eq!(timing.inter_word_delay, 150);
        assert_eq!(timing.inter_line_delay, 400);

        let driver = DriverConfig::default();
        assert_eq!(driver.start_delay, 300);
        assert_eq!(driver.word_reveal_duration, 400);

        assert_eq!(ANNOTATION_DELAY, 200);
    }

    #[test]
    fn test_bounds_bottom() {
        let bounds = Bounds::new(100, 40);
        assert_eq!(bounds.bottom(), 140);

        let anchor = Bounds::new(100, 0);
        assert_eq!(anchor.bottom(), 100);
    }

    #[test]
    fn test_viewport_contains_row() {
        let viewport = Viewport::new(50, 24);
        assert!(viewport.contains_row(50));
        assert!(viewport.contains_row(73));
        assert!(!viewport.contains_row(74));
        assert!(!viewport.contains_row(49));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 5, 4, 2);
        assert!(rect.contains(10, 5));
        assert!(rect.contains(13, 6));
        assert!(!rect.contains(14, 5));
        assert!(!rect.contains(10, 7));
        assert!(!rect.contains(9, 5));
    }

    #[test]
    fn test_classes_combine() {
        let classes = Classes::SHOW | Classes::HIGHLIGHT;
        assert!(classes.contains(Classes::SHOW));
        assert!(classes.contains(Classes::HIGHLIGHT));
        assert!(!classes.contains(Classes::REVEALED));
        assert_eq!(Classes::default(), Classes::NONE);
    }
}
