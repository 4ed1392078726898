//! # reveal-tui
//!
//! Reactive terminal presentation layer for a static page: typewriter
//! text reveals, scroll reveal, smooth in-page scrolling with active-nav
//! tracking, an overlay menu, and a pointer-following custom cursor.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals)
//! for fine-grained reactivity: every UI flag is a signal the renderer
//! reads, and every reveal is a one-way transition driven by a manually
//! pumped timer queue.
//!
//! ## Architecture
//!
//! ```text
//! MarkupSource → Page::mount → lines built once, timers issued up front
//!                              ├─ sequencer (batch + sequential reveal)
//!                              ├─ observer  (one-shot scroll reveal)
//!                              └─ state     (menu, nav, cursor, input)
//! host loop: pump(now) + handle_event(convert_event(...)) → renderer reads flags
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (ticks, timing configs, geometry, `Classes`)
//! - [`clock`] - Timer queue and one-shot completion signal
//! - [`sequencer`] - Line model, batch scheduler, sequential driver
//! - [`observer`] - Viewport intersection and one-shot reveal
//! - [`state`] - Menu, nav, cursor, input conversion
//! - [`renderer`] - Flag-to-style mapping and frame output
//! - [`page`] - Composition root

pub mod clock;
pub mod observer;
pub mod page;
pub mod renderer;
pub mod sequencer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use clock::{Completion, TimerQueue};

pub use sequencer::{
    HIGHLIGHT_SET, Line, SequentialDriver, Word, activation_offsets, annotation_offset,
    compute_activations, is_highlighted, normalize_word, schedule_lines, word_offset,
};

pub use observer::{
    IntersectionEntry, ObservedElement, STAGGER_DELAY, VISIBILITY_THRESHOLD, VisibilityObserver,
    intersection_ratio, register_reveals,
};

pub use state::{
    CursorElement, CursorState, Key, MenuState, MenuTriad, NavState, PageEvent, Section,
    active_section, convert_event, scroll_target,
};

pub use page::{MarkupLine, MarkupSource, NavLink, Page, PageChrome, PageConfig, StaticMarkup};
