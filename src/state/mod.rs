//! State Module - Peripheral page state systems
//!
//! The reactive state systems around the sequencing core:
//!
//! - **Menu** - Overlay menu triad: open/aria/scroll-lock, close paths
//! - **Nav** - Active-section tracking, smooth in-page scroll
//! - **Cursor** - Pointer-following custom cursor with hover regions
//! - **Input** - crossterm event conversion

pub mod cursor;
pub mod input;
pub mod menu;
pub mod nav;

pub use cursor::{CursorElement, CursorState};
pub use input::{Key, PageEvent, convert_event};
pub use menu::{MenuState, MenuTriad};
pub use nav::{NavState, Section, active_section, scroll_target};
