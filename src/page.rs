//! Page - Composition root
//!
//! Explicit initialization, no module-load side effects: the caller hands
//! over a markup source and the page chrome (element handles and geometry),
//! and `mount` wires everything once - lines built a single time, reveal
//! timers issued, observed elements registered, peripheral systems
//! initialized behind their guards.
//!
//! The host then pumps logical time (`pump`) and routes converted input
//! events (`handle_event`). Rendering stays outside; every flag the
//! renderer needs is reachable through the accessors.
//!
//! # Example
//!
//! ```ignore
//! use reveal_tui::page::{MarkupLine, Page, PageChrome, PageConfig, StaticMarkup};
//!
//! let markup = StaticMarkup::new(vec![
//!     MarkupLine::text("Construyo sistemas que entregan"),
//!     MarkupLine::with_annotation("el valor del cliente.", "siempre"),
//! ]);
//! let mut page = Page::mount(&markup, PageChrome::default(), PageConfig::default());
//!
//! page.pump(1000); // reveal everything due in the first second
//! ```

use std::rc::Rc;

use crate::clock::{Completion, TimerQueue};
use crate::observer::{ObservedElement, VisibilityObserver, register_reveals};
use crate::sequencer::line::{HIGHLIGHT_SET, Line};
use crate::sequencer::schedule::{compute_activations, schedule_lines};
use crate::sequencer::SequentialDriver;
use crate::state::cursor::{CursorElement, CursorState};
use crate::state::input::{Key, PageEvent};
use crate::state::menu::{MenuState, MenuTriad};
use crate::state::nav::{NavState, Section};
use crate::types::{Bounds, DriverConfig, Rect, Ticks, TimingConfig, Viewport};

// =============================================================================
// MARKUP SOURCE
// =============================================================================

/// Supplies, per line, a raw text string and an annotation aligned by index.
pub trait MarkupSource {
    /// Number of typewriter lines on the page.
    fn line_count(&self) -> usize;
    /// Raw text of line `index`; `None` degrades to an empty line.
    fn line_text(&self, index: usize) -> Option<String>;
    /// Annotation text aligned with line `index`, if any.
    fn annotation_text(&self, index: usize) -> Option<String>;
}

/// One line of static markup.
#[derive(Debug, Clone, Default)]
pub struct MarkupLine {
    /// The line's raw text attribute.
    pub text: Option<String>,
    /// Aligned annotation, if any.
    pub annotation: Option<String>,
}

impl MarkupLine {
    /// A plain line.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            annotation: None,
        }
    }

    /// A line with an aligned annotation.
    pub fn with_annotation(text: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            annotation: Some(annotation.into()),
        }
    }
}

/// In-memory markup source - the static page content.
#[derive(Debug, Clone, Default)]
pub struct StaticMarkup {
    entries: Vec<MarkupLine>,
}

impl StaticMarkup {
    /// Wrap a list of markup lines.
    pub fn new(entries: Vec<MarkupLine>) -> Self {
        Self { entries }
    }
}

impl MarkupSource for StaticMarkup {
    fn line_count(&self) -> usize {
        self.entries.len()
    }

    fn line_text(&self, index: usize) -> Option<String> {
        self.entries.get(index).and_then(|entry| entry.text.clone())
    }

    fn annotation_text(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .and_then(|entry| entry.annotation.clone())
    }
}

// =============================================================================
// CHROME & CONFIG
// =============================================================================

/// A nav link and the screen region it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Anchor id the link points at.
    pub id: String,
    /// Clickable region.
    pub region: Rect,
}

/// Element handles and geometry the page is mounted over.
///
/// Everything optional degrades to a no-op when absent - a page without a
/// menu triad simply has no menu.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    /// Document bounds of scroll-reveal elements, in registration order.
    pub reveal_elements: Vec<Bounds>,
    /// Anchored sections, in document order.
    pub sections: Vec<Section>,
    /// Nav links, checked on pointer press.
    pub nav_links: Vec<NavLink>,
    /// The menu triad, when the page has one.
    pub menu: Option<MenuTriad>,
    /// The custom cursor element, when the page has one.
    pub cursor: Option<CursorElement>,
    /// Interactive regions the cursor hovers over.
    pub hover_regions: Vec<Rect>,
    /// Total document height in rows.
    pub document_height: u32,
    /// Visible viewport height in rows.
    pub viewport_height: u32,
}

/// Mount-time configuration.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Batch scheduler timing.
    pub timing: TimingConfig,
    /// Sequential driver timing.
    pub driver: DriverConfig,
    /// Highlight vocabulary.
    pub highlights: Vec<String>,
    /// Index of a line driven sequentially instead of batched, if any.
    pub sequential_block: Option<usize>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            driver: DriverConfig::default(),
            highlights: HIGHLIGHT_SET.iter().map(|s| s.to_string()).collect(),
            sequential_block: None,
        }
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// The mounted page: sequencing core plus wired peripheral systems.
pub struct Page {
    queue: TimerQueue,
    lines: Vec<Rc<Line>>,
    block_driver: Option<SequentialDriver>,
    block_line: Option<Rc<Line>>,
    observer: VisibilityObserver,
    observed: Vec<Rc<ObservedElement>>,
    menu: Option<MenuState>,
    nav: NavState,
    cursor: Option<CursorState>,
    nav_links: Vec<NavLink>,
    viewport_height: u32,
}

impl Page {
    /// Build and wire the page once. Lines and observed elements are never
    /// recreated afterwards.
    pub fn mount(source: &dyn MarkupSource, chrome: PageChrome, config: PageConfig) -> Self {
        let highlights: Vec<&str> = config.highlights.iter().map(String::as_str).collect();

        let mut lines: Vec<Line> = (0..source.line_count())
            .map(|index| {
                Line::from_source(
                    source.line_text(index).as_deref(),
                    source.annotation_text(index).as_deref(),
                    &highlights,
                )
            })
            .collect();

        // The sequential block, when designated, is pulled out of the batch
        // before activation offsets are computed over the rest.
        let block = config
            .sequential_block
            .filter(|index| *index < lines.len())
            .map(|index| lines.remove(index));

        compute_activations(&mut lines, &config.timing);
        let lines: Vec<Rc<Line>> = lines.into_iter().map(Rc::new).collect();

        let queue = TimerQueue::new();
        schedule_lines(&queue, &lines, &config.timing);

        let (block_line, block_driver) = match block {
            Some(line) => {
                let line = Rc::new(line);
                let driver = SequentialDriver::new(line.clone(), config.driver);
                driver.start(&queue);
                (Some(line), Some(driver))
            }
            None => (None, None),
        };

        let mut observer = VisibilityObserver::new();
        let observed = register_reveals(&mut observer, &chrome.reveal_elements);

        let max_scroll = chrome
            .document_height
            .saturating_sub(chrome.viewport_height);
        let nav = NavState::new(chrome.sections, max_scroll);
        let menu = MenuState::init(chrome.menu);
        let cursor = CursorState::init(chrome.cursor);
        if let Some(cursor) = &cursor {
            for region in &chrome.hover_regions {
                cursor.add_hover_region(*region);
            }
        }

        let mut page = Self {
            queue,
            lines,
            block_driver,
            block_line,
            observer,
            observed,
            menu,
            nav,
            cursor,
            nav_links: chrome.nav_links,
            viewport_height: chrome.viewport_height,
        };
        // Initial observation batch: elements already in view reveal now.
        page.process_visibility();
        page
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The page's timer queue.
    pub fn queue(&self) -> &TimerQueue {
        &self.queue
    }

    /// Batch-scheduled lines, in document order.
    pub fn lines(&self) -> &[Rc<Line>] {
        &self.lines
    }

    /// The sequentially driven block line, when one was designated.
    pub fn block_line(&self) -> Option<&Rc<Line>> {
        self.block_line.as_ref()
    }

    /// Completion of the sequential block, when one was designated.
    pub fn block_completion(&self) -> Option<Completion> {
        self.block_driver
            .as_ref()
            .map(SequentialDriver::completion)
    }

    /// Scroll-reveal elements, in registration order.
    pub fn observed(&self) -> &[Rc<ObservedElement>] {
        &self.observed
    }

    /// Elements the observer is still watching.
    pub fn watched_count(&self) -> usize {
        self.observer.watched_count()
    }

    /// The menu, when the page has one.
    pub fn menu(&self) -> Option<&MenuState> {
        self.menu.as_ref()
    }

    /// Nav state.
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    /// The custom cursor, when the page has one.
    pub fn cursor(&self) -> Option<&CursorState> {
        self.cursor.as_ref()
    }

    /// Current viewport over the document.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.nav.scroll_top(), self.viewport_height)
    }

    // -------------------------------------------------------------------------
    // Driving
    // -------------------------------------------------------------------------

    /// Advance logical time, firing due reveal timers, then refresh
    /// visibility (smooth scrolling may have moved the viewport).
    pub fn pump(&mut self, now: Ticks) {
        self.queue.advance_to(now);
        self.process_visibility();
    }

    /// Route a converted input event to the wired collaborators.
    pub fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::PointerMove { x, y } => {
                if let Some(cursor) = &self.cursor {
                    cursor.pointer_moved(x, y);
                }
            }
            PageEvent::PointerDown { x, y } => self.pointer_down(x, y),
            PageEvent::PointerLeft => {
                if let Some(cursor) = &self.cursor {
                    cursor.pointer_left();
                }
            }
            PageEvent::Scroll { delta } => {
                let locked = self.menu.as_ref().is_some_and(MenuState::is_scroll_locked);
                if !locked {
                    self.nav.scroll_by(delta);
                    self.process_visibility();
                }
            }
            PageEvent::Key(Key::Escape) => {
                if let Some(menu) = &self.menu {
                    menu.escape_pressed();
                }
            }
            PageEvent::Resize { height, .. } => {
                self.viewport_height = height as u32;
                self.process_visibility();
            }
            PageEvent::Key(_) | PageEvent::None => {}
        }
    }

    /// Record an externally driven scroll position.
    pub fn scrolled(&mut self, scroll_top: u32) {
        self.nav.set_scroll(scroll_top);
        self.process_visibility();
    }

    fn pointer_down(&mut self, x: u16, y: u16) {
        // Nav links first: navigate, then let the menu close behind it.
        let hit = self
            .nav_links
            .iter()
            .find(|link| link.region.contains(x, y))
            .map(|link| link.id.clone());
        if let Some(id) = hit {
            self.nav.scroll_to(&self.queue, &id);
            if let Some(menu) = &self.menu {
                menu.link_activated();
            }
            return;
        }
        if let Some(menu) = &self.menu {
            menu.pointer_down(x, y);
        }
    }

    fn process_visibility(&mut self) {
        let viewport = self.viewport();
        self.observer.process(&viewport);
    }
}

// =============================================================================
// TESTS
// =============================================================================
