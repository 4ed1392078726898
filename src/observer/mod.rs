//! Visibility Observer - One-shot scroll reveal
//!
//! Watches a set of page elements and flips each one's `revealed` flag the
//! first time its intersection ratio with the viewport reaches the
//! threshold, then stops watching it. Margin-free, single-root scheme.
//!
//! The observer decides *whether* an element has become visible, never
//! *when* visually to animate it - stagger hints attached at registration
//! are consumed by the renderer.
//!
//! Each `process` call yields one observation batch; elements crossing the
//! threshold in the same batch are handled independently, and order within
//! a batch is unspecified.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::types::{Bounds, Ticks, Viewport};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Intersection ratio at which an element counts as visible.
pub const VISIBILITY_THRESHOLD: f32 = 0.15;

/// Per-index stagger applied to registered elements as a renderer hint.
pub const STAGGER_DELAY: Ticks = 100;

// =============================================================================
// INTERSECTION
// =============================================================================

/// Fraction of an element's extent currently within the viewport.
///
/// Zero-height elements report 1.0 when their edge lies inside the
/// viewport, 0.0 otherwise (the boundary is either in view or not).
pub fn intersection_ratio(bounds: &Bounds, viewport: &Viewport) -> f32 {
    if bounds.height == 0 {
        return if viewport.contains_row(bounds.top) {
            1.0
        } else {
            0.0
        };
    }
    let overlap_top = bounds.top.max(viewport.scroll_top);
    let overlap_bottom = bounds.bottom().min(viewport.bottom());
    if overlap_bottom <= overlap_top {
        return 0.0;
    }
    (overlap_bottom - overlap_top) as f32 / bounds.height as f32
}

// =============================================================================
// OBSERVED ELEMENT
// =============================================================================

/// A page element registered for scroll reveal.
pub struct ObservedElement {
    bounds: Bounds,
    revealed: Signal<bool>,
    /// Renderer hint: delay before the reveal animation plays.
    transition_delay: Ticks,
}

impl ObservedElement {
    /// Register-time constructor; stagger hints come from `register_reveals`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            revealed: signal(false),
            transition_delay: 0,
        }
    }

    /// Document bounds this element occupies.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the element has been revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Reactive handle on the revealed flag.
    pub fn revealed_signal(&self) -> Signal<bool> {
        self.revealed.clone()
    }

    /// The stagger hint attached at registration.
    pub fn transition_delay(&self) -> Ticks {
        self.transition_delay
    }

    fn reveal(&self) -> bool {
        if self.revealed.get() {
            return false;
        }
        self.revealed.set(true);
        true
    }
}

/// One entry of an observation batch.
pub struct IntersectionEntry {
    /// The reported element.
    pub element: Rc<ObservedElement>,
    /// Its intersection ratio at observation time.
    pub ratio: f32,
    /// Whether the ratio reached the observer's threshold.
    pub is_intersecting: bool,
}

// =============================================================================
// VISIBILITY OBSERVER
// =============================================================================

/// Watches registered elements and retires each on first reveal.
pub struct VisibilityObserver {
    threshold: f32,
    watched: Vec<Rc<ObservedElement>>,
}

impl VisibilityObserver {
    /// Observer with the standard threshold.
    pub fn new() -> Self {
        Self::with_threshold(VISIBILITY_THRESHOLD)
    }

    /// Observer with a custom threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            watched: Vec::new(),
        }
    }

    /// Number of elements still being watched.
    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Start watching an element. Already-revealed elements are ignored.
    pub fn observe(&mut self, element: Rc<ObservedElement>) {
        if !element.is_revealed() {
            self.watched.push(element);
        }
    }

    /// Stop watching an element without revealing it.
    pub fn unobserve(&mut self, element: &Rc<ObservedElement>) {
        self.watched.retain(|watched| !Rc::ptr_eq(watched, element));
    }

    /// Run one observation batch against the viewport.
    ///
    /// Every element crossing the threshold is marked revealed and retired;
    /// the rest stay subscribed, untouched. Returns the batch entries.
    pub fn process(&mut self, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let threshold = self.threshold;
        let entries: Vec<IntersectionEntry> = self
            .watched
            .iter()
            .map(|element| {
                let ratio = intersection_ratio(&element.bounds(), viewport);
                IntersectionEntry {
                    element: element.clone(),
                    ratio,
                    is_intersecting: ratio >= threshold,
                }
            })
            .collect();

        for entry in &entries {
            if entry.is_intersecting {
                entry.element.reveal();
            }
        }
        self.watched.retain(|element| !element.is_revealed());

        entries
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Build observed elements from their bounds, attach index-proportional
/// stagger hints, and subscribe them all.
pub fn register_reveals(
    observer: &mut VisibilityObserver,
    bounds: &[Bounds],
) -> Vec<Rc<ObservedElement>> {
    let elements: Vec<Rc<ObservedElement>> = bounds
        .iter()
        .enumerate()
        .map(|(index, b)| {
            let mut element = ObservedElement::new(*b);
            element.transition_delay = index as Ticks * STAGGER_DELAY;
            Rc::new(element)
        })
        .collect();
    for element in &elements {
        observer.observe(element.clone());
    }
    elements
}

// =============================================================================
// TESTS
// =============================================================================
