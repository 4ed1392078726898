//! Line Sequencer - Reveal scheduling for typewriter text
//!
//! Two independent, optionally composed timing strategies over the same
//! word model and timer queue:
//!
//! - **Batch** ([`schedule`]): stamps every line with an activation offset
//!   and issues all reveal timers up front.
//! - **Sequential** ([`SequentialDriver`]): reveals one word at a time with
//!   a wait between, and fires a one-shot completion at the end.
//!
//! Both drive the same one-way transitions: a revealed word never hides.

pub mod driver;
pub mod line;
pub mod schedule;

pub use driver::SequentialDriver;
pub use line::{Annotation, HIGHLIGHT_SET, Line, Word, is_highlighted, normalize_word};
pub use schedule::{
    activation_offsets, annotation_offset, compute_activations, schedule_lines, word_offset,
};
