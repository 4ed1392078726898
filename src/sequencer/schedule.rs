//! Batch Scheduler - Per-line and per-word reveal timing
//!
//! Computes activation offsets for a collection of lines and issues every
//! reveal timer up front on the queue - no suspension points; the queue's
//! time ordering does the rest.
//!
//! Timing contract:
//! - Line `i` activates at
//!   `start_delay + sum over j<i of (word_count(j) * inter_word_delay + inter_line_delay)`.
//! - Word `k` of a line reveals at `activation + k * inter_word_delay`.
//! - The line's annotation reveals at
//!   `activation + word_count * inter_word_delay + ANNOTATION_DELAY`.

use std::rc::Rc;

use crate::clock::TimerQueue;
use crate::sequencer::line::Line;
use crate::types::{ANNOTATION_DELAY, Ticks, TimingConfig};

// =============================================================================
// OFFSET ARITHMETIC
// =============================================================================

/// Activation offset for each line, from the word counts alone.
pub fn activation_offsets(word_counts: &[usize], config: &TimingConfig) -> Vec<Ticks> {
    let mut offsets = Vec::with_capacity(word_counts.len());
    let mut current = config.start_delay;
    for count in word_counts {
        offsets.push(current);
        current += *count as Ticks * config.inter_word_delay + config.inter_line_delay;
    }
    offsets
}

/// Scheduled reveal offset of word `k` within a line.
#[inline]
pub fn word_offset(activation: Ticks, k: usize, config: &TimingConfig) -> Ticks {
    activation + k as Ticks * config.inter_word_delay
}

/// Scheduled reveal offset of a line's annotation.
#[inline]
pub fn annotation_offset(activation: Ticks, word_count: usize, config: &TimingConfig) -> Ticks {
    activation + word_count as Ticks * config.inter_word_delay + ANNOTATION_DELAY
}

// =============================================================================
// SCHEDULING
// =============================================================================

/// Stamp each line with its computed activation offset.
pub fn compute_activations(lines: &mut [Line], config: &TimingConfig) {
    let counts: Vec<usize> = lines.iter().map(Line::word_count).collect();
    for (line, offset) in lines.iter_mut().zip(activation_offsets(&counts, config)) {
        line.set_activation(offset);
    }
}

/// Issue every reveal timer for the given lines.
///
/// Assumes activations are already stamped (`compute_activations`). All
/// timers are fire-and-forget; revealing is idempotent, so a line scheduled
/// twice by mistake stays visually correct.
pub fn schedule_lines(queue: &TimerQueue, lines: &[Rc<Line>], config: &TimingConfig) {
    for line in lines {
        let activation = line.activation();

        let typing_line = line.clone();
        queue.schedule(activation, move || typing_line.begin_typing());

        for k in 0..line.word_count() {
            let word_line = line.clone();
            queue.schedule(word_offset(activation, k, config), move || {
                if let Some(word) = word_line.words().get(k) {
                    word.reveal();
                }
            });
        }

        if line.annotation().is_some() {
            let annotation_line = line.clone();
            queue.schedule(
                annotation_offset(activation, line.word_count(), config),
                move || {
                    if let Some(annotation) = annotation_line.annotation() {
                        annotation.reveal();
                    }
                },
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::line::HIGHLIGHT_SET;

    fn make_lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .map(|t| Line::from_source(Some(t), None, HIGHLIGHT_SET))
            .collect()
    }

    #[test]
    fn test_activation_offsets_formula() {
        let config = TimingConfig::default();
        let offsets = activation_offsets(&[4, 2, 3], &config);

        // lineStart(i+1) = lineStart(i) + wordCount(i)*interWord + interLine
        assert_eq!(offsets[0], 500);
        assert_eq!(offsets[1], 500 + 4 * 150 + 400);
        assert_eq!(offsets[2], offsets[1] + 2 * 150 + 400);
    }

    #[test]
    fn test_word_offsets_within_line() {
        let config = TimingConfig::default();
        for k in 0..4 {
            assert_eq!(word_offset(1500, k, &config), 1500 + k as Ticks * 150);
        }
    }

    #[test]
    fn test_annotation_trails_last_word_slot() {
        let config = TimingConfig::default();
        assert_eq!(annotation_offset(1500, 4, &config), 1500 + 4 * 150 + 200);
    }

    #[test]
    fn test_empty_input_schedules_nothing() {
        let queue = TimerQueue::new();
        schedule_lines(&queue, &[], &TimingConfig::default());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_words_reveal_at_scheduled_times() {
        let config = TimingConfig::default();
        let mut lines = make_lines(&["el valor del cliente.", "hola mundo"]);
        compute_activations(&mut lines, &config);
        let lines: Vec<Rc<Line>> = lines.into_iter().map(Rc::new).collect();

        let queue = TimerQueue::new();
        schedule_lines(&queue, &lines, &config);

        // Just before first activation: nothing visible.
        queue.advance_to(499);
        assert!(!lines[0].is_typing());
        assert!(!lines[0].words()[0].is_revealed());

        // First line activates; word 0 reveals at the same slot (k = 0).
        queue.advance_to(500);
        assert!(lines[0].is_typing());
        assert!(lines[0].words()[0].is_revealed());
        assert!(!lines[0].words()[1].is_revealed());

        // Word 2 at activation + 2*150.
        queue.advance_to(800);
        assert!(lines[0].words()[2].is_revealed());
        assert!(!lines[0].words()[3].is_revealed());

        // Second line activates at 500 + 4*150 + 400 = 1500.
        queue.advance_to(1499);
        assert!(!lines[1].is_typing());
        queue.advance_to(1500);
        assert!(lines[1].is_typing());
        assert!(lines[1].words()[0].is_revealed());

        queue.drain();
        assert!(lines.iter().all(|l| l.words().iter().all(|w| w.is_revealed())));
    }

    #[test]
    fn test_annotation_reveals_after_line() {
        let config = TimingConfig::default();
        let mut lines = vec![Line::from_source(
            Some("dos palabras"),
            Some("nota al margen"),
            HIGHLIGHT_SET,
        )];
        compute_activations(&mut lines, &config);
        let lines: Vec<Rc<Line>> = lines.into_iter().map(Rc::new).collect();

        let queue = TimerQueue::new();
        schedule_lines(&queue, &lines, &config);

        // Annotation at 500 + 2*150 + 200 = 1000.
        queue.advance_to(999);
        let annotation = lines[0].annotation().map(|a| a.is_revealed());
        assert_eq!(annotation, Some(false));

        queue.advance_to(1000);
        let annotation = lines[0].annotation().map(|a| a.is_revealed());
        assert_eq!(annotation, Some(true));
    }

    #[test]
    fn test_zero_word_line_occupies_only_inter_line_gap() {
        let config = TimingConfig::default();
        let offsets = activation_offsets(&[0, 3], &config);
        assert_eq!(offsets[0], 500);
        assert_eq!(offsets[1], 500 + 400);
    }
}
