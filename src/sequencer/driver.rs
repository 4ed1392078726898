//! Sequential Driver - One-word-at-a-time reveal for a single block
//!
//! The second of the two timing strategies: instead of issuing every timer
//! up front, the driver reveals one word, waits `word_reveal_duration`, then
//! advances - a chain of timers where each step schedules the next.
//!
//! Completion is a structural one-shot ([`Completion`]): it fires exactly
//! once, after the last word's reveal wait elapses, to at most one
//! registered listener. Zero words complete at `start_delay` with no
//! intermediate reveals.

use std::rc::Rc;

use crate::clock::{Completion, TimerQueue};
use crate::sequencer::line::Line;
use crate::types::DriverConfig;

// =============================================================================
// SEQUENTIAL DRIVER
// =============================================================================

/// Drives the words of one line sequentially on a timer queue.
pub struct SequentialDriver {
    line: Rc<Line>,
    config: DriverConfig,
    completion: Completion,
}

impl SequentialDriver {
    /// Create a driver over a line's words.
    pub fn new(line: Rc<Line>, config: DriverConfig) -> Self {
        Self {
            line,
            config,
            completion: Completion::new(),
        }
    }

    /// Handle on the completion signal, for the single interested listener.
    pub fn completion(&self) -> Completion {
        self.completion.clone()
    }

    /// Begin the reveal chain: first word after `start_delay`, each
    /// subsequent word `word_reveal_duration` after the previous.
    pub fn start(&self, queue: &TimerQueue) {
        let chain = queue.clone();
        let line = self.line.clone();
        let config = self.config;
        let completion = self.completion.clone();
        queue.schedule(config.start_delay, move || {
            step(chain, line, config, completion, 0);
        });
    }
}

/// Reveal word `k` and schedule the next step; settle once past the end.
fn step(queue: TimerQueue, line: Rc<Line>, config: DriverConfig, completion: Completion, k: usize) {
    match line.words().get(k) {
        Some(word) => {
            word.reveal();
            let next_queue = queue.clone();
            queue.schedule(config.word_reveal_duration, move || {
                step(next_queue, line, config, completion, k + 1);
            });
        }
        None => completion.settle(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
