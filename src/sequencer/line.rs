//! Line Model - Words, annotations, and highlight matching
//!
//! A line is an ordered run of words split from a source string on
//! whitespace. Each word carries a `highlighted` flag (membership of its
//! normalized form in a fixed vocabulary) and a one-shot `revealed` signal.
//! A line may own an annotation, shown after all its words.
//!
//! Lines are built once from static markup at mount and never recreated.
//! Reveal is a monotonic one-way transition: once a `revealed` signal is
//! true it never reverts, and re-revealing is a no-op.

use spark_signals::{Signal, signal};

use crate::types::Ticks;

// =============================================================================
// HIGHLIGHT VOCABULARY
// =============================================================================

/// Default highlight vocabulary.
pub const HIGHLIGHT_SET: &[&str] = &["estrategia", "sistemas", "valor", "cliente"];

/// Normalize a word for highlight matching: lowercase, with `.` and `,`
/// stripped. Matching is exact on the normalized form - no substring match.
pub fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '.' && *c != ',')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a raw word belongs to the highlight vocabulary.
pub fn is_highlighted(raw: &str, highlight_set: &[&str]) -> bool {
    let normalized = normalize_word(raw);
    highlight_set.iter().any(|entry| *entry == normalized)
}

// =============================================================================
// WORD
// =============================================================================

/// A single word token within a line.
pub struct Word {
    text: String,
    highlighted: bool,
    revealed: Signal<bool>,
}

impl Word {
    /// Build a word from its raw token, matching it against the vocabulary.
    pub fn new(raw: &str, highlight_set: &[&str]) -> Self {
        Self {
            text: raw.to_string(),
            highlighted: is_highlighted(raw, highlight_set),
            revealed: signal(false),
        }
    }

    /// The word's text content, as it appeared in the source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the word belongs to the highlight vocabulary.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Whether the word has been revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Reactive handle on the revealed flag, for render effects.
    pub fn revealed_signal(&self) -> Signal<bool> {
        self.revealed.clone()
    }

    /// Reveal the word. Returns `true` on the first call, `false` on
    /// repeats. Never hides a revealed word.
    pub fn reveal(&self) -> bool {
        if self.revealed.get() {
            return false;
        }
        self.revealed.set(true);
        true
    }
}

// =============================================================================
// ANNOTATION
// =============================================================================

/// Handwritten-style note attached to a line, shown after its words.
pub struct Annotation {
    text: String,
    revealed: Signal<bool>,
}

impl Annotation {
    /// Build an annotation from its text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            revealed: signal(false),
        }
    }

    /// The annotation's text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the annotation has been revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Reactive handle on the revealed flag.
    pub fn revealed_signal(&self) -> Signal<bool> {
        self.revealed.clone()
    }

    /// Reveal the annotation. Idempotent, one-way.
    pub fn reveal(&self) -> bool {
        if self.revealed.get() {
            return false;
        }
        self.revealed.set(true);
        true
    }
}

// =============================================================================
// LINE
// =============================================================================

/// An ordered run of words with an optional annotation and a computed
/// activation offset (set by the scheduler, see `sequencer::schedule`).
pub struct Line {
    words: Vec<Word>,
    annotation: Option<Annotation>,
    typing: Signal<bool>,
    activation: Ticks,
}

impl Line {
    /// Build a line from its source text and optional annotation text.
    ///
    /// Missing text degrades to an empty word run - never an error.
    pub fn from_source(
        text: Option<&str>,
        annotation: Option<&str>,
        highlight_set: &[&str],
    ) -> Self {
        let words = text
            .map(|t| {
                t.split_whitespace()
                    .map(|raw| Word::new(raw, highlight_set))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            words,
            annotation: annotation.map(Annotation::new),
            typing: signal(false),
            activation: 0,
        }
    }

    /// The line's words, in source order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words in the line.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The line's annotation, if any.
    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    /// Cumulative delay before this line begins revealing.
    pub fn activation(&self) -> Ticks {
        self.activation
    }

    /// Record the computed activation offset. Scheduler-internal.
    pub(crate) fn set_activation(&mut self, activation: Ticks) {
        self.activation = activation;
    }

    /// Whether the line has activated and begun typing.
    pub fn is_typing(&self) -> bool {
        self.typing.get()
    }

    /// Reactive handle on the typing flag.
    pub fn typing_signal(&self) -> Signal<bool> {
        self.typing.clone()
    }

    /// Mark the line as typing. Idempotent, one-way.
    pub(crate) fn begin_typing(&self) {
        if !self.typing.get() {
            self.typing.set(true);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Cliente."), "cliente");
        assert_eq!(normalize_word("VALOR,"), "valor");
        assert_eq!(normalize_word("el"), "el");
        assert_eq!(normalize_word("a.b,c"), "abc");
    }

    #[test]
    fn test_highlight_exact_match_only() {
        assert!(is_highlighted("valor", HIGHLIGHT_SET));
        assert!(is_highlighted("Valor.", HIGHLIGHT_SET));
        // No substring / partial matching.
        assert!(!is_highlighted("valores", HIGHLIGHT_SET));
        assert!(!is_highlighted("val", HIGHLIGHT_SET));
        assert!(!is_highlighted("el", HIGHLIGHT_SET));
    }

    #[test]
    fn test_line_tokenization_scenario() {
        // "el valor del cliente." -> highlighted = {valor, cliente.}
        let line = Line::from_source(Some("el valor del cliente."), None, HIGHLIGHT_SET);

        let texts: Vec<&str> = line.words().iter().map(Word::text).collect();
        assert_eq!(texts, vec!["el", "valor", "del", "cliente."]);

        let highlighted: Vec<bool> = line.words().iter().map(Word::is_highlighted).collect();
        assert_eq!(highlighted, vec![false, true, false, true]);
    }

    #[test]
    fn test_missing_text_degrades_to_empty() {
        let line = Line::from_source(None, Some("nota"), HIGHLIGHT_SET);
        assert_eq!(line.word_count(), 0);
        assert!(line.annotation().is_some());
    }

    #[test]
    fn test_word_reveal_is_one_shot() {
        let word = Word::new("valor", HIGHLIGHT_SET);
        assert!(!word.is_revealed());

        assert!(word.reveal());
        assert!(word.is_revealed());

        // Repeat is a no-op, and nothing can hide the word again.
        assert!(!word.reveal());
        assert!(word.is_revealed());
    }

    #[test]
    fn test_annotation_reveal_is_one_shot() {
        let annotation = Annotation::new("despacito");
        assert!(annotation.reveal());
        assert!(!annotation.reveal());
        assert!(annotation.is_revealed());
    }

    #[test]
    fn test_typing_flag_one_way() {
        let line = Line::from_source(Some("hola mundo"), None, HIGHLIGHT_SET);
        assert!(!line.is_typing());
        line.begin_typing();
        line.begin_typing();
        assert!(line.is_typing());
    }
}
