//! Renderer - Flag-to-style mapping and frame output
//!
//! Presentation only. State lives in the model's signals; the renderer
//! derives class-like flags ([`Classes`]) from them and maps those to
//! terminal styling. It never mutates reveal state, and animation pacing
//! (fades, stagger hints) is its concern alone - the sequencer and the
//! observer only decide *whether* something is visible.
//!
//! Unrevealed words render as blank space of their own width so a line
//! never shifts while it types, mirroring hidden-but-occupying markup.

use std::io::{self, Write};

use crossterm::style::Stylize;
use crossterm::{cursor as term_cursor, queue, style, terminal};

use crate::observer::ObservedElement;
use crate::sequencer::line::{Annotation, Line, Word};
use crate::state::cursor::CursorState;
use crate::state::menu::MenuState;
use crate::types::Classes;

// =============================================================================
// CLASS DERIVATION
// =============================================================================

/// Classes of a word: `SHOW` once revealed, `HIGHLIGHT` from vocabulary.
pub fn word_classes(word: &Word) -> Classes {
    let mut classes = Classes::NONE;
    if word.is_revealed() {
        classes |= Classes::SHOW;
    }
    if word.is_highlighted() {
        classes |= Classes::HIGHLIGHT;
    }
    classes
}

/// Classes of a line: `TYPING` once activated.
pub fn line_classes(line: &Line) -> Classes {
    if line.is_typing() {
        Classes::TYPING
    } else {
        Classes::NONE
    }
}

/// Classes of an annotation: `REVEALED` once shown.
pub fn annotation_classes(annotation: &Annotation) -> Classes {
    if annotation.is_revealed() {
        Classes::REVEALED
    } else {
        Classes::NONE
    }
}

/// Classes of an observed element: `REVEALED` once scrolled into view.
pub fn element_classes(element: &ObservedElement) -> Classes {
    if element.is_revealed() {
        Classes::REVEALED
    } else {
        Classes::NONE
    }
}

/// Classes of the menu: `ACTIVE` while open.
pub fn menu_classes(menu: &MenuState) -> Classes {
    if menu.is_open() {
        Classes::ACTIVE
    } else {
        Classes::NONE
    }
}

/// Classes of the cursor: `ACTIVE` while on-page, `HOVER` over regions.
pub fn cursor_classes(cursor: &CursorState) -> Classes {
    let mut classes = Classes::NONE;
    if cursor.is_active() {
        classes |= Classes::ACTIVE;
    }
    if cursor.is_hovering() {
        classes |= Classes::HOVER;
    }
    classes
}

// =============================================================================
// STYLING
// =============================================================================

/// Render one word from its classes: blank space while hidden, emphasized
/// when highlighted.
pub fn styled_word(word: &Word) -> String {
    let classes = word_classes(word);
    if !classes.contains(Classes::SHOW) {
        return " ".repeat(word.text().chars().count());
    }
    if classes.contains(Classes::HIGHLIGHT) {
        word.text().bold().cyan().to_string()
    } else {
        word.text().to_string()
    }
}

/// Render a full line: words joined by single spaces, inactive lines blank.
pub fn render_line(line: &Line) -> String {
    if !line.is_typing() {
        return String::new();
    }
    line.words()
        .iter()
        .map(styled_word)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render an annotation once revealed.
pub fn render_annotation(annotation: &Annotation) -> Option<String> {
    if annotation.is_revealed() {
        Some(annotation.text().dim().italic().to_string())
    } else {
        None
    }
}

/// The cursor glyph for the current cursor classes.
pub fn cursor_glyph(cursor: &CursorState) -> Option<String> {
    let classes = cursor_classes(cursor);
    if !classes.contains(Classes::ACTIVE) {
        return None;
    }
    let glyph = if classes.contains(Classes::HOVER) {
        "●".magenta().bold()
    } else {
        "●".magenta()
    };
    Some(glyph.to_string())
}

// =============================================================================
// FRAME OUTPUT
// =============================================================================

/// Draw the typewriter block and the custom cursor to a terminal.
///
/// One line per row starting at `origin_row`; the cursor glyph is drawn
/// last at its tracked position. Queued writes, single flush.
pub fn draw_frame(
    out: &mut impl Write,
    lines: &[std::rc::Rc<Line>],
    cursor: Option<&CursorState>,
    origin_row: u16,
) -> io::Result<()> {
    for (row, line) in lines.iter().enumerate() {
        queue!(
            out,
            term_cursor::MoveTo(0, origin_row + row as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(render_line(line)),
        )?;
        if let Some(rendered) = line.annotation().and_then(render_annotation) {
            queue!(out, style::Print("  "), style::Print(rendered))?;
        }
    }
    if let Some(glyph) = cursor.and_then(cursor_glyph) {
        let (x, y) = cursor.map(CursorState::position).unwrap_or((0, 0));
        queue!(out, term_cursor::MoveTo(x, y), style::Print(glyph))?;
    }
    out.flush()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::line::HIGHLIGHT_SET;
    use crate::types::{Bounds, Rect};

    #[test]
    fn test_word_classes_follow_flags() {
        let word = Word::new("valor", HIGHLIGHT_SET);
        assert_eq!(word_classes(&word), Classes::HIGHLIGHT);

        word.reveal();
        assert_eq!(word_classes(&word), Classes::SHOW | Classes::HIGHLIGHT);

        let plain = Word::new("el", HIGHLIGHT_SET);
        plain.reveal();
        assert_eq!(word_classes(&plain), Classes::SHOW);
    }

    #[test]
    fn test_hidden_word_renders_as_blank_of_same_width() {
        let word = Word::new("cliente.", HIGHLIGHT_SET);
        assert_eq!(styled_word(&word), "        ");

        word.reveal();
        let rendered = styled_word(&word);
        assert!(rendered.contains("cliente."));
    }

    #[test]
    fn test_inactive_line_renders_empty() {
        let line = Line::from_source(Some("hola mundo"), None, HIGHLIGHT_SET);
        assert_eq!(render_line(&line), "");
    }

    #[test]
    fn test_annotation_hidden_until_revealed() {
        let annotation = Annotation::new("nota");
        assert!(render_annotation(&annotation).is_none());

        annotation.reveal();
        let rendered = render_annotation(&annotation);
        assert!(rendered.is_some_and(|r| r.contains("nota")));
    }

    #[test]
    fn test_element_classes() {
        let element = ObservedElement::new(Bounds::new(0, 10));
        assert_eq!(element_classes(&element), Classes::NONE);
    }

    #[test]
    fn test_cursor_glyph_states() {
        let cursor = CursorState::init(Some(crate::state::cursor::CursorElement)).unwrap();
        assert!(cursor_glyph(&cursor).is_none());

        cursor.add_hover_region(Rect::new(0, 0, 2, 2));
        cursor.pointer_moved(10, 10);
        assert!(cursor_glyph(&cursor).is_some());
        assert_eq!(cursor_classes(&cursor), Classes::ACTIVE);

        cursor.pointer_moved(1, 1);
        assert_eq!(cursor_classes(&cursor), Classes::ACTIVE | Classes::HOVER);
    }
}
