//! Conversion from tagged text to Markdown.
//!
//! One-way only: Markdown never turns back into tagged text here. Tagged
//! text is built solely by the [`editor`](crate::editor) mutators.

use crate::document::{Lexeme, Scanner};

/// Convert tagged text to Markdown.
///
/// Each recognized marker becomes its Markdown equivalent; everything else
/// is copied verbatim. Markers with an unknown payload, and markers truncated
/// by editing, produce nothing.
pub fn to_markup(tagged: &str) -> String {
    let mut out = String::with_capacity(tagged.len());
    for lexeme in Scanner::new(tagged) {
        match lexeme {
            Lexeme::Literal(text) => out.push_str(text),
            Lexeme::Marker(kind) => out.push_str(kind.markup()),
            Lexeme::Unknown(_) | Lexeme::Broken(_) => {}
        }
    }
    out
}
