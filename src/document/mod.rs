//! Tagged text scanning and rendering.
//!
//! This module handles:
//! - Lexing tagged text into literal runs and markers
//! - Grouping markers with the text they govern into segments
//! - Normalizing bullet glyphs echoed back by a text widget

mod scanner;
mod types;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

pub use scanner::{Lexeme, Scanner, Segments};
pub use types::{Document, HeadlineRef, Segment, Token};

/// Glyph a host draws in front of each list item.
pub const BULLET: &str = "• ";

static BULLET_ECHO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("• ?").expect("bullet echo pattern is valid"));

/// Scan tagged text into renderable segments.
pub fn render(text: &str) -> Vec<Segment<'_>> {
    Segments::new(text).collect()
}

/// Remove bullet glyphs (and one following space) that a widget echoed back
/// into the text after drawing list items.
pub fn strip_bullet_echo(text: &str) -> Cow<'_, str> {
    BULLET_ECHO.replace_all(text, "")
}
