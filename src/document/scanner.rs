//! Scanning tagged text.
//!
//! [`Scanner`] is the lexer: it walks the text and tells literal runs apart
//! from markers. [`Segments`] sits on top and groups each marker with the
//! text it governs. Both borrow the input and can be cloned to restart.

use std::ops::Range;

use crate::format::{BASE, MARKER_LEN, MarkerKind, PAYLOAD_LEN, decode, is_selector};

use super::types::{Segment, Token};

/// One lexical unit of tagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme<'a> {
    /// Visible text, possibly carrying a stray base character.
    Literal(&'a str),
    /// A recognized marker.
    Marker(MarkerKind),
    /// A full-width marker whose payload carries no known kind.
    Unknown(&'a str),
    /// A marker truncated by editing. Never rendered.
    Broken(&'a str),
}

/// Byte length of the marker window starting at `rest[0]`.
///
/// The window covers at most `MARKER_LEN` chars and never reaches into the
/// base character of a following marker.
fn window_len(rest: &str) -> usize {
    let mut end = 0;
    for (count, (idx, ch)) in rest.char_indices().enumerate() {
        if count == MARKER_LEN || (count > 0 && ch == BASE) {
            return idx;
        }
        end = idx + ch.len_utf8();
    }
    end
}

/// Byte length of the base character at `rest[0]` plus at most
/// `PAYLOAD_LEN` selectors after it.
fn selector_run_len(rest: &str) -> usize {
    BASE.len_utf8()
        + rest[BASE.len_utf8()..]
            .chars()
            .take(PAYLOAD_LEN)
            .take_while(|ch| is_selector(*ch))
            .map(char::len_utf8)
            .sum::<usize>()
}

/// End of a literal run that starts at `rest[0]`: the next base character
/// after the first char, or the end of input.
fn literal_len(rest: &str) -> usize {
    let first = rest.chars().next().map_or(0, char::len_utf8);
    rest[first..].find(BASE).map_or(rest.len(), |idx| first + idx)
}

/// Lex one unit at byte offset `pos`. Returns the lexeme and the offset
/// just past it.
pub(crate) fn lex_at(text: &str, pos: usize) -> Option<(Lexeme<'_>, usize)> {
    let rest = text.get(pos..).filter(|rest| !rest.is_empty())?;

    if !rest.starts_with(BASE) {
        let end = rest.find(BASE).unwrap_or(rest.len());
        return Some((Lexeme::Literal(&rest[..end]), pos + end));
    }

    let window_end = window_len(rest);
    let window = &rest[..window_end];
    let payload = decode(&window[BASE.len_utf8()..]);

    if let Some(kind) = MarkerKind::from_payload(&payload) {
        return Some((Lexeme::Marker(kind), pos + window_end));
    }

    // The first position of a text never carries a broken marker.
    if pos == 0 {
        let end = literal_len(rest);
        return Some((Lexeme::Literal(&rest[..end]), pos + end));
    }

    // Unrecognized markers never claim the text typed after them.
    let run_end = selector_run_len(rest);
    let selectors = rest[BASE.len_utf8()..run_end].chars().count();

    if selectors == 0 {
        let end = literal_len(rest);
        return Some((Lexeme::Literal(&rest[..end]), pos + end));
    }

    if selectors < PAYLOAD_LEN {
        tracing::trace!(offset = pos, bytes = run_end, "dropping broken marker");
        return Some((Lexeme::Broken(&rest[..run_end]), pos + run_end));
    }

    tracing::debug!(offset = pos, tag = payload[0], "unknown marker payload");
    Some((Lexeme::Unknown(&rest[..run_end]), pos + run_end))
}

/// Lexer over tagged text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Next lexeme together with its byte range in the input.
    pub fn next_spanned(&mut self) -> Option<(Range<usize>, Lexeme<'a>)> {
        let start = self.pos;
        let (lexeme, end) = lex_at(self.text, start)?;
        self.pos = end;
        Some((start..end, lexeme))
    }

    /// Iterate lexemes with their byte ranges.
    pub fn spanned(mut self) -> impl Iterator<Item = (Range<usize>, Lexeme<'a>)> {
        std::iter::from_fn(move || self.next_spanned())
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_spanned().map(|(_, lexeme)| lexeme)
    }
}

/// Segments of tagged text, in order.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn is_text(lexeme: &Lexeme<'_>) -> bool {
        matches!(lexeme, Lexeme::Literal(_) | Lexeme::Unknown(_))
    }

    /// Extend a text run over adjacent literal and unknown lexemes.
    fn text_run(&mut self, start: usize) -> &'a str {
        while let Some((lexeme, next)) = lex_at(self.text, self.pos)
            && Self::is_text(&lexeme)
        {
            self.pos = next;
        }
        &self.text[start..self.pos]
    }

    /// Take the rest of the current line from the next text lexeme.
    fn take_line(&mut self, include_newline: bool) -> &'a str {
        let Some((Lexeme::Literal(s) | Lexeme::Unknown(s), _)) = lex_at(self.text, self.pos) else {
            return "";
        };
        let len = match s.find('\n') {
            Some(idx) if include_newline => idx + 1,
            Some(idx) => idx,
            None => s.len(),
        };
        let line = &self.text[self.pos..self.pos + len];
        self.pos += len;
        line
    }

    fn style_run(&mut self, kind: MarkerKind) -> Segment<'a> {
        let text = self.take_line(false);
        let mut closing = None;
        if let Some((Lexeme::Marker(next_kind), next)) = lex_at(self.text, self.pos)
            && next_kind.closes() == kind.opens()
        {
            closing = Some(next_kind);
            self.pos = next;
        }
        Segment::Token(Token {
            kind,
            text,
            closing,
        })
    }

    fn list(&mut self) -> Segment<'a> {
        let mut items = Vec::new();
        loop {
            let item = self.take_line(true);
            items.push(item);
            if !item.ends_with('\n') {
                break;
            }
            match lex_at(self.text, self.pos) {
                Some((Lexeme::Marker(MarkerKind::UnorderedListItem), next)) => self.pos = next,
                _ => break,
            }
        }
        Segment::List(items)
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.pos;
            let (lexeme, next) = lex_at(self.text, start)?;
            self.pos = next;
            match lexeme {
                Lexeme::Literal(_) | Lexeme::Unknown(_) => {
                    return Some(Segment::Text(self.text_run(start)));
                }
                Lexeme::Broken(_) => {}
                Lexeme::Marker(kind) => match kind {
                    MarkerKind::Headline(_) => {
                        let text = self.take_line(true);
                        return Some(Segment::Token(Token {
                            kind,
                            text,
                            closing: None,
                        }));
                    }
                    MarkerKind::BoldStart | MarkerKind::ItalicStart => {
                        return Some(self.style_run(kind));
                    }
                    MarkerKind::BoldEnd | MarkerKind::ItalicEnd => {
                        // An end marker that closes no run still has to survive
                        // re-encoding; it governs nothing.
                        tracing::trace!(offset = start, %kind, "unmatched end marker");
                        return Some(Segment::Token(Token {
                            kind,
                            text: "",
                            closing: None,
                        }));
                    }
                    MarkerKind::UnorderedListItem => return Some(self.list()),
                },
            }
        }
    }
}
