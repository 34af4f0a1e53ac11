//! Core document types.

use serde::Serialize;

use crate::format::{HeadlineLevel, MarkerKind};

use super::scanner::Segments;

/// A marker together with the text it governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The opening marker
    pub kind: MarkerKind,
    /// Governed text; headlines keep their line terminator
    pub text: &'a str,
    /// Closing marker consumed after the text, for style runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<MarkerKind>,
}

/// One renderable piece of tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment<'a> {
    /// Literal text
    Text(&'a str),
    /// Headline or style run
    Token(Token<'a>),
    /// Consecutive list items, each with its line terminator
    List(Vec<&'a str>),
}

impl Segment<'_> {
    /// Append the tagged form of this segment to `out`.
    pub fn write_tagged(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Token(token) => {
                out.push_str(token.kind.encoded());
                out.push_str(token.text);
                if let Some(closing) = token.closing {
                    out.push_str(closing.encoded());
                }
            }
            Self::List(items) => {
                for item in items {
                    out.push_str(MarkerKind::UnorderedListItem.encoded());
                    out.push_str(item);
                }
            }
        }
    }

    /// Append the markup form of this segment to `out`.
    pub fn write_markup(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Token(token) => {
                out.push_str(token.kind.markup());
                out.push_str(token.text);
                if let Some(closing) = token.closing {
                    out.push_str(closing.markup());
                }
            }
            Self::List(items) => {
                for item in items {
                    out.push_str(MarkerKind::UnorderedListItem.markup());
                    out.push_str(item);
                }
            }
        }
    }

    /// Append only the visible text of this segment to `out`.
    pub fn write_visible(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Token(token) => out.push_str(token.text),
            Self::List(items) => items.iter().for_each(|item| out.push_str(item)),
        }
    }
}

/// Reference to a headline in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineRef {
    /// Headline level
    pub level: HeadlineLevel,
    /// Headline text without its line terminator
    pub text: String,
    /// Zero-based line in the visible text
    pub line: usize,
}

/// An owned snapshot of tagged text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    source: String,
}

impl Document {
    /// Create a document from tagged text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Create a document from text a widget echoed back with its rendered
    /// bullet glyphs still in it.
    pub fn from_echoed(source: &str) -> Self {
        Self::new(super::strip_bullet_echo(source))
    }

    /// Get the tagged source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Lazily scan the document into segments.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.source)
    }

    /// All headlines, in order.
    pub fn headlines(&self) -> Vec<HeadlineRef> {
        let mut headlines = Vec::new();
        let mut line = 0;
        for segment in self.segments() {
            if let Segment::Token(Token {
                kind: MarkerKind::Headline(level),
                text,
                ..
            }) = segment
            {
                headlines.push(HeadlineRef {
                    level,
                    text: text.trim_end_matches(['\n', '\r']).to_string(),
                    line,
                });
            }
            let mut visible = String::new();
            segment.write_visible(&mut visible);
            line += visible.matches('\n').count();
        }
        headlines
    }

    /// The text with every marker removed.
    pub fn visible_text(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in self.segments() {
            segment.write_visible(&mut out);
        }
        out
    }

    /// Re-encode the segments. Equals the source unless broken markers were
    /// dropped while scanning.
    pub fn to_tagged(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in self.segments() {
            segment.write_tagged(&mut out);
        }
        out
    }

    /// Convert to markup.
    pub fn to_markup(&self) -> String {
        crate::markup::to_markup(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H1: MarkerKind = MarkerKind::Headline(HeadlineLevel::H1);
    const H2: MarkerKind = MarkerKind::Headline(HeadlineLevel::H2);

    fn sample() -> String {
        format!(
            "{}Title\nIntro with {}bold{} words.\n{}Second\n{}a\n{}b\n\nEnd",
            H1.encoded(),
            MarkerKind::BoldStart.encoded(),
            MarkerKind::BoldEnd.encoded(),
            H2.encoded(),
            MarkerKind::UnorderedListItem.encoded(),
            MarkerKind::UnorderedListItem.encoded(),
        )
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("");
        assert!(doc.is_empty());
        assert_eq!(doc.segments().count(), 0);
        assert!(doc.headlines().is_empty());
    }

    #[test]
    fn test_to_tagged_reproduces_well_formed_source() {
        let doc = Document::new(sample());
        assert_eq!(doc.to_tagged(), doc.source());
    }

    #[test]
    fn test_visible_text_drops_markers() {
        let doc = Document::new(sample());
        assert_eq!(
            doc.visible_text(),
            "Title\nIntro with bold words.\nSecond\na\nb\n\nEnd"
        );
    }

    #[test]
    fn test_headlines_outline() {
        let doc = Document::new(sample());
        assert_eq!(
            doc.headlines(),
            vec![
                HeadlineRef {
                    level: HeadlineLevel::H1,
                    text: "Title".to_string(),
                    line: 0,
                },
                HeadlineRef {
                    level: HeadlineLevel::H2,
                    text: "Second".to_string(),
                    line: 2,
                },
            ]
        );
    }

    #[test]
    fn test_segment_markup_matches_converter() {
        let doc = Document::new(sample());
        let mut markup = String::new();
        for segment in doc.segments() {
            segment.write_markup(&mut markup);
        }
        assert_eq!(markup, doc.to_markup());
        assert_eq!(markup, "# Title\nIntro with **bold** words.\n## Second\n- a\n- b\n\nEnd");
    }

    #[test]
    fn test_segments_serialize_to_json() {
        let text = format!("{}Hi", MarkerKind::ItalicStart.encoded());
        let doc = Document::new(text);
        let segments: Vec<_> = doc.segments().collect();
        let json = serde_json::to_string(&segments).unwrap();
        assert_eq!(json, r#"[{"token":{"kind":"italic_start","text":"Hi"}}]"#);
    }

    #[test]
    fn test_headline_json_carries_level() {
        let doc = Document::new(format!("{}Hi", H2.encoded()));
        let segments: Vec<_> = doc.segments().collect();
        let json = serde_json::to_string(&segments).unwrap();
        assert_eq!(json, r#"[{"token":{"kind":{"headline":"h2"},"text":"Hi"}}]"#);
    }

    #[test]
    fn test_from_echoed_strips_bullets() {
        let ul = MarkerKind::UnorderedListItem.encoded();
        let doc = Document::from_echoed(&format!("{ul}• one\n{ul}•two"));
        assert_eq!(doc.source(), format!("{ul}one\n{ul}two"));
    }
}
