//! The marker catalog.
//!
//! Every marker is [`BASE`] followed by a `PAYLOAD_LEN`-byte payload: a type
//! tag, one parameter byte, then zero padding. The encoded string for each
//! kind is built once and shared for the life of the process.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;

use super::codec::encode;

/// Zero-width space anchoring every marker.
pub const BASE: char = '\u{200B}';

/// Payload bytes per marker.
pub const PAYLOAD_LEN: usize = 6;

/// Marker length in chars: the base plus one selector per payload byte.
pub const MARKER_LEN: usize = 1 + PAYLOAD_LEN;

/// Marker length in UTF-16 code units.
///
/// The type tag is always `>= 16` and lands in the supplementary selector
/// range (a surrogate pair); parameter and padding bytes are `< 16`.
pub const MARKER_UTF16_LEN: usize = 1 + 2 + (PAYLOAD_LEN - 1);

/// Marker length in UTF-8 bytes.
pub const MARKER_UTF8_LEN: usize = 3 + 4 + 3 * (PAYLOAD_LEN - 1);

/// First payload byte of every marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Headline = 0x10,
    Bold = 0x20,
    Italic = 0x30,
    List = 0x40,
}

impl TypeTag {
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x10 => Some(Self::Headline),
            0x20 => Some(Self::Bold),
            0x30 => Some(Self::Italic),
            0x40 => Some(Self::List),
            _ => None,
        }
    }
}

const BOLD_START: u8 = 1;
const BOLD_END: u8 = 2;
const ITALIC_START: u8 = 3;
const ITALIC_END: u8 = 4;
const LIST_UNORDERED: u8 = 1;

/// Headline depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HeadlineLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadlineLevel {
    pub const ALL: [Self; 3] = [Self::H1, Self::H2, Self::H3];

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Inline style that is opened and closed by a pair of markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Bold,
    Italic,
}

impl Style {
    pub const fn start(self) -> MarkerKind {
        match self {
            Self::Bold => MarkerKind::BoldStart,
            Self::Italic => MarkerKind::ItalicStart,
        }
    }

    pub const fn end(self) -> MarkerKind {
        match self {
            Self::Bold => MarkerKind::BoldEnd,
            Self::Italic => MarkerKind::ItalicEnd,
        }
    }
}

/// Every marker the format knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Headline(HeadlineLevel),
    BoldStart,
    BoldEnd,
    ItalicStart,
    ItalicEnd,
    UnorderedListItem,
}

static ENCODED: LazyLock<[String; MarkerKind::ALL.len()]> =
    LazyLock::new(|| MarkerKind::ALL.map(|kind| encode(BASE, &kind.payload())));

impl MarkerKind {
    pub const ALL: [Self; 8] = [
        Self::Headline(HeadlineLevel::H1),
        Self::Headline(HeadlineLevel::H2),
        Self::Headline(HeadlineLevel::H3),
        Self::BoldStart,
        Self::BoldEnd,
        Self::ItalicStart,
        Self::ItalicEnd,
        Self::UnorderedListItem,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Headline(HeadlineLevel::H1) => 0,
            Self::Headline(HeadlineLevel::H2) => 1,
            Self::Headline(HeadlineLevel::H3) => 2,
            Self::BoldStart => 3,
            Self::BoldEnd => 4,
            Self::ItalicStart => 5,
            Self::ItalicEnd => 6,
            Self::UnorderedListItem => 7,
        }
    }

    pub const fn type_tag(self) -> TypeTag {
        match self {
            Self::Headline(_) => TypeTag::Headline,
            Self::BoldStart | Self::BoldEnd => TypeTag::Bold,
            Self::ItalicStart | Self::ItalicEnd => TypeTag::Italic,
            Self::UnorderedListItem => TypeTag::List,
        }
    }

    const fn parameter(self) -> u8 {
        match self {
            Self::Headline(level) => level.as_u8(),
            Self::BoldStart => BOLD_START,
            Self::BoldEnd => BOLD_END,
            Self::ItalicStart => ITALIC_START,
            Self::ItalicEnd => ITALIC_END,
            Self::UnorderedListItem => LIST_UNORDERED,
        }
    }

    /// The zero-padded payload bytes for this kind.
    pub const fn payload(self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0; PAYLOAD_LEN];
        payload[0] = self.type_tag() as u8;
        payload[1] = self.parameter();
        payload
    }

    /// Classify decoded payload bytes.
    ///
    /// Needs the type tag and the parameter byte. Padding is not checked,
    /// so a payload that lost trailing zeros still classifies.
    pub const fn from_payload(payload: &[u8]) -> Option<Self> {
        let [tag, parameter, ..] = payload else {
            return None;
        };
        let Some(tag) = TypeTag::from_byte(*tag) else {
            return None;
        };
        match (tag, *parameter) {
            (TypeTag::Headline, level) => match HeadlineLevel::from_byte(level) {
                Some(level) => Some(Self::Headline(level)),
                None => None,
            },
            (TypeTag::Bold, BOLD_START) => Some(Self::BoldStart),
            (TypeTag::Bold, BOLD_END) => Some(Self::BoldEnd),
            (TypeTag::Italic, ITALIC_START) => Some(Self::ItalicStart),
            (TypeTag::Italic, ITALIC_END) => Some(Self::ItalicEnd),
            (TypeTag::List, LIST_UNORDERED) => Some(Self::UnorderedListItem),
            _ => None,
        }
    }

    /// The canonical encoded marker string.
    pub fn encoded(self) -> &'static str {
        &ENCODED[self.index()]
    }

    /// Markdown that stands in for this marker.
    pub const fn markup(self) -> &'static str {
        match self {
            Self::Headline(HeadlineLevel::H1) => "# ",
            Self::Headline(HeadlineLevel::H2) => "## ",
            Self::Headline(HeadlineLevel::H3) => "### ",
            Self::BoldStart | Self::BoldEnd => "**",
            Self::ItalicStart | Self::ItalicEnd => "__",
            Self::UnorderedListItem => "- ",
        }
    }

    /// The style this marker opens, if any.
    pub const fn opens(self) -> Option<Style> {
        match self {
            Self::BoldStart => Some(Style::Bold),
            Self::ItalicStart => Some(Style::Italic),
            _ => None,
        }
    }

    /// The style this marker closes, if any.
    pub const fn closes(self) -> Option<Style> {
        match self {
            Self::BoldEnd => Some(Style::Bold),
            Self::ItalicEnd => Some(Style::Italic),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Headline(HeadlineLevel::H1) => "h1",
            Self::Headline(HeadlineLevel::H2) => "h2",
            Self::Headline(HeadlineLevel::H3) => "h3",
            Self::BoldStart => "bold-start",
            Self::BoldEnd => "bold-end",
            Self::ItalicStart => "italic-start",
            Self::ItalicEnd => "italic-end",
            Self::UnorderedListItem => "list",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that does not match any marker kind, style or action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} `{name}` (expected one of: {expected})")]
pub struct ParseNameError {
    pub what: &'static str,
    pub name: String,
    pub expected: &'static str,
}

impl FromStr for MarkerKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseNameError {
                what: "marker kind",
                name: s.to_string(),
                expected: "h1, h2, h3, bold-start, bold-end, italic-start, italic-end, list",
            })
    }
}

impl FromStr for Style {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            _ => Err(ParseNameError {
                what: "style",
                name: s.to_string(),
                expected: "bold, italic",
            }),
        }
    }
}
