//! Marker insertion relative to a selection.
//!
//! Every function here is pure: it takes the current tagged text and
//! selection and returns the new text. The host swaps the whole string.

use std::fmt;
use std::str::FromStr;

use crate::format::{HeadlineLevel, MarkerKind, ParseNameError, Style};

use super::selection::{Selection, split_by_selection};

/// Whether a style run was opened at a caret and still needs its end marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StyleState {
    #[default]
    Idle,
    AwaitingEnd(Style),
}

/// Result of opening or closing a style run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEdit {
    pub text: String,
    pub state: StyleState,
}

/// A toolbar action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Headline(HeadlineLevel),
    Style(Style),
    ListItem,
}

impl FromStr for EditAction {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h1" => Ok(Self::Headline(HeadlineLevel::H1)),
            "h2" => Ok(Self::Headline(HeadlineLevel::H2)),
            "h3" => Ok(Self::Headline(HeadlineLevel::H3)),
            "bold" => Ok(Self::Style(Style::Bold)),
            "italic" => Ok(Self::Style(Style::Italic)),
            "list" => Ok(Self::ListItem),
            _ => Err(ParseNameError {
                what: "action",
                name: s.to_string(),
                expected: "h1, h2, h3, bold, italic, list",
            }),
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Headline(level) => write!(f, "h{}", level.as_u8()),
            Self::Style(Style::Bold) => f.write_str("bold"),
            Self::Style(Style::Italic) => f.write_str("italic"),
            Self::ListItem => f.write_str("list"),
        }
    }
}

/// Insert a headline marker at the selection, starting it on a new line.
///
/// The selected text is replaced, not wrapped: a headline takes over the
/// rest of its line.
pub fn insert_headline(level: HeadlineLevel, text: &str, selection: Selection) -> String {
    let marker = MarkerKind::Headline(level).encoded();
    if text.is_empty() {
        return marker.to_string();
    }
    let split = split_by_selection(text, selection);
    let prefix = if split.before.ends_with('\n') { "" } else { "\n" };
    [split.before, prefix, marker, split.after].concat()
}

/// Open a bold or italic run at the selection.
///
/// A non-empty selection is wrapped in start and end markers and the run is
/// complete. At a bare caret only the start marker goes in, after a space
/// unless the caret already follows whitespace or sits at the start of the
/// text, and the returned state asks for a later [`close_style`].
pub fn open_style(text: &str, selection: Selection, style: Style) -> StyleEdit {
    let split = split_by_selection(text, selection);
    if split.selected.is_empty() {
        let needs_space = split
            .before
            .chars()
            .next_back()
            .is_some_and(|ch| !ch.is_whitespace());
        let space = if needs_space { " " } else { "" };
        return StyleEdit {
            text: [split.before, space, style.start().encoded(), split.after].concat(),
            state: StyleState::AwaitingEnd(style),
        };
    }
    StyleEdit {
        text: [
            split.before,
            style.start().encoded(),
            split.selected,
            style.end().encoded(),
            split.after,
        ]
        .concat(),
        state: StyleState::Idle,
    }
}

/// Close a pending style run at the end of the selection.
///
/// With nothing pending the text comes back unchanged.
pub fn close_style(text: &str, selection: Selection, state: StyleState) -> StyleEdit {
    let StyleState::AwaitingEnd(style) = state else {
        return StyleEdit {
            text: text.to_string(),
            state: StyleState::Idle,
        };
    };
    let split = split_by_selection(text, selection);
    StyleEdit {
        text: [
            split.before,
            split.selected,
            style.end().encoded(),
            split.after,
        ]
        .concat(),
        state: StyleState::Idle,
    }
}

/// Turn the selection into a list item on its own line.
pub fn insert_list_item(text: &str, selection: Selection) -> String {
    let split = split_by_selection(text, selection);
    let at_line_start = split.before.is_empty() || split.before.ends_with('\n');
    let prefix = if at_line_start { "" } else { "\n" };
    [
        split.before,
        prefix,
        MarkerKind::UnorderedListItem.encoded(),
        split.selected,
        split.after,
    ]
    .concat()
}
