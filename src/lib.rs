// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. markup::to_markup)
    clippy::module_name_repetitions
)]

//! # Hidemark
//!
//! Invisible rich-text markers inside ordinary text.
//!
//! A marker is a zero-width space followed by six Unicode variation
//! selectors, each selector smuggling one byte. Headlines, bold and italic
//! runs, and list items are all expressed this way, so tagged text stays a
//! single plain string that any text widget can hold.
//!
//! ## Modules
//!
//! - [`format`]: byte codec and the marker catalog
//! - [`document`]: scanning tagged text into renderable segments
//! - [`editor`]: inserting markers relative to a selection
//! - [`markup`]: converting tagged text to Markdown
//! - [`config`]: command-line defaults
//!
//! ## Example
//!
//! ```
//! use hidemark::editor::{Selection, open_style};
//! use hidemark::format::Style;
//! use hidemark::markup::to_markup;
//!
//! let edit = open_style("make this loud", Selection::new(10, 14), Style::Bold);
//! assert_eq!(to_markup(&edit.text), "make this **loud**");
//! ```

pub mod config;
pub mod document;
pub mod editor;
pub mod format;
pub mod markup;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{Document, Segment, render};
    pub use crate::editor::{EditAction, EditorBuffer, Selection, StyleState};
    pub use crate::format::{HeadlineLevel, MarkerKind, Style};
    pub use crate::markup::to_markup;
}
