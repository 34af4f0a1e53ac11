//! The invisible marker format.
//!
//! Tagged text is ordinary text with markers spliced in. A marker is a
//! zero-width space followed by a fixed number of Unicode variation
//! selectors, each selector carrying one payload byte. Nothing about a
//! marker is visible when the text is displayed.
//!
//! - [`codec`]: bytes to variation selectors and back
//! - [`markers`]: the closed catalog of marker kinds and their encodings

pub mod codec;
pub mod markers;

pub use codec::{byte_to_selector, decode, encode, is_selector, selector_to_byte};
pub use markers::{
    BASE, HeadlineLevel, MARKER_LEN, MARKER_UTF8_LEN, MARKER_UTF16_LEN, MarkerKind, PAYLOAD_LEN,
    ParseNameError, Style, TypeTag,
};
