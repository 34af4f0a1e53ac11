//! Editing tagged text relative to a caret or selection.
//!
//! The mutators are pure functions from (text, selection) to new text. The
//! rope-backed [`EditorBuffer`] is a ready-made host model that tracks the
//! selection and the pending style run between toolbar presses.

mod buffer;
mod mutate;
mod selection;

pub use buffer::EditorBuffer;
pub use mutate::{
    EditAction, StyleEdit, StyleState, close_style, insert_headline, insert_list_item, open_style,
};
pub use selection::{Selection, Split, split_by_selection};
