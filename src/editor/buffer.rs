use ropey::Rope;

use crate::document::Document;
use crate::format::{MARKER_LEN, Style};

use super::mutate::{
    EditAction, StyleEdit, StyleState, close_style, insert_headline, insert_list_item, open_style,
};
use super::selection::{Selection, split_by_selection};

/// The host-side editing model: tagged text, the current selection, and
/// any style run waiting for its end marker.
///
/// Toolbar actions go through the pure mutators and replace the whole text.
/// Typing goes straight into the rope, which is how a backspace can cut a
/// marker short.
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    style_state: StyleState,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from tagged text, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            style_state: StyleState::Idle,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full tagged text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub const fn style_state(&self) -> StyleState {
        self.style_state
    }

    /// Whether the buffer has been modified since creation or last emit.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after emitting markup).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Update the selection from char offsets, clamped to the text.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    /// Update the selection from UTF-16 offsets, as many widgets report them.
    pub fn set_selection_utf16(&mut self, start: usize, end: usize) {
        let total = self.rope.len_utf16_cu();
        self.selection = Selection::new(
            self.rope.utf16_cu_to_char(start.min(total)),
            self.rope.utf16_cu_to_char(end.min(total)),
        );
    }

    /// Replace the whole text, as a widget change event does.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let Selection { start, end } = self.selection;
        self.set_selection(start, end);
        self.dirty = true;
    }

    /// Type `s` over the selection.
    pub fn insert_str(&mut self, s: &str) {
        let Selection { start, end } = self.selection;
        self.rope.remove(start..end);
        self.rope.insert(start, s);
        self.selection = Selection::caret(start + s.chars().count());
        self.dirty = true;
    }

    /// Delete the selection, or the char before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        let Selection { start, end } = self.selection;
        if start == end && start == 0 {
            return false;
        }
        let from = if start == end { start - 1 } else { start };
        self.rope.remove(from..end);
        self.selection = Selection::caret(from);
        self.dirty = true;
        true
    }

    /// Apply a toolbar action.
    ///
    /// Style actions toggle: the first press opens a run, a second press of
    /// the same style closes it. Pressing the other style closes the pending
    /// run before opening the new one.
    pub fn apply(&mut self, action: EditAction) {
        match action {
            EditAction::Headline(level) => {
                let text = self.text();
                let replaced = insert_headline(level, &text, self.selection);
                self.commit(&text, replaced);
            }
            EditAction::ListItem => {
                let text = self.text();
                let replaced = insert_list_item(&text, self.selection);
                self.commit(&text, replaced);
            }
            EditAction::Style(style) => self.toggle_style(style),
        }
        tracing::debug!(
            %action,
            start = self.selection.start,
            end = self.selection.end,
            state = ?self.style_state,
            "applied edit action"
        );
    }

    fn toggle_style(&mut self, style: Style) {
        if let StyleState::AwaitingEnd(pending) = self.style_state {
            let text = self.text();
            if pending == style {
                let StyleEdit { text: closed, state } =
                    close_style(&text, self.selection, self.style_state);
                self.commit(&text, closed);
                self.style_state = state;
                return;
            }
            // Close the pending run in front of the selection, which the new
            // style then wraps.
            let Selection { start, end } = self.selection;
            let StyleEdit { text: closed, state } =
                close_style(&text, Selection::caret(start), self.style_state);
            self.rope = Rope::from_str(&closed);
            self.selection = Selection::new(start + MARKER_LEN, end + MARKER_LEN);
            self.style_state = state;
            self.dirty = true;
        }
        let text = self.text();
        let StyleEdit { text: opened, state } = open_style(&text, self.selection, style);
        self.commit(&text, opened);
        self.style_state = state;
    }

    /// Swap in `replaced` and put the caret just before the untouched tail.
    fn commit(&mut self, previous: &str, replaced: String) {
        let tail = split_by_selection(previous, self.selection).after.chars().count();
        self.rope = Rope::from_str(&replaced);
        self.selection = Selection::caret(self.rope.len_chars() - tail);
        self.dirty = true;
    }

    /// Snapshot the text as a document.
    pub fn document(&self) -> Document {
        Document::new(self.text())
    }

    /// The text as markup.
    pub fn to_markup(&self) -> String {
        crate::markup::to_markup(&self.text())
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("len_chars", &self.rope.len_chars())
            .field("selection", &self.selection)
            .field("style_state", &self.style_state)
            .field("dirty", &self.dirty)
            .finish()
    }
}
