use ropey::Rope;
use serde::Serialize;

/// A caret or selection, in char offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection; the offsets may come in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A caret with nothing selected.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_caret(self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.is_caret()
    }

    /// Convert a selection reported in UTF-16 code units into char offsets.
    ///
    /// Offsets past the end of `text` clamp to its length.
    pub fn from_utf16(text: &str, start: usize, end: usize) -> Self {
        let rope = Rope::from_str(text);
        let total = rope.len_utf16_cu();
        Self::new(
            rope.utf16_cu_to_char(start.min(total)),
            rope.utf16_cu_to_char(end.min(total)),
        )
    }

    /// Convert this selection into UTF-16 code units of `text`.
    pub fn to_utf16(self, text: &str) -> (usize, usize) {
        let rope = Rope::from_str(text);
        let chars = rope.len_chars();
        (
            rope.char_to_utf16_cu(self.start.min(chars)),
            rope.char_to_utf16_cu(self.end.min(chars)),
        )
    }
}

/// Text split around a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub before: &'a str,
    pub selected: &'a str,
    pub after: &'a str,
}

/// Byte offset of char `idx`, clamped to the end of `text`.
fn byte_offset(text: &str, idx: usize) -> usize {
    text.char_indices().nth(idx).map_or(text.len(), |(byte, _)| byte)
}

/// Split `text` into the parts before, inside and after `selection`.
///
/// `before + selected + after == text` always holds. Offsets past the end
/// of the text clamp to its length.
pub fn split_by_selection(text: &str, selection: Selection) -> Split<'_> {
    let end = byte_offset(text, selection.end);
    let start = byte_offset(text, selection.start).min(end);
    Split {
        before: &text[..start],
        selected: &text[start..end],
        after: &text[end..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Das ist das 13te Zeichen. Ende ist am 43ten Zeichen";

    #[test]
    fn test_split_with_selection() {
        let split = split_by_selection("Das ist ein Test", Selection::new(4, 11));
        assert_eq!(split.before, "Das ");
        assert_eq!(split.selected, "ist ein");
        assert_eq!(split.after, " Test");
    }

    #[test]
    fn test_split_caret_concatenates_to_input() {
        let split = split_by_selection(TEXT, Selection::caret(5));
        assert_eq!(format!("{}{}{}", split.before, split.selected, split.after), TEXT);
    }

    #[test]
    fn test_split_caret_selects_nothing() {
        let split = split_by_selection(TEXT, Selection::caret(5));
        assert_eq!(split.selected, "");
    }

    #[test]
    fn test_split_counts_chars_not_bytes() {
        let split = split_by_selection("ä→b", Selection::new(1, 2));
        assert_eq!(split.before, "ä");
        assert_eq!(split.selected, "→");
        assert_eq!(split.after, "b");
    }

    #[test]
    fn test_split_clamps_out_of_range_end() {
        let split = split_by_selection("abc", Selection::new(1, 99));
        assert_eq!(split.before, "a");
        assert_eq!(split.selected, "bc");
        assert_eq!(split.after, "");

        let split = split_by_selection("abc", Selection::caret(42));
        assert_eq!(split.before, "abc");
        assert_eq!(split.selected, "");
    }

    #[test]
    fn test_new_orders_offsets() {
        assert_eq!(Selection::new(9, 3), Selection { start: 3, end: 9 });
        assert_eq!(Selection::new(9, 3).len(), 6);
        assert!(Selection::caret(4).is_caret());
    }

    #[test]
    fn test_reversed_literal_selection_is_empty() {
        let reversed = Selection { start: 5, end: 2 };
        assert_eq!(reversed.len(), 0);
        let split = split_by_selection("abcdef", reversed);
        assert_eq!(split.selected, "");
        assert_eq!(format!("{}{}", split.before, split.after), "abcdef");
    }

    #[test]
    fn test_utf16_conversion_handles_surrogate_pairs() {
        let marker = crate::format::MarkerKind::BoldStart.encoded();
        let text = format!("ab{marker}cd");
        // Two chars, then 8 UTF-16 units of marker, then "cd".
        let selection = Selection::from_utf16(&text, 10, 12);
        assert_eq!(selection, Selection::new(9, 11));
        assert_eq!(selection.to_utf16(&text), (10, 12));
    }

    #[test]
    fn test_utf16_conversion_clamps() {
        assert_eq!(Selection::from_utf16("abc", 1, 100), Selection::new(1, 3));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn split_always_reassembles(text in "\\PC{0,30}", a in 0usize..40, b in 0usize..40) {
                let split = split_by_selection(&text, Selection::new(a, b));
                prop_assert_eq!(format!("{}{}{}", split.before, split.selected, split.after), text);
            }

            #[test]
            fn caret_never_selects(text in "\\PC{0,30}", pos in 0usize..40) {
                let split = split_by_selection(&text, Selection::caret(pos));
                prop_assert_eq!(split.selected, "");
            }
        }
    }
}
