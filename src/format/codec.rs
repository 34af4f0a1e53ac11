//! Byte <-> variation selector codec.
//!
//! Bytes `0..16` map onto the basic selectors `U+FE00..=U+FE0F`; bytes
//! `16..256` map onto the supplementary selectors `U+E0100..=U+E01EF`.
//! The supplementary range sits outside the BMP, so those selectors take a
//! surrogate pair in UTF-16 and four bytes in UTF-8.

const BASIC_START: u32 = 0xFE00;
const BASIC_END: u32 = 0xFE0F;
const SUPPLEMENT_START: u32 = 0xE0100;
const SUPPLEMENT_END: u32 = 0xE01EF;

/// Map one byte onto its variation selector.
pub fn byte_to_selector(byte: u8) -> char {
    let code_point = if byte < 16 {
        BASIC_START + u32::from(byte)
    } else {
        SUPPLEMENT_START + u32::from(byte - 16)
    };
    // Both ranges are assigned scalar values, so the fallback never fires.
    char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Map a variation selector back onto its byte.
///
/// Returns `None` for anything outside the two selector ranges.
pub fn selector_to_byte(ch: char) -> Option<u8> {
    let code_point = u32::from(ch);
    match code_point {
        BASIC_START..=BASIC_END => u8::try_from(code_point - BASIC_START).ok(),
        SUPPLEMENT_START..=SUPPLEMENT_END => u8::try_from(code_point - SUPPLEMENT_START + 16).ok(),
        _ => None,
    }
}

/// Returns true if `ch` is one of the 256 payload-carrying selectors.
pub fn is_selector(ch: char) -> bool {
    selector_to_byte(ch).is_some()
}

/// Append one variation selector per byte to `base`.
pub fn encode(base: char, bytes: &[u8]) -> String {
    let mut out = String::with_capacity(base.len_utf8() + bytes.len() * 4);
    out.push(base);
    out.extend(bytes.iter().copied().map(byte_to_selector));
    out
}

/// Read bytes from the leading run of variation selectors in `s`.
///
/// Decoding stops at the first code point that is not a selector. If `s`
/// does not start with a selector the result is empty, which callers read
/// as "no marker here".
pub fn decode(s: &str) -> Vec<u8> {
    s.chars().map_while(selector_to_byte).collect()
}
