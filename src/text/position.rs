//! Position conversion functions
//!
//! The engine counts chars; the DOM (`selectionStart`, `setSelectionRange`)
//! counts UTF-16 code units. These convert between the two.

/// Convert a UTF-16 code unit offset into a char offset
///
/// An offset landing inside a surrogate pair rounds up to the next char.
/// Offsets past the end clamp to the char length.
pub fn utf16_to_char_pos(text: &str, utf16_pos: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.chars().enumerate() {
        if units >= utf16_pos {
            return idx;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}

/// Convert a char offset into a UTF-16 code unit offset
pub fn char_pos_to_utf16(text: &str, char_pos: usize) -> usize {
    text.chars().take(char_pos).map(char::len_utf16).sum()
}
