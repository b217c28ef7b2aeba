//! The set of characters a glyph can be labeled with
//!
//! Digits, then ASCII lowercase, then ASCII uppercase: 62 classes. This
//! order is also the order of every [`Histogram`](crate::Histogram).

/// Valid class characters in canonical order
pub const VALID_CHARACTERS: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of valid classes
pub const CLASS_COUNT: usize = 62;

/// Returns `true` if `c` is one of the valid class characters
#[inline]
pub fn is_valid_class(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Iterate the valid classes in canonical order
pub fn classes() -> impl Iterator<Item = char> {
    VALID_CHARACTERS.chars()
}

/// Position of `c` in canonical order
pub fn class_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        'a'..='z' => Some(10 + c as usize - 'a' as usize),
        'A'..='Z' => Some(36 + c as usize - 'A' as usize),
        _ => None,
    }
}
