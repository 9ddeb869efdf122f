//! Char-level prefix diffing and slicing
//!
//! All lengths here are counted in `char`s. ASCII art is full of box-drawing
//! and block characters, so byte offsets would split code points.

/// Number of leading chars shared by `a` and `b`.
///
/// Compares char by char from index 0 until a mismatch or either string ends.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of `text` in chars
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `n`-th char, or `text.len()` when `n` is past the end
pub fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Chars `start..end` of `text` (clamped to the string)
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end.max(start));
    &text[from..to]
}

/// Ceiling division used for per-step chunk sizes; never returns 0 for work > 0
pub fn chunk_size(work: usize, steps: usize) -> usize {
    if work == 0 {
        return 0;
    }
    work.div_ceil(steps.max(1))
}
