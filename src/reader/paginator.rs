/// Text pagination
///
/// Converts a raw book body into a deterministic sequence of fixed-capacity
/// pages. This is a pure function of (text, capacity): identical inputs always
/// yield an identical page sequence, which is what keeps persisted page-indexed
/// bookmarks valid across app restarts. The caller must keep the capacity
/// formula stable for a given device configuration — changing it invalidates
/// previously stored bookmarks.

use crate::error::{ReaderError, Result};

/// Split `text` into pages of at most `capacity_chars` characters.
///
/// Words (whitespace-separated tokens) are accumulated greedily, joined by
/// single spaces; a word that would push the current page past the capacity
/// starts the next page instead. Two deliberate edge cases:
///
/// - Empty (or all-whitespace) input produces exactly one empty page, so the
///   page indicator and slider bounds stay well-defined.
/// - A single word longer than the capacity occupies its own oversized page;
///   it never produces a leading empty page.
///
/// `capacity_chars` of zero is a misconfiguration and returns
/// [`ReaderError::InvalidCapacity`] rather than an empty or degenerate split.
pub fn paginate(text: &str, capacity_chars: usize) -> Result<Vec<String>> {
    if capacity_chars == 0 {
        return Err(ReaderError::InvalidCapacity);
    }

    let mut pages = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() > capacity_chars {
            pages.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    // The final buffer is always pushed; for empty input this is the
    // single empty page.
    if pages.is_empty() || !current.is_empty() {
        pages.push(current);
    }

    Ok(pages)
}
