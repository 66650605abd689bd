//! Grapheme cluster helpers.
//!
//! Everything user-facing in this crate counts and indexes by extended
//! grapheme clusters, so `"e\u{301}"` has length 1 and an emoji ZWJ
//! sequence is a single character.

use core::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// A Unicode extended grapheme cluster within a UTF-8 string.
///
/// The range is expressed in byte offsets into the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeCluster {
    pub range: Range<usize>,
}

/// Compute all grapheme clusters for the given text in scan order.
pub fn grapheme_clusters(text: &str) -> Vec<GraphemeCluster> {
    text.grapheme_indices(true)
        .map(|(byte_idx, g)| GraphemeCluster {
            range: byte_idx..byte_idx + g.len(),
        })
        .collect()
}

pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The `index`-th grapheme, if any.
pub fn grapheme_at(text: &str, index: usize) -> Option<&str> {
    text.graphemes(true).nth(index)
}

/// Byte range covering graphemes `start..start + len`.
///
/// Returns `None` when the requested span runs past the end of `text`.
pub fn grapheme_byte_range(text: &str, start: usize, len: usize) -> Option<Range<usize>> {
    let mut boundaries = text
        .grapheme_indices(true)
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()));
    let begin = boundaries.nth(start)?;
    if len == 0 {
        return Some(begin..begin);
    }
    let end = boundaries.nth(len - 1)?;
    Some(begin..end)
}

/// Returns `true` if `offset` is at a grapheme cluster boundary.
///
/// `offset` is clamped to `0..=text.len()`.
pub fn is_grapheme_boundary(text: &str, offset: usize) -> bool {
    let len = text.len();
    let offset = offset.min(len);
    if offset == 0 || offset == len {
        return true;
    }
    text.grapheme_indices(true)
        .map(|(idx, _)| idx)
        .take_while(|&idx| idx <= offset)
        .any(|idx| idx == offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combining_mark_stays_with_base() {
        let text = "a\u{0301}b";
        let clusters = grapheme_clusters(text);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].range, 0..3);
        assert_eq!(grapheme_count(text), 2);
        assert_eq!(grapheme_at(text, 0), Some("a\u{0301}"));
        assert!(!is_grapheme_boundary(text, 1));
        assert!(is_grapheme_boundary(text, 3));
    }

    #[test]
    fn emoji_zwj_sequence_is_single_cluster() {
        let text = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(grapheme_count(text), 1);
        assert_eq!(grapheme_at(text, 1), None);
    }

    #[test]
    fn byte_range_spans() {
        let text = "h\u{E9}llo";
        assert_eq!(grapheme_byte_range(text, 1, 2), Some(1..4));
        assert_eq!(grapheme_byte_range(text, 5, 0), Some(6..6));
        assert_eq!(grapheme_byte_range(text, 3, 3), None);
        assert_eq!(grapheme_byte_range(text, 6, 0), None);
    }
}
