use thiserror::Error;

/// Range errors from [`AttributedText`](crate::AttributedText) edits. Offsets are bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributedTextError {
    #[error("invalid range {start}..{end}: start > end")]
    InvalidRange { start: usize, end: usize },
    #[error("range {start}..{end} out of bounds for len {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("range {start}..{end}: index {index} not on a char boundary")]
    NotOnCharBoundary {
        start: usize,
        end: usize,
        index: usize,
    },
}
