use std::ops::{Add, Range};

use tracing::trace;

use crate::attributes::TextAttributes;
use crate::error::AttributedTextError;

#[derive(Clone, Debug, PartialEq)]
struct Run {
    range: Range<usize>,
    attrs: TextAttributes,
}

/// A string with attributes over byte ranges.
///
/// Runs always cover the whole text without gaps, and neighbouring runs
/// never carry equal attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedText {
    text: String,
    runs: Vec<Run>,
}

impl AttributedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_attributes(text, TextAttributes::default())
    }

    pub fn with_attributes(text: impl Into<String>, attrs: TextAttributes) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run {
                range: 0..text.len(),
                attrs,
            }]
        };
        Self { text, runs }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the attributes over `range`.
    pub fn set_attributes(
        &mut self,
        range: Range<usize>,
        attrs: TextAttributes,
    ) -> Result<(), AttributedTextError> {
        self.validate(&range)?;
        self.update(range, |_| attrs.clone());
        Ok(())
    }

    /// Merge `attrs` into whatever already applies over `range`.
    pub fn add_attributes(
        &mut self,
        range: Range<usize>,
        attrs: &TextAttributes,
    ) -> Result<(), AttributedTextError> {
        self.validate(&range)?;
        self.update(range, |existing| existing.merge(attrs));
        Ok(())
    }

    pub fn set_all(&mut self, attrs: TextAttributes) {
        self.update(0..self.text.len(), |_| attrs.clone());
    }

    pub fn add_all(&mut self, attrs: &TextAttributes) {
        self.update(0..self.text.len(), |existing| existing.merge(attrs));
    }

    pub fn append(&mut self, other: AttributedText) -> &mut Self {
        let offset = self.text.len();
        self.text.push_str(&other.text);
        self.runs.extend(other.runs.into_iter().map(|run| Run {
            range: run.range.start + offset..run.range.end + offset,
            attrs: run.attrs,
        }));
        self.coalesce();
        self
    }

    /// Append `text` styled with `attrs`.
    pub fn push_str(&mut self, text: &str, attrs: TextAttributes) -> &mut Self {
        self.append(AttributedText::with_attributes(text, attrs))
    }

    /// Attributes at byte `index`, `None` past the end.
    pub fn attributes_at(&self, index: usize) -> Option<&TextAttributes> {
        self.runs
            .iter()
            .find(|run| run.range.contains(&index))
            .map(|run| &run.attrs)
    }

    /// Maximal ranges sharing the same attributes, in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = (Range<usize>, &TextAttributes)> {
        self.runs.iter().map(|run| (run.range.clone(), &run.attrs))
    }

    fn validate(&self, range: &Range<usize>) -> Result<(), AttributedTextError> {
        let len = self.text.len();
        let (start, end) = (range.start, range.end);
        if start > end {
            return Err(AttributedTextError::InvalidRange { start, end });
        }
        if end > len {
            return Err(AttributedTextError::OutOfBounds { start, end, len });
        }
        for index in [start, end] {
            if !self.text.is_char_boundary(index) {
                return Err(AttributedTextError::NotOnCharBoundary { start, end, index });
            }
        }
        Ok(())
    }

    fn update(&mut self, range: Range<usize>, f: impl Fn(&TextAttributes) -> TextAttributes) {
        if range.is_empty() {
            return;
        }
        self.split_at(range.start);
        self.split_at(range.end);
        for run in &mut self.runs {
            if run.range.start >= range.start && run.range.end <= range.end {
                run.attrs = f(&run.attrs);
            }
        }
        self.coalesce();
        trace!(start = range.start, end = range.end, runs = self.runs.len(), "attributes updated");
    }

    fn split_at(&mut self, pos: usize) {
        let Some(i) = self
            .runs
            .iter()
            .position(|run| run.range.start < pos && pos < run.range.end)
        else {
            return;
        };
        let tail = Run {
            range: pos..self.runs[i].range.end,
            attrs: self.runs[i].attrs.clone(),
        };
        self.runs[i].range.end = pos;
        self.runs.insert(i + 1, tail);
    }

    fn coalesce(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.attrs == run.attrs && prev.range.end == run.range.start => {
                    prev.range.end = run.range.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

impl Add for AttributedText {
    type Output = AttributedText;

    fn add(mut self, rhs: AttributedText) -> AttributedText {
        self.append(rhs);
        self
    }
}

impl From<&str> for AttributedText {
    fn from(text: &str) -> Self {
        AttributedText::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_geom::Color;

    #[test]
    fn set_splits_and_coalesces() {
        let mut at = AttributedText::new("Hello world");
        let bold = TextAttributes::new().font("Bold", 12.0);
        at.set_attributes(0..5, bold.clone()).unwrap();
        assert_eq!(at.runs().len(), 2);
        assert_eq!(at.attributes_at(4), Some(&bold));
        assert_eq!(at.attributes_at(5), Some(&TextAttributes::default()));
        at.set_attributes(5..11, bold.clone()).unwrap();
        let runs: Vec<_> = at.runs().map(|(r, _)| r).collect();
        assert_eq!(runs, vec![0..11]);
    }

    #[test]
    fn add_merges_into_existing_runs() {
        let mut at = AttributedText::with_attributes("abcdef", TextAttributes::new().kern(1.0));
        let red = TextAttributes::new().foreground_color(Color::rgba(255, 0, 0, 255));
        at.add_attributes(2..4, &red).unwrap();
        let mid = at.attributes_at(3).unwrap();
        assert_eq!(mid.kern, Some(1.0));
        assert!(mid.foreground_color.is_some());
        assert_eq!(at.attributes_at(0).and_then(|a| a.foreground_color), None);
        assert_eq!(at.runs().len(), 3);
    }

    #[test]
    fn range_errors() {
        let mut at = AttributedText::new("\u{e9}clair");
        let attrs = TextAttributes::new();
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 4..3;
        assert_eq!(
            at.set_attributes(reversed, attrs.clone()),
            Err(AttributedTextError::InvalidRange { start: 4, end: 3 })
        );
        assert_eq!(
            at.set_attributes(0..8, attrs.clone()),
            Err(AttributedTextError::OutOfBounds {
                start: 0,
                end: 8,
                len: 7
            })
        );
        let err = at.set_attributes(1..3, attrs).unwrap_err();
        assert_eq!(
            err,
            AttributedTextError::NotOnCharBoundary {
                start: 1,
                end: 3,
                index: 1
            }
        );
        assert!(err.to_string().contains("not on a char boundary"));
    }

    #[test]
    fn concatenation_keeps_styles() {
        let left = AttributedText::with_attributes("foo", TextAttributes::new().kern(2.0));
        let right = AttributedText::new("bar");
        let joined = left + right;
        assert_eq!(joined.as_str(), "foobar");
        assert_eq!(joined.attributes_at(1).and_then(|a| a.kern), Some(2.0));
        assert_eq!(joined.attributes_at(4).and_then(|a| a.kern), None);

        let mut built = AttributedText::default();
        built
            .push_str("a", TextAttributes::new())
            .push_str("b", TextAttributes::new());
        assert_eq!(built.runs().len(), 1);
        assert_eq!(built.attributes_at(2), None);
    }

    #[test]
    fn add_all_over_every_run() {
        let mut at = AttributedText::new("xy");
        at.set_attributes(0..1, TextAttributes::new().kern(1.0)).unwrap();
        at.add_all(&TextAttributes::new().obliqueness(0.1));
        assert!(at.runs().all(|(_, a)| a.obliqueness == Some(0.1)));
        at.set_all(TextAttributes::new());
        assert_eq!(at.runs().len(), 1);
    }
}
