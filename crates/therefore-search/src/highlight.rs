//! Match spans and highlight segmentation.

use serde::{Deserialize, Serialize};

/// Half-open range of character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	pub fn len(&self) -> usize {
		self.end.saturating_sub(self.start)
	}

	pub fn is_empty(&self) -> bool {
		self.end <= self.start
	}

	/// The substring of `text` this span covers, by characters.
	pub fn slice<'a>(&self, text: &'a str) -> &'a str {
		let start = byte_offset(text, self.start);
		let end = byte_offset(text, self.end.max(self.start));
		&text[start..end]
	}
}

pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
	text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

/// A run of text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
	pub text: String,
	pub highlighted: bool,
}

impl Segment {
	pub fn plain(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			highlighted: false,
		}
	}

	pub fn marked(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			highlighted: true,
		}
	}
}

/// Sorts, clamps and merges overlapping or touching spans.
pub fn normalize_spans(spans: &[Span], len: usize) -> Vec<Span> {
	let mut sorted: Vec<Span> = spans
		.iter()
		.map(|s| Span::new(s.start.min(len), s.end.min(len)))
		.filter(|s| !s.is_empty())
		.collect();
	sorted.sort();

	let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
	for span in sorted {
		match merged.last_mut() {
			Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
			_ => merged.push(span),
		}
	}
	merged
}

/// Splits `text` into alternating plain and highlighted segments.
///
/// Concatenating the segment texts always yields `text` again.
///
/// ```
/// use therefore_search::{Segment, Span, highlight};
///
/// let segments = highlight("On Free Will", &[Span::new(3, 7)]);
/// assert_eq!(
///     segments,
///     vec![Segment::plain("On "), Segment::marked("Free"), Segment::plain(" Will")]
/// );
/// ```
pub fn highlight(text: &str, spans: &[Span]) -> Vec<Segment> {
	let len = text.chars().count();
	let mut segments = Vec::new();
	let mut cursor = 0;
	for span in normalize_spans(spans, len) {
		if span.start > cursor {
			segments.push(Segment::plain(Span::new(cursor, span.start).slice(text)));
		}
		segments.push(Segment::marked(span.slice(text)));
		cursor = span.end;
	}
	if cursor < len || segments.is_empty() {
		segments.push(Segment::plain(Span::new(cursor, len).slice(text)));
	}
	segments
}
