//! Context windows around body-text matches.

use crate::highlight::{Span, normalize_spans};
use serde::{Deserialize, Serialize};

/// A window of body text around the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
	pub text: String,
	/// Text was cut before the window.
	pub leading_ellipsis: bool,
	/// Text was cut after the window.
	pub trailing_ellipsis: bool,
	/// Match spans relative to `text`.
	pub spans: Vec<Span>,
}

/// Extracts up to `radius` characters either side of the first span.
///
/// Returns `None` when there are no usable spans.
pub fn extract_snippet(text: &str, spans: &[Span], radius: usize) -> Option<Snippet> {
	let len = text.chars().count();
	let spans = normalize_spans(spans, len);
	let first = spans.first()?;

	let start = first.start.saturating_sub(radius);
	let end = (first.end + radius).min(len);
	let window = Span::new(start, end);

	let local = spans
		.iter()
		.filter(|s| s.start < end && s.end > start)
		.map(|s| Span::new(s.start.max(start) - start, s.end.min(end) - start))
		.collect();

	Some(Snippet {
		text: window.slice(text).to_string(),
		leading_ellipsis: start > 0,
		trailing_ellipsis: end < len,
		spans: local,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_window_is_centred_on_first_match() {
		let text = "aaaaaaaaaa grace bbbbbbbbbb";
		let snippet = extract_snippet(text, &[Span::new(11, 16)], 3).unwrap();
		assert_eq!(snippet.text, "aa grace bb");
		assert!(snippet.leading_ellipsis);
		assert!(snippet.trailing_ellipsis);
		assert_eq!(snippet.spans, vec![Span::new(3, 8)]);
	}

	#[rstest]
	fn test_window_bounded_by_text() {
		let snippet = extract_snippet("grace abounds", &[Span::new(0, 5)], 60).unwrap();
		assert_eq!(snippet.text, "grace abounds");
		assert!(!snippet.leading_ellipsis);
		assert!(!snippet.trailing_ellipsis);
	}

	#[rstest]
	fn test_later_spans_are_clipped_to_window() {
		let snippet = extract_snippet("free and freer still", &[Span::new(9, 14), Span::new(0, 4)], 2).unwrap();
		assert_eq!(snippet.text, "free a");
		assert_eq!(snippet.spans, vec![Span::new(0, 4)]);
	}

	#[rstest]
	#[case::no_spans(&[])]
	#[case::out_of_range(&[Span::new(40, 45)])]
	fn test_none_without_spans(#[case] spans: &[Span]) {
		assert_eq!(extract_snippet("short", spans, 10), None);
	}
}
