//! Approximate string matching with the bitap (shift-or) algorithm.
//!
//! Scoring follows the Fuse.js conventions: a score of `0.0` is a perfect
//! match at the expected location and `1.0` is a complete mismatch. The
//! score of a candidate combines its error rate with its distance from the
//! expected location:
//!
//! ```text
//! score = errors / pattern_len + |expected - location| / distance
//! ```
//!
//! Patterns longer than [`MAX_BITS`] characters are split into chunks that
//! are searched independently and averaged.

use crate::highlight::Span;
use crate::options::SearchOptions;
use std::collections::HashMap;

/// Longest pattern a single bitap pass can handle.
pub const MAX_BITS: usize = 32;

/// Lowercases `text` one character at a time.
///
/// Characters whose lowercase form is more than one character are kept
/// unchanged, so indices into the result are indices into `text`.
pub fn fold_case(text: &str) -> Vec<char> {
	text.chars()
		.map(|c| {
			let mut lower = c.to_lowercase();
			match (lower.next(), lower.next()) {
				(Some(l), None) => l,
				_ => c,
			}
		})
		.collect()
}

/// Outcome of matching a pattern against one text.
#[derive(Debug, Clone, PartialEq)]
pub struct BitapMatch {
	pub is_match: bool,
	pub score: f64,
	pub spans: Vec<Span>,
}

impl BitapMatch {
	fn miss() -> Self {
		Self {
			is_match: false,
			score: 1.0,
			spans: Vec::new(),
		}
	}
}

#[derive(Debug, Clone)]
struct Chunk {
	pattern: Vec<char>,
	alphabet: HashMap<char, u32>,
	start_index: usize,
}

impl Chunk {
	fn new(pattern: &[char], start_index: usize) -> Self {
		let len = pattern.len();
		let mut alphabet: HashMap<char, u32> = HashMap::new();
		for (i, c) in pattern.iter().enumerate() {
			*alphabet.entry(*c).or_insert(0) |= 1 << (len - i - 1);
		}
		Self {
			pattern: pattern.to_vec(),
			alphabet,
			start_index,
		}
	}
}

/// A compiled, case-folded search pattern.
#[derive(Debug, Clone)]
pub struct BitapPattern {
	pattern: Vec<char>,
	chunks: Vec<Chunk>,
}

impl BitapPattern {
	/// Compiles `query`. Returns `None` for an empty query.
	pub fn new(query: &str) -> Option<Self> {
		let pattern = fold_case(query);
		if pattern.is_empty() {
			return None;
		}

		let len = pattern.len();
		let mut chunks = Vec::new();
		if len > MAX_BITS {
			let remainder = len % MAX_BITS;
			let end = len - remainder;
			let mut i = 0;
			while i < end {
				chunks.push(Chunk::new(&pattern[i..i + MAX_BITS], i));
				i += MAX_BITS;
			}
			if remainder > 0 {
				let start = len - MAX_BITS;
				chunks.push(Chunk::new(&pattern[start..], start));
			}
		} else {
			chunks.push(Chunk::new(&pattern, 0));
		}

		Some(Self { pattern, chunks })
	}

	pub fn len(&self) -> usize {
		self.pattern.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pattern.is_empty()
	}

	/// Matches against `text`, which must already be case-folded with
	/// [`fold_case`].
	pub fn search_in(&self, text: &[char], options: &SearchOptions) -> BitapMatch {
		if text == self.pattern.as_slice() {
			return BitapMatch {
				is_match: true,
				score: 0.0,
				spans: vec![Span::new(0, text.len())],
			};
		}

		let mut spans = Vec::new();
		let mut total = 0.0;
		let mut matched = false;
		for chunk in &self.chunks {
			let result = search_chunk(text, chunk, options.location + chunk.start_index, options);
			total += result.score;
			if result.is_match {
				matched = true;
				spans.extend(result.spans);
			}
		}

		if !matched {
			return BitapMatch::miss();
		}
		BitapMatch {
			is_match: true,
			score: total / self.chunks.len() as f64,
			spans,
		}
	}
}

fn compute_score(pattern_len: usize, errors: usize, current: usize, expected: usize, options: &SearchOptions) -> f64 {
	let accuracy = errors as f64 / pattern_len as f64;
	if options.ignore_location {
		return accuracy;
	}
	let proximity = expected.abs_diff(current);
	if options.distance == 0 {
		return if proximity > 0 { 1.0 } else { accuracy };
	}
	accuracy + proximity as f64 / f64::from(options.distance)
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
	if pattern.len() > text.len() || from > text.len() - pattern.len() {
		return None;
	}
	text[from..]
		.windows(pattern.len())
		.position(|window| window == pattern)
		.map(|offset| offset + from)
}

fn search_chunk(text: &[char], chunk: &Chunk, location: usize, options: &SearchOptions) -> BitapMatch {
	let pattern = &chunk.pattern;
	let pattern_len = pattern.len();
	let text_len = text.len();
	let expected = location.min(text_len);
	let score_at = |errors: usize, current: usize| compute_score(pattern_len, errors, current, expected, options);

	let mut threshold = options.threshold;
	let mut match_mask = vec![false; text_len];

	// Exact occurrences tighten the threshold before the fuzzy pass.
	let mut from = expected;
	while let Some(index) = find_from(text, pattern, from) {
		threshold = threshold.min(score_at(0, index));
		from = index + pattern_len;
		match_mask[index..index + pattern_len].fill(true);
	}

	let mut best_location: Option<usize> = None;
	let mut final_score = 1.0;
	let mut bin_max = pattern_len + text_len;
	let mask: u32 = 1 << (pattern_len - 1);
	let mut last_bits: Vec<u32> = Vec::new();

	for i in 0..pattern_len {
		// Widest window around the expected location still under threshold.
		let mut bin_min = 0;
		let mut bin_mid = bin_max;
		while bin_min < bin_mid {
			if score_at(i, expected + bin_mid) <= threshold {
				bin_min = bin_mid;
			} else {
				bin_max = bin_mid;
			}
			bin_mid = (bin_max - bin_min) / 2 + bin_min;
		}
		bin_max = bin_mid;

		let mut start = (expected + 1).saturating_sub(bin_mid).max(1);
		let finish = if options.find_all_matches {
			text_len
		} else {
			(expected + bin_mid).min(text_len) + pattern_len
		};

		let mut bits = vec![0u32; finish + 2];
		bits[finish + 1] = (1u32 << i).wrapping_sub(1);

		let mut j = finish;
		while j >= start {
			let current = j - 1;
			let char_match = text
				.get(current)
				.and_then(|c| chunk.alphabet.get(c))
				.copied()
				.unwrap_or(0);
			if current < text_len {
				match_mask[current] = char_match != 0;
			}

			bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
			if i > 0 {
				let last_next = last_bits.get(j + 1).copied().unwrap_or(0);
				let last_here = last_bits.get(j).copied().unwrap_or(0);
				bits[j] |= ((last_next | last_here) << 1) | 1 | last_next;
			}

			if bits[j] & mask != 0 {
				final_score = score_at(i, current);
				if final_score <= threshold {
					threshold = final_score;
					best_location = Some(current);
					if current <= expected {
						break;
					}
					start = (2 * expected).saturating_sub(current).max(1);
				}
			}
			j -= 1;
		}

		// One more error cannot beat the best score found so far.
		if score_at(i + 1, expected) > threshold {
			break;
		}
		last_bits = bits;
	}

	let spans = mask_to_spans(&match_mask, options.min_match_char_length);
	if best_location.is_none() || spans.is_empty() {
		return BitapMatch {
			is_match: false,
			score: f64::max(0.001, final_score),
			spans: Vec::new(),
		};
	}
	BitapMatch {
		is_match: true,
		score: f64::max(0.001, final_score),
		spans,
	}
}

/// Runs of set mask entries at least `min_len` long.
fn mask_to_spans(mask: &[bool], min_len: usize) -> Vec<Span> {
	let mut spans = Vec::new();
	let mut start: Option<usize> = None;
	for (i, hit) in mask.iter().enumerate() {
		match (hit, start) {
			(true, None) => start = Some(i),
			(false, Some(s)) => {
				if i - s >= min_len {
					spans.push(Span::new(s, i));
				}
				start = None;
			}
			_ => {}
		}
	}
	if let Some(s) = start
		&& mask.len() - s >= min_len
	{
		spans.push(Span::new(s, mask.len()));
	}
	spans
}
