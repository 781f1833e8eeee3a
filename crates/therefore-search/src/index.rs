//! Weighted fuzzy index over posts.

use crate::bitap::{BitapPattern, fold_case};
use crate::error::SearchError;
use crate::highlight::Span;
use crate::options::{SearchField, SearchOptions};
use crate::post::{PostListItem, PostRecord};
use serde::Serialize;
use tracing::instrument;

/// Field-length norm: `1 / sqrt(tokens)`, rounded to three decimals.
pub fn field_norm(value: &str) -> f64 {
	let tokens = value.split(' ').filter(|t| !t.is_empty()).count().max(1);
	let norm = 1.0 / (tokens as f64).sqrt();
	(norm * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone)]
struct IndexedValue {
	field: SearchField,
	array_index: Option<usize>,
	value: String,
	folded: Vec<char>,
	norm: f64,
}

impl IndexedValue {
	fn new(field: SearchField, array_index: Option<usize>, value: &str) -> Option<Self> {
		if value.trim().is_empty() {
			return None;
		}
		Some(Self {
			field,
			array_index,
			value: value.to_string(),
			folded: fold_case(value),
			norm: field_norm(value),
		})
	}
}

#[derive(Debug, Clone)]
struct IndexedPost {
	record: PostRecord,
	values: Vec<IndexedValue>,
}

impl IndexedPost {
	fn new(post: &PostListItem) -> Self {
		let record = PostRecord::from(post);
		let mut values = Vec::new();
		values.extend(IndexedValue::new(SearchField::Title, None, &record.title));
		if let Some(summary) = &record.summary {
			values.extend(IndexedValue::new(SearchField::Summary, None, summary));
		}
		if let Some(content) = &record.search_content {
			values.extend(IndexedValue::new(SearchField::SearchContent, None, content));
		}
		for (i, tag) in record.tags.iter().enumerate() {
			values.extend(IndexedValue::new(SearchField::Tags, Some(i), tag));
		}
		if let Some(series) = &record.series {
			values.extend(IndexedValue::new(SearchField::Series, None, series));
		}
		Self { record, values }
	}
}

/// One matched field value of a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
	pub field: SearchField,
	pub value: String,
	/// Position within `tags` for tag matches.
	pub array_index: Option<usize>,
	pub score: f64,
	pub spans: Vec<Span>,
}

/// A ranked post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
	/// Position of the post in the indexed list.
	pub ref_index: usize,
	pub slug: String,
	/// Lower is better; `0.0` is a perfect match.
	pub score: f64,
	pub matches: Vec<FieldMatch>,
}

impl SearchResult {
	/// First match on `field`, if any.
	pub fn field_match(&self, field: SearchField) -> Option<&FieldMatch> {
		self.matches.iter().find(|m| m.field == field)
	}
}

/// Fuzzy index over a fixed list of posts.
///
/// # Examples
///
/// ```
/// use therefore_search::{PostListItem, SearchIndex, SearchOptions};
///
/// let posts = vec![
///     PostListItem::new("a", "Grace and Freedom"),
///     PostListItem::new("b", "On Free Will"),
/// ];
/// let index = SearchIndex::build(&posts, SearchOptions::default()).unwrap();
///
/// let results = index.search("free", 8);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].slug, "b");
/// assert!(index.search("f", 8).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SearchIndex {
	options: SearchOptions,
	weights: [(SearchField, f64); 5],
	posts: Vec<IndexedPost>,
}

impl SearchIndex {
	/// Indexes `posts` in order.
	#[instrument(skip_all, fields(posts = posts.len()))]
	pub fn build(posts: &[PostListItem], options: SearchOptions) -> Result<Self, SearchError> {
		options.validate()?;
		let weights = options.normalized_weights();
		let posts: Vec<IndexedPost> = posts.iter().map(IndexedPost::new).collect();
		tracing::debug!(values = posts.iter().map(|p| p.values.len()).sum::<usize>(), "search index built");
		Ok(Self { options, weights, posts })
	}

	pub fn options(&self) -> &SearchOptions {
		&self.options
	}

	pub fn len(&self) -> usize {
		self.posts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.posts.is_empty()
	}

	/// Indexed snapshot of the post at `ref_index`.
	pub fn record(&self, ref_index: usize) -> Option<&PostRecord> {
		self.posts.get(ref_index).map(|p| &p.record)
	}

	fn weight(&self, field: SearchField) -> f64 {
		self.weights
			.iter()
			.find(|(f, _)| *f == field)
			.map_or(0.0, |(_, w)| *w)
	}

	/// Ranks posts against `query`, best first, at most `limit` of them.
	///
	/// Queries shorter than the minimum query length (in characters)
	/// return nothing.
	#[instrument(skip(self), fields(results = tracing::field::Empty))]
	pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
		if query.chars().count() < self.options.min_query_length {
			return Vec::new();
		}
		let Some(pattern) = BitapPattern::new(query) else {
			return Vec::new();
		};

		let mut results: Vec<SearchResult> = self
			.posts
			.iter()
			.enumerate()
			.filter_map(|(ref_index, post)| self.score_post(&pattern, ref_index, post))
			.collect();

		results.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.ref_index.cmp(&b.ref_index)));
		results.truncate(limit);
		tracing::Span::current().record("results", results.len());
		results
	}

	fn score_post(&self, pattern: &BitapPattern, ref_index: usize, post: &IndexedPost) -> Option<SearchResult> {
		let mut score = 1.0;
		let mut matches = Vec::new();
		for value in &post.values {
			let found = pattern.search_in(&value.folded, &self.options);
			if !found.is_match {
				continue;
			}
			let base = if found.score == 0.0 { f64::EPSILON } else { found.score };
			score *= base.powf(self.weight(value.field) * value.norm);
			matches.push(FieldMatch {
				field: value.field,
				value: value.value.clone(),
				array_index: value.array_index,
				score: found.score,
				spans: found.spans,
			});
		}

		if matches.is_empty() {
			return None;
		}
		Some(SearchResult {
			ref_index,
			slug: post.record.slug.clone(),
			score,
			matches,
		})
	}
}
