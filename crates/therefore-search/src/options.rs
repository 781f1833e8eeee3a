//! Matching and ranking options.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use therefore_conf::{FieldWeights, SearchSettings};

/// Indexed post field, in descending default weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
	Title,
	Summary,
	SearchContent,
	Tags,
	Series,
}

impl SearchField {
	pub const ALL: [SearchField; 5] = [
		Self::Title,
		Self::Summary,
		Self::SearchContent,
		Self::Tags,
		Self::Series,
	];

	/// Key as it appears in post JSON.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Summary => "summary",
			Self::SearchContent => "searchContent",
			Self::Tags => "tags",
			Self::Series => "series",
		}
	}
}

impl fmt::Display for SearchField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Fuzzy matching options.
///
/// # Examples
///
/// ```
/// use therefore_search::SearchOptions;
///
/// let options = SearchOptions::new().threshold(0.4).distance(100);
/// assert_eq!(options.get_threshold(), 0.4);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
	pub(crate) threshold: f64,
	pub(crate) distance: u32,
	pub(crate) location: usize,
	pub(crate) min_match_char_length: usize,
	pub(crate) min_query_length: usize,
	pub(crate) ignore_location: bool,
	pub(crate) find_all_matches: bool,
	pub(crate) limit: usize,
	pub(crate) snippet_radius: usize,
	pub(crate) weights: FieldWeights,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self::from(&SearchSettings::default())
	}
}

impl From<&SearchSettings> for SearchOptions {
	fn from(settings: &SearchSettings) -> Self {
		Self {
			threshold: settings.threshold,
			distance: settings.distance,
			location: settings.location,
			min_match_char_length: settings.min_match_char_length,
			min_query_length: settings.min_query_length,
			ignore_location: settings.ignore_location,
			find_all_matches: settings.find_all_matches,
			limit: settings.limit,
			snippet_radius: settings.snippet_radius,
			weights: settings.weights,
		}
	}
}

impl SearchOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Match strictness, clamped to `[0, 1]`.
	pub fn threshold(mut self, threshold: f64) -> Self {
		self.threshold = threshold.clamp(0.0, 1.0);
		self
	}

	pub fn distance(mut self, distance: u32) -> Self {
		self.distance = distance;
		self
	}

	pub fn location(mut self, location: usize) -> Self {
		self.location = location;
		self
	}

	pub fn min_match_char_length(mut self, length: usize) -> Self {
		self.min_match_char_length = length;
		self
	}

	pub fn min_query_length(mut self, length: usize) -> Self {
		self.min_query_length = length;
		self
	}

	pub fn ignore_location(mut self, ignore: bool) -> Self {
		self.ignore_location = ignore;
		self
	}

	pub fn find_all_matches(mut self, all: bool) -> Self {
		self.find_all_matches = all;
		self
	}

	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	pub fn snippet_radius(mut self, radius: usize) -> Self {
		self.snippet_radius = radius;
		self
	}

	pub fn weights(mut self, weights: FieldWeights) -> Self {
		self.weights = weights;
		self
	}

	pub fn get_threshold(&self) -> f64 {
		self.threshold
	}

	pub fn get_distance(&self) -> u32 {
		self.distance
	}

	pub fn get_min_query_length(&self) -> usize {
		self.min_query_length
	}

	pub fn get_limit(&self) -> usize {
		self.limit
	}

	pub fn get_snippet_radius(&self) -> usize {
		self.snippet_radius
	}

	/// Raw (unnormalised) weight of `field`.
	pub fn weight(&self, field: SearchField) -> f64 {
		match field {
			SearchField::Title => self.weights.title,
			SearchField::Summary => self.weights.summary,
			SearchField::SearchContent => self.weights.content,
			SearchField::Tags => self.weights.tags,
			SearchField::Series => self.weights.series,
		}
	}

	/// Weights scaled to sum to 1, in [`SearchField::ALL`] order.
	pub fn normalized_weights(&self) -> [(SearchField, f64); 5] {
		let total: f64 = SearchField::ALL.iter().map(|f| self.weight(*f)).sum();
		SearchField::ALL.map(|field| (field, self.weight(field) / total))
	}

	pub fn validate(&self) -> Result<(), SearchError> {
		if !(0.0..=1.0).contains(&self.threshold) {
			return Err(SearchError::invalid("threshold", format!("{} is outside [0, 1]", self.threshold)));
		}
		if self.limit == 0 {
			return Err(SearchError::invalid("limit", "must be at least 1"));
		}
		if self.min_query_length == 0 {
			return Err(SearchError::invalid("min_query_length", "must be at least 1"));
		}
		for field in SearchField::ALL {
			let weight = self.weight(field);
			if !(weight.is_finite() && weight > 0.0) {
				return Err(SearchError::invalid("weights", format!("{} weight must be positive, got {}", field, weight)));
			}
		}
		Ok(())
	}
}
