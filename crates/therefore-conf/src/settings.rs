//! Typed settings for search and hydration.

use crate::builder::{BuildError, GetError, SettingsBuilder};
use crate::sources::{DefaultSource, EnvSource, SourceError, TomlFileSource};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative weight of each indexed post field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
	pub title: f64,
	pub summary: f64,
	pub content: f64,
	pub tags: f64,
	pub series: f64,
}

impl Default for FieldWeights {
	fn default() -> Self {
		Self {
			title: 0.40,
			summary: 0.25,
			content: 0.15,
			tags: 0.12,
			series: 0.08,
		}
	}
}

impl FieldWeights {
	fn entries(&self) -> [(&'static str, f64); 5] {
		[
			("title", self.title),
			("summary", self.summary),
			("content", self.content),
			("tags", self.tags),
			("series", self.series),
		]
	}
}

/// Fuzzy search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
	/// Match strictness; 0.0 requires a perfect match, 1.0 matches anything.
	pub threshold: f64,
	/// How far from `location` a match may drift before it is fully penalised.
	pub distance: u32,
	/// Expected position of a match within a field.
	pub location: usize,
	/// Shortest run of matched characters reported as a span.
	pub min_match_char_length: usize,
	/// Queries shorter than this (in characters) return nothing.
	pub min_query_length: usize,
	pub ignore_location: bool,
	pub find_all_matches: bool,
	/// Maximum number of post results.
	pub limit: usize,
	/// Characters of context on each side of a snippet match.
	pub snippet_radius: usize,
	pub weights: FieldWeights,
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			threshold: 0.3,
			distance: 50,
			location: 0,
			min_match_char_length: 2,
			min_query_length: 2,
			ignore_location: false,
			find_all_matches: false,
			limit: 8,
			snippet_radius: 60,
			weights: FieldWeights::default(),
		}
	}
}

/// Longest accepted delay between timeline reveals.
pub const MAX_TIMELINE_STAGGER_MS: u64 = 60_000;

/// Widget behaviour tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrationSettings {
	/// Delay between successive timeline event reveals.
	pub timeline_stagger_ms: u64,
	/// Clearance a popover needs below its trigger to open downwards.
	pub popover_clearance_px: f64,
	/// Gap between a popover and its trigger.
	pub popover_offset_px: f64,
	/// Passage lookup page used by scripture comparison links.
	pub scripture_link_base: String,
}

impl Default for HydrationSettings {
	fn default() -> Self {
		Self {
			timeline_stagger_ms: 100,
			popover_clearance_px: 8.0,
			popover_offset_px: 4.0,
			scripture_link_base: "https://www.biblegateway.com/passage/".to_string(),
		}
	}
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub search: SearchSettings,
	pub hydration: HydrationSettings,
}

/// Validation error
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Multiple validation errors: {0:?}")]
	Multiple(Vec<ValidationError>),
}

fn invalid(key: impl Into<String>, message: impl Into<String>) -> ValidationError {
	ValidationError::InvalidValue {
		key: key.into(),
		message: message.into(),
	}
}

/// Errors from [`Settings::load`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error(transparent)]
	Source(#[from] SourceError),

	#[error(transparent)]
	Build(#[from] BuildError),

	#[error(transparent)]
	Get(#[from] GetError),

	#[error(transparent)]
	Validation(#[from] ValidationError),
}

impl SearchSettings {
	pub fn validate(&self) -> Result<(), ValidationError> {
		let mut errors = Vec::new();

		if !(0.0..=1.0).contains(&self.threshold) {
			errors.push(invalid("search.threshold", "must be within [0, 1]"));
		}
		if self.limit == 0 {
			errors.push(invalid("search.limit", "must be at least 1"));
		}
		if self.min_query_length == 0 {
			errors.push(invalid("search.min_query_length", "must be at least 1"));
		}
		if self.min_match_char_length == 0 {
			errors.push(invalid("search.min_match_char_length", "must be at least 1"));
		}
		for (field, weight) in self.weights.entries() {
			if !weight.is_finite() || weight <= 0.0 {
				errors.push(invalid(format!("search.weights.{}", field), "must be positive"));
			}
		}

		collapse(errors)
	}
}

impl HydrationSettings {
	pub fn validate(&self) -> Result<(), ValidationError> {
		let mut errors = Vec::new();

		if self.timeline_stagger_ms > MAX_TIMELINE_STAGGER_MS {
			errors.push(invalid(
				"hydration.timeline_stagger_ms",
				format!("must be at most {}", MAX_TIMELINE_STAGGER_MS),
			));
		}
		if !self.popover_clearance_px.is_finite() || self.popover_clearance_px < 0.0 {
			errors.push(invalid("hydration.popover_clearance_px", "must be non-negative"));
		}
		if !self.popover_offset_px.is_finite() || self.popover_offset_px < 0.0 {
			errors.push(invalid("hydration.popover_offset_px", "must be non-negative"));
		}
		if self.scripture_link_base.trim().is_empty() {
			errors.push(invalid("hydration.scripture_link_base", "must not be empty"));
		}

		collapse(errors)
	}
}

fn collapse(mut errors: Vec<ValidationError>) -> Result<(), ValidationError> {
	match errors.len() {
		0 => Ok(()),
		1 => Err(errors.remove(0)),
		_ => Err(ValidationError::Multiple(errors)),
	}
}

impl Settings {
	/// Loads defaults, then the optional TOML file, then `THEREFORE_*`
	/// environment variables, and validates the result.
	///
	/// # Examples
	///
	/// ```no_run
	/// use std::path::Path;
	/// use therefore_conf::Settings;
	///
	/// let settings = Settings::load(Some(Path::new("therefore.toml"))).unwrap();
	/// assert!(settings.search.limit >= 1);
	/// ```
	pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
		let mut builder =
			SettingsBuilder::new().add_source(DefaultSource::from_serializable(&Settings::default())?);
		if let Some(path) = config_file {
			builder = builder.add_source(TomlFileSource::new(path));
		}
		builder = builder.add_source(EnvSource::new());

		let settings: Settings = builder.build()?.into_typed()?;
		settings.validate()?;
		tracing::info!(
			threshold = settings.search.threshold,
			limit = settings.search.limit,
			"settings loaded"
		);
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), ValidationError> {
		let errors: Vec<ValidationError> = [self.search.validate(), self.hydration.validate()]
			.into_iter()
			.filter_map(Result::err)
			.flat_map(|e| match e {
				ValidationError::Multiple(inner) => inner,
				other => vec![other],
			})
			.collect();
		collapse(errors)
	}
}
