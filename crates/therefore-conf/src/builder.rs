//! Settings builder merging configuration sources by priority.

use crate::sources::{ConfigSource, SourceError};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error raised while loading or merging sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error("failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},
}

/// Error raised when reading a merged value
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GetError {
	#[error("key not found: {0}")]
	NotFound(String),

	#[error("cannot deserialize '{key}': {error}")]
	Deserialize {
		key: String,
		#[source]
		error: serde_json::Error,
	},
}

/// Collects sources and deep-merges them.
///
/// Lower-priority sources are applied first; objects are merged key by key,
/// any other value replaces what was there. Sources of equal priority apply in
/// the order they were added.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a configuration source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Add an already boxed source (e.g. from [`auto_source`](crate::sources::auto_source))
	pub fn add_boxed_source(mut self, source: Box<dyn ConfigSource>) -> Self {
		self.sources.push(source);
		self
	}

	/// Loads every source and merges the results.
	pub fn build(mut self) -> Result<MergedSettings, BuildError> {
		self.sources.sort_by_key(|s| s.priority());

		let mut merged = serde_json::Map::new();
		for source in &self.sources {
			let values = source.load().map_err(|error| BuildError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"merging configuration source"
			);
			for (key, value) in values {
				match merged.get_mut(&key) {
					Some(existing) => deep_merge(existing, value),
					None => {
						merged.insert(key, value);
					}
				}
			}
		}

		Ok(MergedSettings {
			values: merged.into_iter().collect(),
		})
	}
}

fn deep_merge(target: &mut Value, overlay: Value) {
	match (target, overlay) {
		(Value::Object(target), Value::Object(overlay)) => {
			for (key, value) in overlay {
				match target.get_mut(&key) {
					Some(existing) => deep_merge(existing, value),
					None => {
						target.insert(key, value);
					}
				}
			}
		}
		(target, overlay) => *target = overlay,
	}
}

/// Result of merging all sources.
#[derive(Debug, Clone, Default)]
pub struct MergedSettings {
	values: IndexMap<String, Value>,
}

impl MergedSettings {
	/// Looks up a dotted key path such as `search.threshold`.
	pub fn get_value(&self, key: &str) -> Option<&Value> {
		let mut parts = key.split('.');
		let mut current = self.values.get(parts.next()?)?;
		for part in parts {
			current = current.get(part)?;
		}
		Some(current)
	}

	/// Deserializes the value at a dotted key path.
	pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, GetError> {
		let value = self
			.get_value(key)
			.ok_or_else(|| GetError::NotFound(key.to_string()))?;
		serde_json::from_value(value.clone()).map_err(|error| GetError::Deserialize {
			key: key.to_string(),
			error,
		})
	}

	/// Deserializes the whole merged tree.
	pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, GetError> {
		let object: serde_json::Map<String, Value> = self.values.into_iter().collect();
		serde_json::from_value(Value::Object(object)).map_err(|error| GetError::Deserialize {
			key: "<root>".to_string(),
			error,
		})
	}

	pub fn as_map(&self) -> &IndexMap<String, Value> {
		&self.values
	}
}
