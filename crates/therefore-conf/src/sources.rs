//! Configuration sources for the layered settings system
//!
//! Sources are merged in priority order
//! (environment variables > config files > defaults).

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Separator between nesting levels in environment variable names
/// (`THEREFORE_SEARCH__THRESHOLD` → `search.threshold`).
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "THEREFORE_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid source: {0}")]
	InvalidSource(String),
}

/// Environment variable configuration source
///
/// Only variables starting with the prefix are read. The remainder of the
/// name is lower-cased and split on [`ENV_NESTING_SEPARATOR`] into a nested
/// key path.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading `THEREFORE_*` variables
	///
	/// # Examples
	///
	/// ```
	/// use therefore_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new();
	/// assert_eq!(source.priority(), 100);
	/// ```
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_ENV_PREFIX.to_string(),
		}
	}

	/// Set the prefix filter for environment variables
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Builds the nested map for an explicit list of variables.
	pub(crate) fn load_from<I>(&self, vars: I) -> IndexMap<String, Value>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut root = Map::new();

		for (key, value) in vars {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let path: Vec<String> = clean_key
				.to_lowercase()
				.split(ENV_NESTING_SEPARATOR)
				.map(str::to_string)
				.collect();
			if path.iter().any(String::is_empty) {
				tracing::warn!(variable = %key, "ignoring environment variable with empty key segment");
				continue;
			}
			insert_path(&mut root, &path, parse_env_value(&value));
		}

		root.into_iter().collect()
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.load_from(std::env::vars()))
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

fn parse_env_value(raw: &str) -> Value {
	let trimmed = raw.trim();
	if let Ok(num) = trimmed.parse::<i64>() {
		return Value::Number(num.into());
	}
	if let Ok(num) = trimmed.parse::<f64>()
		&& let Some(num) = serde_json::Number::from_f64(num)
	{
		return Value::Number(num);
	}
	match trimmed.to_lowercase().as_str() {
		"true" | "yes" | "on" => Value::Bool(true),
		"false" | "no" | "off" => Value::Bool(false),
		_ => Value::String(raw.to_string()),
	}
}

fn insert_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
	let Some((head, rest)) = path.split_first() else {
		return;
	};
	if rest.is_empty() {
		map.insert(head.clone(), value);
		return;
	}
	let entry = map
		.entry(head.clone())
		.or_insert_with(|| Value::Object(Map::new()));
	if !entry.is_object() {
		*entry = Value::Object(Map::new());
	}
	if let Value::Object(inner) = entry {
		insert_path(inner, rest, value);
	}
}

/// TOML file configuration source
///
/// A missing file yields an empty map.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use therefore_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("therefore.toml");
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;

		// Convert TOML value to JSON value
		let json_value = serde_json::to_value(&toml_value)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// JSON file configuration source
///
/// A missing file yields an empty map.
pub struct JsonFileSource {
	path: PathBuf,
}

impl JsonFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for JsonFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let json_value: Value = serde_json::from_str(&content)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected object at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("JSON file: {}", self.path.display())
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create a new default values configuration source
	///
	/// # Examples
	///
	/// ```
	/// use therefore_conf::sources::DefaultSource;
	/// use serde_json::json;
	///
	/// let source = DefaultSource::new()
	///     .with_value("search", json!({ "limit": 8 }));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value for a top-level key
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}

	/// Seeds the source from any serializable value whose root is an object.
	pub fn from_serializable<T: serde::Serialize>(value: &T) -> Result<Self, SourceError> {
		match serde_json::to_value(value)? {
			Value::Object(map) => Ok(Self {
				values: map.into_iter().collect(),
			}),
			_ => Err(SourceError::Parse(
				"default values must serialize to an object".to_string(),
			)),
		}
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0 // Lowest priority
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// Auto-detect configuration source based on file extension
///
/// # Examples
///
/// ```
/// use therefore_conf::sources::auto_source;
///
/// let source = auto_source("therefore.toml").unwrap();
/// assert!(auto_source("therefore.ini").is_err());
/// ```
pub fn auto_source(path: impl AsRef<Path>) -> Result<Box<dyn ConfigSource>, SourceError> {
	let path = path.as_ref();
	let ext = path
		.extension()
		.and_then(|e| e.to_str())
		.ok_or_else(|| SourceError::InvalidSource("No file extension".to_string()))?;

	match ext {
		"toml" => Ok(Box::new(TomlFileSource::new(path))),
		"json" => Ok(Box::new(JsonFileSource::new(path))),
		_ => Err(SourceError::InvalidSource(format!(
			"Unsupported file extension: {}",
			ext
		))),
	}
}
