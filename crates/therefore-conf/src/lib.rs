//! # Therefore Configuration
//!
//! Layered settings for the hydration widgets and the search ranker.
//!
//! Sources are merged by priority: built-in defaults (0), an optional TOML
//! file (50) and `THEREFORE_*` environment variables (100). Nested keys are
//! written with `__` in variable names, so `THEREFORE_SEARCH__LIMIT=5`
//! overrides `search.limit`.
//!
//! ## Module Organization
//!
//! - [`sources`]: configuration sources
//! - [`builder`]: priority merge of sources
//! - [`settings`]: typed settings and validation

pub mod builder;
pub mod settings;
pub mod sources;

pub use builder::{BuildError, GetError, MergedSettings, SettingsBuilder};
pub use settings::{
	ConfigError, FieldWeights, HydrationSettings, MAX_TIMELINE_STAGGER_MS, SearchSettings, Settings,
	ValidationError,
};
pub use sources::{
	ConfigSource, DefaultSource, EnvSource, JsonFileSource, SourceError, TomlFileSource,
};
