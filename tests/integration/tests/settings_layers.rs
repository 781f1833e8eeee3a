//! Settings integration tests
//!
//! Layered configuration flowing into the hydration runtime and the search
//! index.

use rstest::*;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;
use therefore::prelude::*;
use therefore_conf::{DefaultSource, JsonFileSource, SettingsBuilder, TomlFileSource};
use therefore_hydration::ComponentRegistry;
use therefore_integration_tests::free_corpus;

#[rstest]
#[serial(env)]
fn test_file_and_environment_reach_widgets() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("therefore.toml");
	fs::write(
		&path,
		r#"
[hydration]
timeline_stagger_ms = 250

[search]
limit = 4
"#,
	)
	.unwrap();

	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		env::set_var("THEREFORE_SEARCH__LIMIT", "1");
	}
	let settings = Settings::load(Some(&path));
	// SAFETY: see above
	unsafe {
		env::remove_var("THEREFORE_SEARCH__LIMIT");
	}
	let settings = settings.unwrap();
	assert_eq!(settings.search.limit, 1);

	let mut doc = Document::from_body_html(
		r#"<ol id="tl" data-component="timeline"><li class="timeline-event">a</li><li class="timeline-event">b</li></ol>"#,
	);
	let body = doc.body();
	let context = HydrationContext::new(settings.hydration.clone());
	let mut runtime = HydrationRuntime::new(ComponentRegistry::default(), context);
	runtime.hydrate(&mut doc, body);

	let events = doc.query_all(body, ".timeline-event");
	doc.advance_time(100);
	assert_eq!(doc.style(events[1], "opacity"), Some("0"));
	doc.advance_time(150);
	assert_eq!(doc.style(events[1], "opacity"), Some("1"));

	let options = SearchOptions::from(&settings.search);
	let index = SearchIndex::build(&free_corpus(), options).unwrap();
	assert_eq!(index.search("free", index.options().get_limit()).len(), 1);
}

#[rstest]
fn test_later_file_source_wins_at_equal_priority() {
	let temp_dir = TempDir::new().unwrap();
	let toml_path = temp_dir.path().join("therefore.toml");
	let json_path = temp_dir.path().join("therefore.json");
	fs::write(&toml_path, "[search]\nthreshold = 0.2\ndistance = 80\n").unwrap();
	fs::write(&json_path, r#"{"search": {"threshold": 0.45}}"#).unwrap();

	let settings: Settings = SettingsBuilder::new()
		.add_source(DefaultSource::from_serializable(&Settings::default()).unwrap())
		.add_source(TomlFileSource::new(&toml_path))
		.add_source(JsonFileSource::new(&json_path))
		.build()
		.unwrap()
		.into_typed()
		.unwrap();

	assert!(settings.validate().is_ok());
	assert_eq!(settings.search.distance, 80);
	assert_eq!(settings.search.threshold, 0.45);
}

#[rstest]
#[serial(env)]
fn test_missing_file_falls_back_to_defaults() {
	let temp_dir = TempDir::new().unwrap();
	let settings = Settings::load(Some(&temp_dir.path().join("absent.toml"))).unwrap();
	assert_eq!(settings, Settings::default());
}
