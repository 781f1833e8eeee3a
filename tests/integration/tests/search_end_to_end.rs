//! Search end-to-end tests
//!
//! Index building from API-shaped JSON, ranking, highlight spans and the
//! search modal's navigation behaviour.

use proptest::prelude::*;
use rstest::*;
use std::rc::Rc;
use therefore::prelude::*;
use therefore_conf::SearchSettings;
use therefore_dom::{NavigationState, RecordingNavigator};
use therefore_integration_tests::{free_corpus, library};
use therefore_search::{ResultCard, SearchField, Segment, Span, highlight};

#[fixture]
fn modal() -> (SearchModal, Rc<RecordingNavigator>) {
	let navigator = Rc::new(RecordingNavigator::new());
	let mut modal = SearchModal::new(SearchOptions::default(), navigator.clone()).unwrap();
	modal.set_posts(Some(Rc::new(library()))).unwrap();
	modal.open();
	(modal, navigator)
}

#[rstest]
fn test_free_matches_both_titles_with_spans() {
	let index = SearchIndex::build(&free_corpus(), SearchOptions::default()).unwrap();

	let results = index.search("free", 8);

	assert_eq!(results.len(), 2);
	assert_eq!(results[0].slug, "b");
	assert_eq!(results[1].slug, "a");
	assert!(results[0].score < results[1].score);
	for result in &results {
		let title = result.field_match(SearchField::Title).unwrap();
		let highlighted: Vec<&str> = title.spans.iter().map(|s| s.slice(&title.value)).collect();
		assert_eq!(highlighted, vec!["Free"]);
	}
}

#[rstest]
fn test_index_from_api_json() {
	let json = r#"[
		{"slug": "on-free-will", "title": "On Free Will", "publishDate": "2024-04-12", "readingTime": 9, "series": "Foundations"},
		{"slug": "grace", "title": "Grace", "summary": "Unmerited favour", "publishDate": "2024-01-02", "readingTime": 4, "tags": ["grace"]}
	]"#;
	let posts: Vec<PostListItem> = serde_json::from_str(json).unwrap();
	let index = SearchIndex::build(&posts, SearchOptions::default()).unwrap();

	let results = index.search("favour", 8);
	assert_eq!(results.len(), 1);
	assert_eq!(results[0].slug, "grace");
	assert!(results[0].field_match(SearchField::Summary).is_some());
}

#[rstest]
fn test_settings_drive_index_options() {
	let settings = SearchSettings {
		limit: 1,
		..SearchSettings::default()
	};
	let options = SearchOptions::from(&settings);
	let index = SearchIndex::build(&free_corpus(), options).unwrap();
	assert_eq!(index.search("free", index.options().get_limit()).len(), 1);
}

#[rstest]
fn test_modal_highlights_title_segments(modal: (SearchModal, Rc<RecordingNavigator>)) {
	let (mut modal, _) = modal;
	modal.set_query("theodicy");

	let ModalView::Results(cards) = modal.view() else {
		panic!("expected results");
	};
	let ResultCard::Post(card) = &cards[0] else {
		panic!("expected a post card");
	};
	assert_eq!(card.slug, "the-problem-of-evil");
	assert_eq!(card.date, "Jun 2, 2024");
	assert_eq!(card.tags, vec!["theodicy"]);
	assert_eq!(card.title, highlight("The Problem of Evil", &[]));
}

#[rstest]
fn test_modal_snippet_from_body_text(modal: (SearchModal, Rc<RecordingNavigator>)) {
	let (mut modal, _) = modal;
	modal.set_query("augustine wrote");

	let ModalView::Results(cards) = modal.view() else {
		panic!("expected results");
	};
	let card = cards
		.iter()
		.find_map(|c| match c {
			ResultCard::Post(p) if p.slug == "on-free-will" => Some(p),
			_ => None,
		})
		.unwrap();
	let snippet = card.snippet.as_ref().unwrap();
	assert!(snippet.text.starts_with("Augustine wrote"));
	assert!(!snippet.leading_ellipsis);
	assert_eq!(snippet.spans[0], Span::new(0, 15));
	assert_eq!(
		highlight(&snippet.text, &snippet.spans)[0],
		Segment::marked("Augustine wrote")
	);
}

#[rstest]
fn test_modal_series_card_navigates_to_series(modal: (SearchModal, Rc<RecordingNavigator>)) {
	let (mut modal, navigator) = modal;
	modal.set_query("free");

	let ModalView::Results(cards) = modal.view() else {
		panic!("expected results");
	};
	assert!(matches!(&cards[0], ResultCard::Series(s) if s.series == "Foundations" && s.hits == 2));
	assert!(cards[0].is_active());

	assert!(modal.key_down("Enter"));
	let request = navigator.last().unwrap();
	assert_eq!(request.path, "/series");
	assert_eq!(request.state, Some(NavigationState::open_series("Foundations")));
	assert_eq!(modal.view(), ModalView::Closed);
}

#[rstest]
fn test_modal_arrow_then_enter_opens_post(modal: (SearchModal, Rc<RecordingNavigator>)) {
	let (mut modal, navigator) = modal;
	modal.set_query("theodicy");
	modal.key_down("ArrowDown");
	modal.key_down("ArrowUp");
	modal.key_down("Enter");

	let request = navigator.last().unwrap();
	assert_eq!(request.path, "/posts/the-problem-of-evil");
	assert_eq!(request.state, None);
	assert!(!modal.is_open());
	assert_eq!(modal.query(), "");
}

#[rstest]
fn test_modal_keeps_index_for_same_list() {
	let navigator = Rc::new(RecordingNavigator::new());
	let mut modal = SearchModal::new(SearchOptions::default(), navigator).unwrap();
	let posts = Rc::new(library());

	modal.set_posts(Some(Rc::clone(&posts))).unwrap();
	modal.set_posts(Some(Rc::clone(&posts))).unwrap();
	assert_eq!(modal.index_builds(), 1);
}

proptest! {
	#[test]
	fn prop_short_queries_never_search(query in "\\PC{0,1}") {
		let index = SearchIndex::build(&library(), SearchOptions::default()).unwrap();
		prop_assert!(index.search(&query, 8).is_empty());

		let navigator = Rc::new(RecordingNavigator::new());
		let mut modal = SearchModal::new(SearchOptions::default(), navigator).unwrap();
		modal.set_posts(Some(Rc::new(library()))).unwrap();
		modal.open();
		modal.set_query(query);
		prop_assert_eq!(modal.view(), ModalView::Prompt);
	}
}
