//! Hydration lifecycle integration tests
//!
//! Drives a full post page through hydrate, interact, clean up and
//! rehydrate, the way a page-lifecycle collaborator would on client-side
//! navigation.

use proptest::prelude::*;
use rstest::*;
use therefore::prelude::*;
use therefore_dom::{EventType, NavigationState, TransitionKind};
use therefore_hydration::widgets::timeline::HIGHLIGHT_CLASS;
use therefore_hydration::{HYDRATED_ATTR, is_hydrated};
use therefore_integration_tests::{LIVE_WIDGETS, post_page, recording_runtime};

fn id(doc: &Document, id: &str) -> NodeId {
	doc.get_element_by_id(id).unwrap()
}

#[rstest]
fn test_full_page_first_pass() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();

	let report = runtime.hydrate(&mut doc, post);

	assert!(report.is_clean());
	assert_eq!(report.hydrated, LIVE_WIDGETS + 1);
	assert_eq!(report.tag_links, 2);
	assert_eq!(runtime.pending_cleanups(), LIVE_WIDGETS + 2);
	assert!(doc.get_element_by_id("author").is_none());
	assert_eq!(doc.query_all(post, ".avatar-fallback").len(), 1);
}

#[rstest]
fn test_double_hydration_adds_nothing() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);
	let listeners = doc.total_listeners();
	let tooltips = doc.query_all(post, "[role='tooltip']").len();

	let report = runtime.hydrate(&mut doc, post);

	assert_eq!(report.hydrated, 0);
	assert_eq!(report.tag_links, 0);
	assert_eq!(doc.total_listeners(), listeners);
	assert_eq!(doc.query_all(post, "[role='tooltip']").len(), tooltips);
	assert_eq!(tooltips, 3);
}

#[rstest]
fn test_cleanup_retires_everything_then_rehydrates() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);
	let listeners = doc.total_listeners();

	runtime.cleanup_all(&mut doc);

	assert_eq!(doc.total_listeners(), 0);
	assert_eq!(doc.pending_timers(), 0);
	assert!(doc.query_all(post, "[role='tooltip']").is_empty());
	assert!(doc.query_all(post, &format!("[{}]", HYDRATED_ATTR)).is_empty());

	let report = runtime.hydrate(&mut doc, post);
	assert_eq!(report.hydrated, LIVE_WIDGETS);
	assert_eq!(doc.total_listeners(), listeners);
	assert!(is_hydrated(&doc, id(&doc, "note")));
}

#[rstest]
fn test_sidenote_opens_on_click_and_closes_on_escape() {
	let mut doc = Document::from_body_html(
		r#"<p>Text<span id="note" data-component="sidenote" data-sidenote-content="<b>note</b>"><button class="sidenote-trigger">1</button></span></p>"#,
	);
	let body = doc.body();
	let mut runtime = HydrationRuntime::default();
	runtime.hydrate(&mut doc, body);

	let note = id(&doc, "note");
	let trigger = doc.query(note, ".sidenote-trigger").unwrap();
	let popover = doc.query(note, "[role='tooltip']").unwrap();
	assert_eq!(doc.get_attribute(trigger, "aria-expanded").as_deref(), Some("false"));
	assert_eq!(doc.query(popover, "b").map(|b| doc.text_content(b)).as_deref(), Some("note"));

	doc.click(trigger);
	assert_eq!(doc.style(popover, "display"), Some("block"));
	assert_eq!(doc.get_attribute(trigger, "aria-expanded").as_deref(), Some("true"));

	doc.key_down(trigger, "Escape");
	assert_eq!(doc.style(popover, "display"), Some("none"));
	assert_eq!(doc.get_attribute(trigger, "aria-expanded").as_deref(), Some("false"));
}

#[rstest]
fn test_sidenote_works_after_rehydration_without_double_firing() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);
	runtime.cleanup_all(&mut doc);
	runtime.hydrate(&mut doc, post);

	let note = id(&doc, "note");
	let trigger = doc.query(note, ".sidenote-trigger").unwrap();
	let popover = doc.query(note, "[role='tooltip']").unwrap();

	doc.click(trigger);
	assert_eq!(doc.style(popover, "display"), Some("block"));
	doc.click(trigger);
	assert_eq!(doc.style(popover, "display"), Some("none"));
}

#[rstest]
fn test_citations_number_in_document_order_and_reset() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);

	assert_eq!(doc.get_attribute(id(&doc, "cite-1"), "data-citation-number").as_deref(), Some("1"));
	assert_eq!(doc.get_attribute(id(&doc, "cite-2"), "data-citation-number").as_deref(), Some("2"));

	let content = id(&doc, "content");
	let accordion = runtime.build_citation_accordion(&mut doc, content).unwrap().unwrap();
	assert_eq!(doc.query_all(accordion, "li").len(), 2);

	runtime.cleanup_all(&mut doc);
	runtime.reset_citations(&mut doc);
	assert!(!doc.is_connected(accordion));

	runtime.hydrate(&mut doc, post);
	assert_eq!(doc.get_attribute(id(&doc, "cite-1"), "data-citation-number").as_deref(), Some("1"));
}

#[rstest]
fn test_lightbox_scroll_lock_and_focus_round_trip() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);

	let tag = id(&doc, "tag");
	doc.focus(tag).unwrap();
	let image = doc.query(id(&doc, "figure"), "img").unwrap();

	doc.click(image);
	assert_eq!(doc.style(doc.body(), "overflow"), Some("hidden"));
	let close = doc.query(doc.body(), ".lightbox-close").unwrap();
	assert_eq!(doc.active_element(), Some(close));

	let tab = doc.key_down(close, "Tab");
	assert!(tab.default_prevented());
	assert_eq!(doc.active_element(), Some(close));

	let overlay = doc.query(doc.body(), ".lightbox-overlay").unwrap();
	let image_copy = doc.query(overlay, ".lightbox-image").unwrap();
	doc.click(image_copy);
	assert!(doc.is_connected(overlay));

	doc.click(overlay);
	assert!(!doc.is_connected(overlay));
	assert_eq!(doc.style(doc.body(), "overflow"), None);
	assert_eq!(doc.active_element(), Some(tag));
	assert_eq!(doc.listener_count(NodeId::DOCUMENT, &EventType::KeyDown), 3);
}

#[rstest]
fn test_scripture_compare_cycles_and_wraps() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);

	let scripture = id(&doc, "scripture");
	let button = doc.query(scripture, ".scripture-compare__cycle-btn").unwrap();
	let label = doc.query(scripture, ".scripture-compare__alt-label").unwrap();
	let position = doc.query(scripture, ".scripture-compare__position").unwrap();
	let link = doc.query(scripture, ".scripture-gateway-link").unwrap();
	assert_eq!(doc.text_content(label), "ESV");

	doc.click(button);
	assert_eq!(doc.text_content(label), "NIV");
	assert_eq!(doc.text_content(position), "2/3");
	assert_eq!(
		doc.get_attribute(link, "href").as_deref(),
		Some("https://www.biblegateway.com/passage/?search=Romans+8%3A28&version=NIV")
	);

	doc.key_down(button, "Enter");
	doc.key_down(button, " ");
	assert_eq!(doc.text_content(label), "ESV");
	assert_eq!(doc.text_content(position), "1/3");
}

#[rstest]
fn test_timeline_reveals_in_stagger_order() {
	let (mut doc, post) = post_page();
	let (mut runtime, _) = recording_runtime();
	runtime.hydrate(&mut doc, post);

	let events = doc.query_all(id(&doc, "timeline"), ".timeline-event");
	assert!(events.iter().all(|e| doc.style(*e, "opacity") == Some("0")));

	doc.advance_time(100);
	assert_eq!(doc.style(events[0], "opacity"), Some("1"));
	assert_eq!(doc.style(events[1], "opacity"), Some("1"));
	assert_eq!(doc.style(events[2], "opacity"), Some("0"));

	doc.advance_time(100);
	assert_eq!(doc.style(events[2], "opacity"), Some("1"));

	doc.click(events[1]);
	assert!(doc.has_class(events[1], HIGHLIGHT_CLASS));
	doc.click(events[2]);
	assert!(!doc.has_class(events[1], HIGHLIGHT_CLASS));
	assert!(doc.has_class(events[2], HIGHLIGHT_CLASS));
}

#[rstest]
fn test_tag_links_route_internal_hrefs_only() {
	let (mut doc, post) = post_page();
	let (mut runtime, navigator) = recording_runtime();
	runtime.hydrate(&mut doc, post);

	let internal = doc.click(id(&doc, "tag"));
	assert!(internal.default_prevented());
	let external = doc.click(id(&doc, "external"));
	assert!(!external.default_prevented());

	let requests = navigator.take();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].path, "/tags/grace");
	assert_eq!(
		requests[0].state,
		Some(NavigationState::with_transition(TransitionKind::Slide))
	);
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(16))]

	#[test]
	fn prop_page_cycles_never_leak(cycles in 1usize..4, passes in 1usize..3) {
		let (mut doc, post) = post_page();
		let (mut runtime, _) = recording_runtime();
		runtime.hydrate(&mut doc, post);
		let listeners = doc.total_listeners();

		for _ in 0..cycles {
			runtime.cleanup_all(&mut doc);
			prop_assert_eq!(doc.total_listeners(), 0);
			for _ in 0..passes {
				runtime.hydrate(&mut doc, post);
			}
			prop_assert_eq!(doc.total_listeners(), listeners);
		}
	}
}
