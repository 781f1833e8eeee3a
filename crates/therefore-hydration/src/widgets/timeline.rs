//! Chronological timelines: staggered entrance and click-to-highlight.

use crate::context::HydrationContext;
use crate::registry::InitResult;
use crate::resources::WidgetResources;
use std::rc::Rc;
use therefore_dom::{Document, DomError, EventType, NodeId};

const EVENT: &str = ".timeline-event";

/// Class marking the highlighted event.
pub const HIGHLIGHT_CLASS: &str = "bg-primary/10";

fn hide(doc: &mut Document, event: NodeId) -> Result<(), DomError> {
	doc.set_style(event, "opacity", "0")?;
	doc.set_style(event, "transform", "translateX(-20px)")
}

fn reveal(doc: &mut Document, event: NodeId) -> Result<(), DomError> {
	doc.set_style(event, "transition", "opacity 0.5s ease, transform 0.5s ease")?;
	doc.set_style(event, "opacity", "1")?;
	doc.set_style(event, "transform", "translateX(0)")
}

pub fn init(doc: &mut Document, ctx: &mut HydrationContext, element: NodeId) -> InitResult {
	let events = doc.query_all(element, EVENT);
	if events.is_empty() {
		return Ok(None);
	}
	let stagger = ctx.settings().timeline_stagger_ms;
	let mut resources = WidgetResources::new();

	for (index, event) in events.iter().copied().enumerate() {
		hide(doc, event)?;
		resources.set_timeout(doc, stagger.saturating_mul(index as u64), move |doc| {
			if let Err(err) = reveal(doc, event) {
				tracing::debug!(%event, error = %err, "timeline event vanished before reveal");
			}
		});
	}

	let events = Rc::new(events);
	for event in events.iter().copied() {
		let events = Rc::clone(&events);
		resources.listen(doc, event, EventType::Click, move |doc, _| {
			let moved = events
				.iter()
				.try_for_each(|other| doc.remove_class(*other, HIGHLIGHT_CLASS))
				.and_then(|_| doc.add_class(event, HIGHLIGHT_CLASS));
			if let Err(err) = moved {
				tracing::debug!(%event, error = %err, "timeline highlight not moved");
			}
		});
	}

	tracing::debug!(%element, events = events.len(), "timeline hydrated");
	Ok(Some(resources.into_cleanup()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use therefore_conf::HydrationSettings;

	#[fixture]
	fn timeline() -> (Document, NodeId) {
		let doc = Document::from_body_html(
			r#"<ol id="tl"><li class="timeline-event">325 Nicaea</li><li class="timeline-event">381 Constantinople</li><li class="timeline-event">451 Chalcedon</li></ol>"#,
		);
		let el = doc.get_element_by_id("tl").unwrap();
		(doc, el)
	}

	#[rstest]
	fn test_events_reveal_in_stagger_order(timeline: (Document, NodeId)) {
		let (mut doc, el) = timeline;
		let mut ctx = HydrationContext::default();
		init(&mut doc, &mut ctx, el).unwrap().unwrap();
		let events = doc.query_all(el, EVENT);
		for event in &events {
			assert_eq!(doc.style(*event, "opacity"), Some("0"));
			assert_eq!(doc.style(*event, "transform"), Some("translateX(-20px)"));
		}

		doc.advance_time(0);
		assert_eq!(doc.style(events[0], "opacity"), Some("1"));
		assert_eq!(doc.style(events[1], "opacity"), Some("0"));

		doc.advance_time(100);
		assert_eq!(doc.style(events[1], "opacity"), Some("1"));
		assert_eq!(doc.style(events[2], "opacity"), Some("0"));

		doc.advance_time(100);
		assert_eq!(doc.style(events[2], "transform"), Some("translateX(0)"));
		assert_eq!(doc.pending_timers(), 0);
	}

	#[rstest]
	fn test_click_moves_highlight(timeline: (Document, NodeId)) {
		let (mut doc, el) = timeline;
		let mut ctx = HydrationContext::default();
		init(&mut doc, &mut ctx, el).unwrap();
		let events = doc.query_all(el, EVENT);

		doc.click(events[0]);
		doc.click(events[2]);

		let highlighted: Vec<_> = events
			.iter()
			.filter(|e| doc.has_class(**e, HIGHLIGHT_CLASS))
			.collect();
		assert_eq!(highlighted, vec![&events[2]]);
	}

	#[rstest]
	fn test_cleanup_cancels_pending_reveals(timeline: (Document, NodeId)) {
		let (mut doc, el) = timeline;
		let mut ctx = HydrationContext::default();
		let cleanup = init(&mut doc, &mut ctx, el).unwrap().unwrap();
		doc.advance_time(0);

		cleanup.run(&mut doc);

		assert_eq!(doc.pending_timers(), 0);
		assert_eq!(doc.total_listeners(), 0);
		let events = doc.query_all(el, EVENT);
		doc.advance_time(1000);
		assert_eq!(doc.style(events[2], "opacity"), Some("0"));
	}

	#[rstest]
	fn test_huge_stagger_saturates_instead_of_overflowing(timeline: (Document, NodeId)) {
		let (mut doc, el) = timeline;
		let mut ctx = HydrationContext::new(HydrationSettings {
			timeline_stagger_ms: u64::MAX / 2 + 1,
			..Default::default()
		});
		init(&mut doc, &mut ctx, el).unwrap().unwrap();
		let events = doc.query_all(el, EVENT);

		doc.advance_time(0);
		assert_eq!(doc.style(events[0], "opacity"), Some("1"));
		assert_eq!(doc.style(events[2], "opacity"), Some("0"));
		assert_eq!(doc.pending_timers(), 2);
	}

	#[rstest]
	fn test_empty_timeline_is_inert() {
		let mut doc = Document::from_body_html(r#"<ol id="tl"></ol>"#);
		let el = doc.get_element_by_id("tl").unwrap();
		let mut ctx = HydrationContext::default();
		assert!(init(&mut doc, &mut ctx, el).unwrap().is_none());
	}
}
