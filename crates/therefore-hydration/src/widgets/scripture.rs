//! Scripture comparison: cycles a passage through alternate translations.
//!
//! ```html
//! <div data-component="scripture-compare" data-alt-count="3"
//!      data-alt-versions="ESV,NIV,KJV" data-ref="John 3:16">
//!   <div class="scripture-compare__panel scripture-compare__panel--active">...</div>
//!   <div class="scripture-compare__panel">...</div>
//!   <div class="scripture-compare__panel">...</div>
//!   <span class="scripture-compare__alt-label">ESV</span>
//!   <span class="scripture-compare__position">1/3</span>
//!   <button class="scripture-compare__cycle-btn"></button>
//!   <a class="scripture-gateway-link" href="..."></a>
//! </div>
//! ```

use crate::context::HydrationContext;
use crate::registry::InitResult;
use crate::resources::WidgetResources;
use std::cell::Cell;
use std::rc::Rc;
use therefore_dom::{Document, DomError, EventType, NodeId};

const PANEL: &str = ".scripture-compare__panel";
const ACTIVE_CLASS: &str = "scripture-compare__panel--active";
const LABEL: &str = ".scripture-compare__alt-label";
const POSITION: &str = ".scripture-compare__position";
const CYCLE_BUTTON: &str = ".scripture-compare__cycle-btn";
const GATEWAY_LINK: &str = ".scripture-gateway-link";

/// Ring position over the translation panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptureCursor {
	current: usize,
	len: usize,
}

impl ScriptureCursor {
	/// A cursor at panel 0. `None` when there is nothing to cycle through.
	pub fn new(len: usize) -> Option<Self> {
		(len > 1).then_some(Self { current: 0, len })
	}

	pub fn current(&self) -> usize {
		self.current
	}

	pub fn len(&self) -> usize {
		self.len
	}

	/// Moves to the next panel, wrapping, and returns the new position.
	pub fn advance(&mut self) -> usize {
		self.current = (self.current + 1) % self.len;
		self.current
	}
}

/// Encodes a passage reference the way the lookup page expects it.
pub fn encode_reference(reference: &str) -> String {
	reference.replace(' ', "+").replace(':', "%3A")
}

/// Lookup URL for `reference` in `version`.
pub fn gateway_url(base: &str, reference: &str, version: &str) -> String {
	format!("{}?search={}&version={}", base, encode_reference(reference), version)
}

struct Parts {
	panels: Vec<NodeId>,
	versions: Vec<String>,
	reference: String,
	link_base: String,
	label: Option<NodeId>,
	position: Option<NodeId>,
	link: Option<NodeId>,
}

impl Parts {
	/// Moves the active panel from `from` to `to` and rewrites the label,
	/// position indicator and lookup link.
	fn show(&self, doc: &mut Document, from: usize, to: usize, len: usize) -> Result<(), DomError> {
		let previous = self.panels[from];
		doc.remove_class(previous, ACTIVE_CLASS)?;
		doc.set_attribute(previous, "aria-hidden", "true")?;
		let next = self.panels[to];
		doc.add_class(next, ACTIVE_CLASS)?;
		doc.set_attribute(next, "aria-hidden", "false")?;

		let version = self.versions.get(to).map(String::as_str).unwrap_or_default();
		if let Some(label) = self.label {
			doc.set_text_content(label, version)?;
		}
		if let Some(position) = self.position {
			doc.set_text_content(position, &format!("{}/{}", to + 1, len))?;
		}
		if let Some(link) = self.link
			&& !self.reference.is_empty()
		{
			doc.set_attribute(link, "href", &gateway_url(&self.link_base, &self.reference, version))?;
		}
		Ok(())
	}
}

pub fn init(doc: &mut Document, ctx: &mut HydrationContext, element: NodeId) -> InitResult {
	let alt_count = doc
		.data_attribute(element, "alt-count")
		.and_then(|v| v.trim().parse::<usize>().ok())
		.unwrap_or(0);
	let panels = doc.query_all(element, PANEL);
	let Some(cursor) = ScriptureCursor::new(alt_count.min(panels.len())) else {
		tracing::debug!(%element, alt_count, panels = panels.len(), "nothing to compare");
		return Ok(None);
	};
	let Some(button) = doc.query(element, CYCLE_BUTTON) else {
		return Ok(None);
	};

	let parts = Parts {
		versions: doc
			.data_attribute(element, "alt-versions")
			.unwrap_or_default()
			.split(',')
			.map(|v| v.trim().to_string())
			.collect(),
		reference: doc.data_attribute(element, "ref").unwrap_or_default(),
		link_base: ctx.settings().scripture_link_base.clone(),
		label: doc.query(element, LABEL),
		position: doc.query(element, POSITION),
		link: doc.query(element, GATEWAY_LINK),
		panels,
	};

	doc.set_attribute(button, "aria-label", "Next translation")?;
	if let Some(label) = parts.label {
		doc.set_attribute(label, "aria-live", "polite")?;
	}
	for (i, panel) in parts.panels.iter().enumerate() {
		if i == 0 {
			doc.add_class(*panel, ACTIVE_CLASS)?;
			doc.set_attribute(*panel, "aria-hidden", "false")?;
		} else {
			doc.remove_class(*panel, ACTIVE_CLASS)?;
			doc.set_attribute(*panel, "aria-hidden", "true")?;
		}
	}
	parts.show(doc, 0, 0, cursor.len())?;

	let parts = Rc::new(parts);
	let cursor = Rc::new(Cell::new(cursor));
	let cycle = move |doc: &mut Document| {
		let mut next = cursor.get();
		let from = next.current();
		let to = next.advance();
		if let Err(err) = parts.show(doc, from, to, next.len()) {
			tracing::warn!(error = %err, "scripture cycle failed");
			return;
		}
		cursor.set(next);
	};
	let cycle = Rc::new(cycle);

	let mut resources = WidgetResources::new();
	{
		let cycle = Rc::clone(&cycle);
		resources.listen(doc, button, EventType::Click, move |doc, _| cycle(doc));
	}
	resources.listen(doc, button, EventType::KeyDown, move |doc, event| {
		if matches!(event.key(), Some("Enter" | " ")) {
			event.prevent_default();
			cycle(doc);
		}
	});
	Ok(Some(resources.into_cleanup()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	fn widget(count: &str, panels: usize) -> (Document, NodeId) {
		let panel_html: String = (0..panels)
			.map(|i| format!(r#"<div class="scripture-compare__panel">text {}</div>"#, i))
			.collect();
		let doc = Document::from_body_html(&format!(
			r##"<div id="sc" data-alt-count="{count}" data-alt-versions="ESV,NIV,KJV,NASB" data-ref="John 3:16">{panel_html}<span class="scripture-compare__alt-label"></span><span class="scripture-compare__position"></span><button class="scripture-compare__cycle-btn">next</button><a class="scripture-gateway-link" href="#">read</a></div>"##
		));
		let el = doc.get_element_by_id("sc").unwrap();
		(doc, el)
	}

	fn active(doc: &Document, el: NodeId) -> Vec<usize> {
		doc.query_all(el, PANEL)
			.into_iter()
			.enumerate()
			.filter(|(_, p)| doc.has_class(*p, ACTIVE_CLASS))
			.map(|(i, _)| i)
			.collect()
	}

	#[rstest]
	#[case("John 3:16", "John+3%3A16")]
	#[case("1 Cor 13:4-7", "1+Cor+13%3A4-7")]
	#[case("Psalm 23", "Psalm+23")]
	fn test_encode_reference(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(encode_reference(input), expected);
	}

	#[rstest]
	fn test_hydrate_normalises_to_first_panel() {
		let (mut doc, el) = widget("3", 3);
		let mut ctx = HydrationContext::default();
		init(&mut doc, &mut ctx, el).unwrap().unwrap();

		assert_eq!(active(&doc, el), vec![0]);
		let label = doc.query(el, LABEL).unwrap();
		let button = doc.query(el, CYCLE_BUTTON).unwrap();
		assert_eq!(doc.text_content(label), "ESV");
		assert_eq!(doc.get_attribute(label, "aria-live").as_deref(), Some("polite"));
		assert_eq!(doc.get_attribute(button, "aria-label").as_deref(), Some("Next translation"));
		assert_eq!(doc.text_content(doc.query(el, POSITION).unwrap()), "1/3");
	}

	#[rstest]
	fn test_cycle_updates_everything_together() {
		let (mut doc, el) = widget("3", 3);
		let mut ctx = HydrationContext::default();
		init(&mut doc, &mut ctx, el).unwrap();
		let button = doc.query(el, CYCLE_BUTTON).unwrap();

		doc.click(button);

		let panels = doc.query_all(el, PANEL);
		assert_eq!(active(&doc, el), vec![1]);
		assert_eq!(doc.get_attribute(panels[0], "aria-hidden").as_deref(), Some("true"));
		assert_eq!(doc.get_attribute(panels[1], "aria-hidden").as_deref(), Some("false"));
		assert_eq!(doc.text_content(doc.query(el, LABEL).unwrap()), "NIV");
		assert_eq!(doc.text_content(doc.query(el, POSITION).unwrap()), "2/3");
		let link = doc.query(el, GATEWAY_LINK).unwrap();
		assert_eq!(
			doc.get_attribute(link, "href").as_deref(),
			Some("https://www.biblegateway.com/passage/?search=John+3%3A16&version=NIV")
		);
	}

	#[rstest]
	#[case("Enter")]
	#[case(" ")]
	fn test_keyboard_cycles(#[case] key: &str) {
		let (mut doc, el) = widget("2", 2);
		let mut ctx = HydrationContext::default();
		init(&mut doc, &mut ctx, el).unwrap();
		let button = doc.query(el, CYCLE_BUTTON).unwrap();

		let event = doc.key_down(button, key);
		assert!(event.default_prevented());
		assert_eq!(active(&doc, el), vec![1]);
		doc.key_down(button, "a");
		assert_eq!(active(&doc, el), vec![1]);
	}

	#[rstest]
	#[case::single("1", 1)]
	#[case::zero("0", 3)]
	#[case::not_a_number("three", 3)]
	#[case::no_panels("3", 0)]
	fn test_degenerate_widgets_are_inert(#[case] count: &str, #[case] panels: usize) {
		let (mut doc, el) = widget(count, panels);
		let mut ctx = HydrationContext::default();
		assert!(init(&mut doc, &mut ctx, el).unwrap().is_none());
		assert_eq!(doc.total_listeners(), 0);
	}

	#[rstest]
	fn test_count_is_capped_by_panels() {
		let (mut doc, el) = widget("4", 2);
		let mut ctx = HydrationContext::default();
		init(&mut doc, &mut ctx, el).unwrap();
		let button = doc.query(el, CYCLE_BUTTON).unwrap();
		doc.click(button);
		doc.click(button);
		assert_eq!(active(&doc, el), vec![0]);
		assert_eq!(doc.text_content(doc.query(el, POSITION).unwrap()), "1/2");
	}

	#[rstest]
	fn test_cleanup_detaches_button() {
		let (mut doc, el) = widget("3", 3);
		let mut ctx = HydrationContext::default();
		let cleanup = init(&mut doc, &mut ctx, el).unwrap().unwrap();
		cleanup.run(&mut doc);
		let button = doc.query(el, CYCLE_BUTTON).unwrap();
		doc.click(button);
		assert_eq!(active(&doc, el), vec![0]);
	}

	proptest! {
		#[test]
		fn prop_n_cycles_wrap_to_start(len in 2usize..16, extra in 0usize..16) {
			let mut cursor = ScriptureCursor::new(len).unwrap();
			for _ in 0..extra {
				cursor.advance();
			}
			let start = cursor.current();
			for _ in 0..len {
				cursor.advance();
			}
			prop_assert_eq!(cursor.current(), start);
			prop_assert!(cursor.current() < len);
		}

		#[test]
		fn prop_widget_returns_to_first_panel(panels in 2usize..5) {
			let (mut doc, el) = widget(&panels.to_string(), panels);
			let mut ctx = HydrationContext::default();
			init(&mut doc, &mut ctx, el).unwrap();
			let button = doc.query(el, CYCLE_BUTTON).unwrap();
			for _ in 0..panels {
				doc.click(button);
			}
			prop_assert_eq!(active(&doc, el), vec![0]);
		}
	}
}
