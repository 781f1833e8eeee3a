//! Inline citations: a numbered trigger that reveals the reference in a popover.
//!
//! Markup:
//!
//! ```html
//! <span data-component="citation"
//!       data-citation-text="Augustine, Confessions X.27"
//!       data-citation-url="https://...">
//!   <button class="citation-trigger"></button>
//! </span>
//! ```

use super::popover::{self, PopoverParts};
use crate::cleanup::Cleanup;
use crate::context::HydrationContext;
use crate::error::HydrationError;
use crate::registry::InitResult;
use therefore_conf::HydrationSettings;
use therefore_dom::{Document, NodeId};

pub fn init(doc: &mut Document, ctx: &mut HydrationContext, element: NodeId) -> InitResult {
	let Some(trigger) = doc.query(element, ".citation-trigger") else {
		tracing::debug!(%element, "citation without trigger left inert");
		return Ok(None);
	};
	let text = doc.data_attribute(element, "citation-text").unwrap_or_default();
	if text.is_empty() {
		tracing::debug!(%element, "citation without text left inert");
		return Ok(None);
	}
	let url = doc.data_attribute(element, "citation-url").unwrap_or_default();

	mount(doc, ctx, element, trigger, &text, &url).map(Some)
}

/// Numbers the citation and wires its popover. A failed mount hands the
/// number back and leaves nothing in the document.
fn mount(
	doc: &mut Document,
	ctx: &mut HydrationContext,
	element: NodeId,
	trigger: NodeId,
	text: &str,
	url: &str,
) -> Result<Cleanup, HydrationError> {
	let fresh = ctx.citations().number_of(element).is_none();
	let number = ctx.citations_mut().register(element, text, url);

	let mounted = build(doc, ctx.settings(), element, trigger, number, text, url);
	if mounted.is_err() && fresh {
		ctx.citations_mut().withdraw(element);
	}
	let cleanup = mounted?;

	tracing::debug!(%element, number, "citation hydrated");
	Ok(cleanup)
}

fn build(
	doc: &mut Document,
	settings: &HydrationSettings,
	element: NodeId,
	trigger: NodeId,
	number: u32,
	text: &str,
	url: &str,
) -> Result<Cleanup, HydrationError> {
	let popover_id = format!("citation-popover-{}", number);
	let popover = popover::create(doc, &popover_id, "citation-popover")?;

	let wrapper = doc.create_element("div");
	let text_node = doc.create_element("span");
	doc.set_text_content(text_node, text)?;
	doc.append_child(wrapper, text_node)?;
	if !url.is_empty() {
		let link = doc.create_element("a");
		doc.set_attribute(link, "href", url)?;
		doc.set_attribute(link, "target", "_blank")?;
		doc.set_attribute(link, "rel", "noopener noreferrer")?;
		doc.set_text_content(link, "View source")?;
		doc.append_child(wrapper, link)?;
	}
	doc.append_child(popover, wrapper)?;

	let cleanup = popover::attach(
		doc,
		PopoverParts {
			root: element,
			trigger,
			popover,
			show_label: format!("Show citation {}", number),
			hide_label: format!("Hide citation {}", number),
			clearance_px: settings.popover_clearance_px,
			offset_px: settings.popover_offset_px,
		},
		&popover_id,
	)?;

	let placed = doc
		.append_child(element, popover)
		.and_then(|_| doc.set_attribute(element, "data-citation-number", &number.to_string()));
	if let Err(err) = placed {
		cleanup.run(doc);
		return Err(err.into());
	}
	Ok(cleanup)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use therefore_dom::{Rect, Size};

	fn citation(doc: &mut Document, text: Option<&str>, url: Option<&str>) -> NodeId {
		let el = doc.create_element("span");
		if let Some(text) = text {
			doc.set_attribute(el, "data-citation-text", text).unwrap();
		}
		if let Some(url) = url {
			doc.set_attribute(el, "data-citation-url", url).unwrap();
		}
		let trigger = doc.create_element("button");
		doc.set_attribute(trigger, "class", "citation-trigger").unwrap();
		doc.append_child(el, trigger).unwrap();
		let body = doc.body();
		doc.append_child(body, el).unwrap();
		el
	}

	#[rstest]
	fn test_missing_text_is_inert() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let el = citation(&mut doc, None, None);
		assert!(init(&mut doc, &mut ctx, el).unwrap().is_none());
		assert!(ctx.citations().is_empty());
		assert_eq!(doc.total_listeners(), 0);
	}

	#[rstest]
	fn test_missing_trigger_is_inert() {
		let mut doc = Document::from_body_html(r#"<span data-citation-text="x"></span>"#);
		let mut ctx = HydrationContext::default();
		let el = doc.query(doc.body(), "span").unwrap();
		assert!(init(&mut doc, &mut ctx, el).unwrap().is_none());
	}

	#[rstest]
	fn test_popover_and_aria() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let first = citation(&mut doc, Some("One"), None);
		let second = citation(&mut doc, Some("Two"), Some("https://example.org/two"));
		init(&mut doc, &mut ctx, first).unwrap();
		init(&mut doc, &mut ctx, second).unwrap();

		let trigger = doc.query(second, ".citation-trigger").unwrap();
		let popover = doc.query(second, "[role='tooltip']").unwrap();
		assert_eq!(doc.get_attribute(popover, "id").as_deref(), Some("citation-popover-2"));
		assert_eq!(doc.get_attribute(second, "data-citation-number").as_deref(), Some("2"));
		assert_eq!(doc.get_attribute(trigger, "aria-controls").as_deref(), Some("citation-popover-2"));
		assert_eq!(doc.get_attribute(trigger, "aria-label").as_deref(), Some("Show citation 2"));
		assert_eq!(doc.get_attribute(trigger, "aria-haspopup").as_deref(), Some("true"));
		assert_eq!(doc.style(popover, "display"), Some("none"));

		let link = doc.query(popover, "a").unwrap();
		assert_eq!(doc.get_attribute(link, "rel").as_deref(), Some("noopener noreferrer"));
		assert!(doc.query(doc.query(first, "[role='tooltip']").unwrap(), "a").is_none());
	}

	#[rstest]
	fn test_toggle_keyboard_and_outside_click() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let el = citation(&mut doc, Some("Source"), None);
		init(&mut doc, &mut ctx, el).unwrap();
		let trigger = doc.query(el, ".citation-trigger").unwrap();
		let popover = doc.query(el, "[role='tooltip']").unwrap();

		let event = doc.click(trigger);
		assert!(event.default_prevented());
		assert_eq!(doc.style(popover, "display"), Some("block"));
		assert_eq!(doc.get_attribute(trigger, "aria-label").as_deref(), Some("Hide citation 1"));

		let body = doc.body();
		doc.click(body);
		assert_eq!(doc.style(popover, "display"), Some("none"));
		assert_eq!(doc.get_attribute(trigger, "aria-expanded").as_deref(), Some("false"));

		doc.key_down(trigger, " ");
		assert_eq!(doc.style(popover, "display"), Some("block"));
		doc.key_down(body, "Escape");
		assert_eq!(doc.style(popover, "display"), Some("none"));
	}

	#[rstest]
	fn test_positions_on_next_frame() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let el = citation(&mut doc, Some("Source"), None);
		init(&mut doc, &mut ctx, el).unwrap();
		let trigger = doc.query(el, ".citation-trigger").unwrap();
		let popover = doc.query(el, "[role='tooltip']").unwrap();
		doc.set_viewport(Size::new(1024.0, 768.0));
		doc.set_bounding_rect(trigger, Rect::new(700.0, 40.0, 16.0, 16.0));
		doc.set_bounding_rect(popover, Rect::new(0.0, 0.0, 320.0, 120.0));

		doc.click(trigger);
		assert_eq!(doc.style(popover, "bottom"), None);
		assert_eq!(doc.run_animation_frames(), 1);
		assert_eq!(doc.style(popover, "bottom"), Some("100%"));
		assert_eq!(doc.style(popover, "top"), Some("auto"));
		assert_eq!(doc.style(popover, "margin-bottom"), Some("4px"));
		assert_eq!(doc.style(popover, "transform"), Some("translateX(-50%)"));
	}

	#[rstest]
	fn test_cleanup_removes_listeners_and_popover() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let el = citation(&mut doc, Some("Source"), None);
		let cleanup = init(&mut doc, &mut ctx, el).unwrap().unwrap();
		assert_eq!(doc.total_listeners(), 4);
		let trigger = doc.query(el, ".citation-trigger").unwrap();
		doc.click(trigger);

		cleanup.run(&mut doc);
		assert_eq!(doc.total_listeners(), 0);
		assert!(doc.query(el, "[role='tooltip']").is_none());
		assert_eq!(doc.run_animation_frames(), 0);
	}

	#[rstest]
	fn test_failed_mount_returns_number_and_leaves_no_popover() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let broken = citation(&mut doc, Some("Broken"), None);
		let not_a_trigger = doc.create_text("1");

		let result = mount(&mut doc, &mut ctx, broken, not_a_trigger, "Broken", "");

		assert!(matches!(result, Err(HydrationError::Dom(_))));
		assert!(ctx.citations().is_empty());
		assert!(doc.query(broken, "[role='tooltip']").is_none());
		assert!(!doc.has_attribute(broken, "data-citation-number"));
		assert_eq!(doc.total_listeners(), 0);

		let next = citation(&mut doc, Some("Next"), None);
		init(&mut doc, &mut ctx, next).unwrap();
		assert_eq!(doc.get_attribute(next, "data-citation-number").as_deref(), Some("1"));
	}

	#[rstest]
	fn test_popover_width_is_capped() {
		let mut doc = Document::new();
		let mut ctx = HydrationContext::default();
		let el = citation(&mut doc, Some("Source"), None);
		init(&mut doc, &mut ctx, el).unwrap();
		let popover = doc.query(el, "[role='tooltip']").unwrap();
		assert_eq!(doc.style(popover, "max-width"), Some(popover::MAX_WIDTH));
	}
}
