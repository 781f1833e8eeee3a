//! Sidenotes: margin notes revealed from a trigger on narrow screens.
//!
//! `data-sidenote-content` holds trusted, server-rendered HTML.

use super::popover::{self, PopoverParts};
use crate::context::HydrationContext;
use crate::registry::InitResult;
use therefore_dom::{Document, NodeId};

pub fn init(doc: &mut Document, ctx: &mut HydrationContext, element: NodeId) -> InitResult {
	let Some(trigger) = doc.query(element, ".sidenote-trigger") else {
		return Ok(None);
	};
	let content = doc.data_attribute(element, "sidenote-content").unwrap_or_default();
	if content.is_empty() {
		return Ok(None);
	}

	let popover_id = format!("sidenote-popover-{}", ctx.next_instance_id());
	let popover = popover::create(doc, &popover_id, "sidenote-popover")?;
	doc.set_inner_html(popover, &content)?;

	let settings = ctx.settings();
	let cleanup = popover::attach(
		doc,
		PopoverParts {
			root: element,
			trigger,
			popover,
			show_label: "Show sidenote".to_string(),
			hide_label: "Hide sidenote".to_string(),
			clearance_px: settings.popover_clearance_px,
			offset_px: settings.popover_offset_px,
		},
		&popover_id,
	)?;
	if let Err(err) = doc.append_child(element, popover) {
		cleanup.run(doc);
		return Err(err.into());
	}
	Ok(Some(cleanup))
}
