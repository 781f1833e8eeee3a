//! Click-to-zoom figures.
//!
//! Clicking the figure's image opens a full-viewport overlay in the
//! document's modal slot. While the overlay is open, page scrolling is
//! locked and focus is trapped on the close button.

use crate::cleanup::Cleanup;
use crate::context::HydrationContext;
use crate::modal::{ModalSlot, OpenModal};
use crate::registry::InitResult;
use crate::resources::WidgetResources;
use therefore_dom::{Document, DomError, EventType, NodeId};

const CLOSE_LABEL: &str = "Close lightbox";

pub fn init(doc: &mut Document, ctx: &mut HydrationContext, element: NodeId) -> InitResult {
	let Some(image) = doc.query(element, "img") else {
		return Ok(None);
	};
	doc.set_style(image, "cursor", "pointer")?;

	let owner = ctx.next_instance_id();
	let slot = ctx.modal_slot().clone();

	let listener = {
		let slot = slot.clone();
		doc.add_event_listener(image, EventType::Click, move |doc, _| {
			let src = doc.get_attribute(image, "src").unwrap_or_default();
			let alt = doc.get_attribute(image, "alt").unwrap_or_default();
			if let Err(err) = open(doc, &slot, owner, &src, &alt) {
				tracing::warn!(owner, error = %err, "lightbox failed to open");
			}
		})
	};

	Ok(Some(Cleanup::new(move |doc| {
		doc.remove_event_listener(listener);
		slot.close_owned_by(doc, owner);
	})))
}

fn open(doc: &mut Document, slot: &ModalSlot, owner: u64, src: &str, alt: &str) -> Result<(), DomError> {
	let previous_focus = doc.active_element();

	let overlay = doc.create_element("div");
	doc.set_attribute(overlay, "class", "lightbox-overlay")?;
	doc.set_attribute(overlay, "role", "dialog")?;
	doc.set_attribute(overlay, "aria-modal", "true")?;
	doc.set_attribute(overlay, "aria-label", alt)?;
	doc.set_style(overlay, "cursor", "pointer")?;

	let container = doc.create_element("div");
	doc.set_attribute(container, "class", "lightbox-container")?;

	let close_button = doc.create_element("button");
	doc.set_attribute(close_button, "class", "lightbox-close")?;
	doc.set_attribute(close_button, "aria-label", CLOSE_LABEL)?;
	doc.set_text_content(close_button, "\u{d7}")?;

	let large = doc.create_element("img");
	doc.set_attribute(large, "src", src)?;
	doc.set_attribute(large, "alt", alt)?;
	doc.set_attribute(large, "class", "lightbox-image")?;

	doc.append_child(container, close_button)?;
	doc.append_child(container, large)?;
	doc.append_child(overlay, container)?;
	let body = doc.body();
	doc.append_child(body, overlay)?;

	let mut resources = WidgetResources::new();
	{
		let slot = slot.clone();
		resources.listen(doc, overlay, EventType::Click, move |doc, event| {
			if event.target() == overlay {
				slot.close_owned_by(doc, owner);
			}
		});
	}
	{
		let slot = slot.clone();
		resources.listen(doc, close_button, EventType::Click, move |doc, event| {
			event.stop_propagation();
			slot.close_owned_by(doc, owner);
		});
	}
	{
		let slot = slot.clone();
		resources.listen(doc, NodeId::DOCUMENT, EventType::KeyDown, move |doc, event| {
			match event.key() {
				Some("Escape") => {
					slot.close_owned_by(doc, owner);
				}
				// The close button is the only focusable element.
				Some("Tab") => {
					event.prevent_default();
					if let Err(err) = doc.focus(close_button) {
						tracing::debug!(error = %err, "focus trap lost its target");
					}
				}
				_ => {}
			}
		});
	}

	slot.open(doc, OpenModal {
		owner,
		overlay,
		previous_focus,
		resources,
	});
	doc.focus(close_button)?;
	tracing::debug!(owner, "lightbox opened");
	Ok(())
}
