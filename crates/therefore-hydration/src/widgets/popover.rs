//! Toggleable popover shared by citations and sidenotes.
//!
//! ```text
//!            click / Enter / Space on trigger
//!   closed  ─────────────────────────────────▶  open
//!          ◀─────────────────────────────────
//!    click / Enter / Space, Escape, click outside root
//! ```

use crate::cleanup::Cleanup;
use crate::resources::WidgetResources;
use std::cell::Cell;
use std::rc::Rc;
use therefore_dom::{Document, DomError, EventType, FrameId, NodeId, Rect};

/// Width cap keeping a centred popover inside narrow viewports.
pub const MAX_WIDTH: &str = "min(20rem, calc(100vw - 2rem))";

/// Vertical side of the trigger the popover is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
	Below,
	Above,
}

/// Picks a side: below when the space under the trigger fits the popover
/// plus `clearance`, or is at least as large as the space above.
pub fn placement(trigger: Rect, popover_height: f64, viewport_height: f64, clearance: f64) -> Placement {
	let space_below = viewport_height - trigger.bottom();
	let space_above = trigger.top;
	if space_below >= popover_height + clearance || space_below >= space_above {
		Placement::Below
	} else {
		Placement::Above
	}
}

/// Creates a hidden popover element, not yet attached to the document.
pub(crate) fn create(doc: &mut Document, id: &str, class: &str) -> Result<NodeId, DomError> {
	let popover = doc.create_element("div");
	doc.set_attribute(popover, "id", id)?;
	doc.set_attribute(popover, "role", "tooltip")?;
	doc.set_attribute(popover, "class", class)?;
	doc.set_style(popover, "display", "none")?;
	doc.set_style(popover, "max-width", MAX_WIDTH)?;
	Ok(popover)
}

/// Everything needed to wire one popover.
#[derive(Debug, Clone)]
pub(crate) struct PopoverParts {
	/// Element whose subtree counts as "inside" for outside-click detection.
	pub root: NodeId,
	pub trigger: NodeId,
	pub popover: NodeId,
	pub show_label: String,
	pub hide_label: String,
	pub clearance_px: f64,
	pub offset_px: f64,
}

struct PopoverState {
	parts: PopoverParts,
	open: Cell<bool>,
	pending_frame: Cell<Option<FrameId>>,
}

impl PopoverState {
	fn set_open(&self, doc: &mut Document, open: bool) {
		let PopoverParts {
			trigger, popover, ..
		} = self.parts;
		self.open.set(open);
		let (display, expanded, label) = if open {
			("block", "true", &self.parts.hide_label)
		} else {
			("none", "false", &self.parts.show_label)
		};
		let applied = doc
			.set_style(popover, "display", display)
			.and_then(|_| doc.set_attribute(trigger, "aria-expanded", expanded))
			.and_then(|_| doc.set_attribute(trigger, "aria-label", label));
		if let Err(err) = applied {
			tracing::warn!(%popover, error = %err, "popover update failed");
		}
	}

	fn position(&self, doc: &mut Document) {
		let PopoverParts {
			trigger, popover, ..
		} = self.parts;
		let offset = format!("{}px", self.parts.offset_px);
		let side = placement(
			doc.bounding_rect(trigger),
			doc.bounding_rect(popover).height,
			doc.viewport().height,
			self.parts.clearance_px,
		);
		let styles: [(&str, &str); 6] = match side {
			Placement::Below => [
				("top", "100%"),
				("bottom", "auto"),
				("margin-top", offset.as_str()),
				("margin-bottom", ""),
				("left", "50%"),
				("transform", "translateX(-50%)"),
			],
			Placement::Above => [
				("bottom", "100%"),
				("top", "auto"),
				("margin-bottom", offset.as_str()),
				("margin-top", ""),
				("left", "50%"),
				("transform", "translateX(-50%)"),
			],
		};
		for (property, value) in styles {
			if let Err(err) = doc.set_style(popover, property, value) {
				tracing::warn!(%popover, error = %err, "popover positioning failed");
				return;
			}
		}
	}
}

fn open(state: &Rc<PopoverState>, doc: &mut Document) {
	state.set_open(doc, true);
	if let Some(frame) = state.pending_frame.take() {
		doc.cancel_animation_frame(frame);
	}
	let deferred = Rc::clone(state);
	let frame = doc.request_animation_frame(move |doc| {
		deferred.pending_frame.set(None);
		if deferred.open.get() {
			deferred.position(doc);
		}
	});
	state.pending_frame.set(Some(frame));
}

fn close(state: &PopoverState, doc: &mut Document) {
	if state.open.get() {
		state.set_open(doc, false);
	}
}

fn toggle(state: &Rc<PopoverState>, doc: &mut Document) {
	if state.open.get() {
		close(state, doc);
	} else {
		open(state, doc);
	}
}

/// Wires the trigger, document listeners and initial ARIA state, and
/// returns the cleanup that removes the listeners and the popover node.
pub(crate) fn attach(doc: &mut Document, parts: PopoverParts, popover_id: &str) -> Result<Cleanup, DomError> {
	let PopoverParts {
		root,
		trigger,
		popover,
		..
	} = parts;

	doc.set_attribute(trigger, "aria-expanded", "false")?;
	doc.set_attribute(trigger, "aria-haspopup", "true")?;
	doc.set_attribute(trigger, "aria-controls", popover_id)?;
	doc.set_attribute(trigger, "aria-label", &parts.show_label)?;

	let state = Rc::new(PopoverState {
		parts,
		open: Cell::new(false),
		pending_frame: Cell::new(None),
	});
	let mut resources = WidgetResources::new();
	resources.adopt_node(popover);

	{
		let state = Rc::clone(&state);
		resources.listen(doc, trigger, EventType::Click, move |doc, event| {
			event.prevent_default();
			event.stop_propagation();
			toggle(&state, doc);
		});
	}
	{
		let state = Rc::clone(&state);
		resources.listen(doc, trigger, EventType::KeyDown, move |doc, event| {
			match event.key() {
				Some("Enter" | " ") => {
					event.prevent_default();
					toggle(&state, doc);
				}
				Some("Escape") => close(&state, doc),
				_ => {}
			}
		});
	}
	{
		let state = Rc::clone(&state);
		resources.listen(doc, NodeId::DOCUMENT, EventType::Click, move |doc, event| {
			if state.open.get() && !doc.contains(root, event.target()) {
				close(&state, doc);
			}
		});
	}
	{
		let state = Rc::clone(&state);
		resources.listen(doc, NodeId::DOCUMENT, EventType::KeyDown, move |doc, event| {
			if event.key() == Some("Escape") {
				close(&state, doc);
			}
		});
	}

	Ok(Cleanup::new(move |doc| {
		if let Some(frame) = state.pending_frame.take() {
			doc.cancel_animation_frame(frame);
		}
		resources.release(doc);
	}))
}
