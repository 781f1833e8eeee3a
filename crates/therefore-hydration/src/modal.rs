//! Document-wide modal state: the body scroll lock and the single open-modal slot.

use crate::resources::WidgetResources;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use therefore_dom::{Document, NodeId};

#[derive(Debug, Default)]
struct ScrollLockState {
	held: bool,
	previous_overflow: Option<String>,
}

/// Suspends page scrolling by setting `overflow: hidden` on `<body>`.
///
/// Cloning yields another handle to the same lock. Locking twice or
/// unlocking an unheld lock is a no-op, and unlocking restores the exact
/// inline `overflow` value seen when the lock was taken.
#[derive(Clone, Default)]
pub struct ScrollLock {
	state: Rc<RefCell<ScrollLockState>>,
}

impl fmt::Debug for ScrollLock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ScrollLock")
			.field("held", &self.is_locked())
			.finish()
	}
}

impl ScrollLock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_locked(&self) -> bool {
		self.state.borrow().held
	}

	/// Takes the lock. Returns `false` if it was already held.
	pub fn lock(&self, doc: &mut Document) -> bool {
		let mut state = self.state.borrow_mut();
		if state.held {
			return false;
		}
		let body = doc.body();
		state.previous_overflow = doc.style(body, "overflow").map(str::to_string);
		if let Err(err) = doc.set_style(body, "overflow", "hidden") {
			tracing::warn!(error = %err, "could not lock body scrolling");
			return false;
		}
		state.held = true;
		true
	}

	/// Releases the lock. Returns `false` if it was not held.
	pub fn unlock(&self, doc: &mut Document) -> bool {
		let mut state = self.state.borrow_mut();
		if !state.held {
			return false;
		}
		let body = doc.body();
		let previous = state.previous_overflow.take().unwrap_or_default();
		if let Err(err) = doc.set_style(body, "overflow", &previous) {
			tracing::warn!(error = %err, "could not restore body scrolling");
		}
		state.held = false;
		true
	}
}

/// An open modal occupying the slot.
#[derive(Debug)]
pub struct OpenModal {
	/// Widget instance that opened the modal.
	pub owner: u64,
	/// Root node of the overlay.
	pub overlay: NodeId,
	/// Element focused before the modal opened.
	pub previous_focus: Option<NodeId>,
	/// Listeners and nodes the overlay owns.
	pub resources: WidgetResources,
}

#[derive(Default)]
struct SlotState {
	current: Option<OpenModal>,
}

/// The single "current modal" of a document.
///
/// Opening a modal while another is open closes the old one first, so the
/// scroll lock is taken and released exactly once per open modal.
#[derive(Clone, Default)]
pub struct ModalSlot {
	state: Rc<RefCell<SlotState>>,
	scroll_lock: ScrollLock,
}

impl fmt::Debug for ModalSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModalSlot")
			.field("owner", &self.owner())
			.field("scroll_lock", &self.scroll_lock)
			.finish()
	}
}

impl ModalSlot {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn scroll_lock(&self) -> &ScrollLock {
		&self.scroll_lock
	}

	pub fn is_open(&self) -> bool {
		self.state.borrow().current.is_some()
	}

	/// Instance id of the widget whose modal is open.
	pub fn owner(&self) -> Option<u64> {
		self.state.borrow().current.as_ref().map(|m| m.owner)
	}

	pub fn overlay(&self) -> Option<NodeId> {
		self.state.borrow().current.as_ref().map(|m| m.overlay)
	}

	/// Installs `modal`, closing any modal already open, and locks scrolling.
	pub fn open(&self, doc: &mut Document, modal: OpenModal) {
		self.close(doc);
		self.scroll_lock.lock(doc);
		self.state.borrow_mut().current = Some(modal);
	}

	/// Closes the open modal: releases its resources, unlocks scrolling and
	/// returns focus to where it was. Returns `false` if nothing was open.
	pub fn close(&self, doc: &mut Document) -> bool {
		let Some(modal) = self.state.borrow_mut().current.take() else {
			return false;
		};
		let overlay = modal.overlay;
		modal.resources.release(doc);
		if let Err(err) = doc.remove(overlay) {
			tracing::debug!(%overlay, error = %err, "overlay already gone");
		}
		self.scroll_lock.unlock(doc);
		match modal.previous_focus {
			Some(node) if doc.is_connected(node) => {
				if doc.focus(node).is_err() {
					doc.blur();
				}
			}
			_ => doc.blur(),
		}
		tracing::debug!(owner = modal.owner, "modal closed");
		true
	}

	/// Closes the modal only if `owner` opened it.
	pub fn close_owned_by(&self, doc: &mut Document, owner: u64) -> bool {
		if self.owner() == Some(owner) {
			self.close(doc)
		} else {
			false
		}
	}
}
