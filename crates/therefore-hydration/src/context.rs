//! State shared by the initializers of one document.

use crate::citations::CitationRegistry;
use crate::modal::{ModalSlot, ScrollLock};
use std::fmt;
use std::rc::Rc;
use therefore_conf::HydrationSettings;
use therefore_dom::{Navigator, NoopNavigator};

/// Context handed to every initializer.
pub struct HydrationContext {
	citations: CitationRegistry,
	modal: ModalSlot,
	navigator: Rc<dyn Navigator>,
	settings: HydrationSettings,
	next_instance: u64,
}

impl Default for HydrationContext {
	fn default() -> Self {
		Self::new(HydrationSettings::default())
	}
}

impl fmt::Debug for HydrationContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HydrationContext")
			.field("citations", &self.citations)
			.field("modal", &self.modal)
			.field("settings", &self.settings)
			.field("next_instance", &self.next_instance)
			.finish_non_exhaustive()
	}
}

impl HydrationContext {
	/// Creates a context that ignores navigation requests.
	pub fn new(settings: HydrationSettings) -> Self {
		Self {
			citations: CitationRegistry::new(),
			modal: ModalSlot::new(),
			navigator: Rc::new(NoopNavigator),
			settings,
			next_instance: 0,
		}
	}

	pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
		self.navigator = navigator;
		self
	}

	pub fn citations(&self) -> &CitationRegistry {
		&self.citations
	}

	pub fn citations_mut(&mut self) -> &mut CitationRegistry {
		&mut self.citations
	}

	pub fn modal_slot(&self) -> &ModalSlot {
		&self.modal
	}

	pub fn scroll_lock(&self) -> &ScrollLock {
		self.modal.scroll_lock()
	}

	pub fn navigator(&self) -> Rc<dyn Navigator> {
		Rc::clone(&self.navigator)
	}

	pub fn settings(&self) -> &HydrationSettings {
		&self.settings
	}

	/// Returns a fresh id, unique within this context.
	pub fn next_instance_id(&mut self) -> u64 {
		self.next_instance += 1;
		self.next_instance
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_instance_ids_are_unique() {
		let mut ctx = HydrationContext::default();
		let ids: Vec<_> = (0..3).map(|_| ctx.next_instance_id()).collect();
		assert_eq!(ids, vec![1, 2, 3]);
	}

	#[rstest]
	fn test_scroll_lock_is_shared_with_modal_slot() {
		let ctx = HydrationContext::default();
		let mut doc = therefore_dom::Document::new();
		ctx.scroll_lock().lock(&mut doc);
		assert!(ctx.modal_slot().scroll_lock().is_locked());
	}
}
