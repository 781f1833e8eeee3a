//! Cleanup callbacks and the per-cycle cleanup list.

use std::fmt;
use therefore_dom::Document;

/// Tears down one widget instance.
pub struct Cleanup(Box<dyn FnOnce(&mut Document)>);

impl Cleanup {
	pub fn new<F>(f: F) -> Self
	where
		F: FnOnce(&mut Document) + 'static,
	{
		Self(Box::new(f))
	}

	pub fn run(self, doc: &mut Document) {
		(self.0)(doc)
	}

	/// Runs `self`, then `next`.
	pub fn then(self, next: Cleanup) -> Self {
		Self::new(move |doc| {
			self.run(doc);
			next.run(doc);
		})
	}
}

impl fmt::Debug for Cleanup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Cleanup(..)")
	}
}

/// Cleanups registered during one hydration cycle, in registration order.
#[derive(Debug, Default)]
pub struct CleanupStack {
	entries: Vec<(String, Cleanup)>,
}

impl CleanupStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, component: impl Into<String>, cleanup: Cleanup) {
		self.entries.push((component.into(), cleanup));
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Runs every cleanup once, oldest first, and empties the stack.
	pub fn run_all(&mut self, doc: &mut Document) -> usize {
		let entries = std::mem::take(&mut self.entries);
		let count = entries.len();
		for (component, cleanup) in entries {
			tracing::trace!(component = %component, "running cleanup");
			cleanup.run(doc);
		}
		count
	}
}
