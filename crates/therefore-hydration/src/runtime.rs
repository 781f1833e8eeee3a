//! Hydration Runtime
//!
//! Scans a container for component markers, runs the matching initializer
//! once per element and keeps the returned cleanups until the next
//! teardown.
//!
//! ```text
//!   hydrate(container)           cleanup_all()
//!   ───────────────────▶ flagged ─────────────▶ unflagged
//!        ▲   │ hydrate again: skipped               │
//!        │   └───────────┘                          │
//!        └──────────────────────────────────────────┘
//! ```

use crate::cleanup::CleanupStack;
use crate::context::HydrationContext;
use crate::error::HydrationError;
use crate::markers::{self, HYDRATED_ATTR, HYDRATED_VALUE, Marker};
use crate::registry::{ComponentRegistry, InitResult};
use crate::widgets;
use std::fmt;
use therefore_dom::{Document, NodeId};

pub use crate::markers::is_hydrated;

/// Component name reported for tag links, which carry no marker.
pub const TAG_LINK_COMPONENT: &str = "tag-link";

/// An element whose initializer returned an error.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedComponent {
	pub element: NodeId,
	pub component: String,
	pub error: HydrationError,
}

/// Outcome of one [`HydrationRuntime::hydrate`] pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationReport {
	/// Marked elements initialized by this pass.
	pub hydrated: usize,
	/// Elements (markers and tag links) already flagged by an earlier pass.
	pub skipped: usize,
	/// Marker names with no registered initializer, in document order.
	pub unknown: Vec<String>,
	pub failed: Vec<FailedComponent>,
	/// Tag links enhanced by this pass.
	pub tag_links: usize,
}

impl HydrationReport {
	/// True when nothing was left unknown or failed.
	pub fn is_clean(&self) -> bool {
		self.unknown.is_empty() && self.failed.is_empty()
	}
}

type CompletionObserver = Box<dyn Fn(&HydrationReport)>;

/// Drives hydration for one document.
pub struct HydrationRuntime {
	registry: ComponentRegistry,
	context: HydrationContext,
	cleanups: CleanupStack,
	flagged: Vec<NodeId>,
	observers: Vec<CompletionObserver>,
}

impl Default for HydrationRuntime {
	fn default() -> Self {
		Self::new(ComponentRegistry::default(), HydrationContext::default())
	}
}

impl fmt::Debug for HydrationRuntime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HydrationRuntime")
			.field("registry", &self.registry)
			.field("context", &self.context)
			.field("cleanups", &self.cleanups.len())
			.field("flagged", &self.flagged.len())
			.field("observers", &self.observers.len())
			.finish()
	}
}

impl HydrationRuntime {
	pub fn new(registry: ComponentRegistry, context: HydrationContext) -> Self {
		Self {
			registry,
			context,
			cleanups: CleanupStack::new(),
			flagged: Vec::new(),
			observers: Vec::new(),
		}
	}

	pub fn registry(&self) -> &ComponentRegistry {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
		&mut self.registry
	}

	pub fn context(&self) -> &HydrationContext {
		&self.context
	}

	pub fn context_mut(&mut self) -> &mut HydrationContext {
		&mut self.context
	}

	/// Cleanups waiting for the next [`cleanup_all`](Self::cleanup_all).
	pub fn pending_cleanups(&self) -> usize {
		self.cleanups.len()
	}

	/// Registers a callback run with the report after every pass.
	pub fn on_complete<F>(&mut self, observer: F)
	where
		F: Fn(&HydrationReport) + 'static,
	{
		self.observers.push(Box::new(observer));
	}

	/// Hydrates every marked descendant of `container`, then every tag link.
	///
	/// Elements flagged by an earlier pass are skipped. An initializer error
	/// is logged and recorded in the report; the element stays unflagged and
	/// the pass moves on.
	#[tracing::instrument(level = "debug", skip(self, doc), fields(container = %container))]
	pub fn hydrate(&mut self, doc: &mut Document, container: NodeId) -> HydrationReport {
		let mut report = HydrationReport::default();

		for Marker { element, component } in markers::find_markers(doc, container) {
			if is_hydrated(doc, element) {
				report.skipped += 1;
				continue;
			}
			let Some(init) = self.registry.get(&component) else {
				tracing::warn!(component = %component, %element, "unknown component");
				report.unknown.push(component);
				continue;
			};
			let result = init(doc, &mut self.context, element);
			if self.settle(doc, element, &component, result, &mut report) {
				report.hydrated += 1;
			}
		}

		for link in markers::find_tag_links(doc, container) {
			if is_hydrated(doc, link) {
				report.skipped += 1;
				continue;
			}
			let result = widgets::tag_link::init(doc, &mut self.context, link);
			if self.settle(doc, link, TAG_LINK_COMPONENT, result, &mut report) {
				report.tag_links += 1;
			}
		}

		tracing::info!(
			hydrated = report.hydrated,
			skipped = report.skipped,
			tag_links = report.tag_links,
			unknown = report.unknown.len(),
			failed = report.failed.len(),
			"hydration pass complete"
		);
		for observer in &self.observers {
			observer(&report);
		}
		report
	}

	/// Records the outcome of one initializer. Returns `true` on success.
	fn settle(
		&mut self,
		doc: &mut Document,
		element: NodeId,
		component: &str,
		result: InitResult,
		report: &mut HydrationReport,
	) -> bool {
		match result {
			Ok(cleanup) => {
				if let Some(cleanup) = cleanup {
					self.cleanups.push(component, cleanup);
				}
				match doc.set_attribute(element, HYDRATED_ATTR, HYDRATED_VALUE) {
					Ok(()) => self.flagged.push(element),
					Err(err) => tracing::warn!(%element, error = %err, "could not flag element"),
				}
				tracing::debug!(component, %element, "hydrated");
				true
			}
			Err(error) => {
				tracing::warn!(component, %element, error = %error, "component failed to hydrate");
				report.failed.push(FailedComponent {
					element,
					component: component.to_string(),
					error,
				});
				false
			}
		}
	}

	/// Runs every stored cleanup in registration order, then clears the
	/// hydrated flag on every element this runtime flagged. Returns the
	/// number of cleanups run; calling it with nothing registered is a no-op.
	pub fn cleanup_all(&mut self, doc: &mut Document) -> usize {
		let ran = self.cleanups.run_all(doc);
		for element in self.flagged.drain(..) {
			if let Err(err) = doc.remove_attribute(element, HYDRATED_ATTR) {
				tracing::debug!(%element, error = %err, "flagged element gone");
			}
		}
		tracing::debug!(cleanups = ran, "hydration cycle torn down");
		ran
	}

	/// Renders the citations accordion for the citations hydrated so far.
	pub fn build_citation_accordion(
		&mut self,
		doc: &mut Document,
		container: NodeId,
	) -> Result<Option<NodeId>, HydrationError> {
		self.context.citations_mut().build_accordion(doc, container)
	}

	/// Forgets page citations and removes the accordion. Call when leaving a post.
	pub fn reset_citations(&mut self, doc: &mut Document) {
		self.context.citations_mut().reset(doc);
	}
}
