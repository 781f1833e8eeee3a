//! Bookkeeping for what a widget instance allocated.
//!
//! Every listener, timer and created node goes through [`WidgetResources`]
//! so that teardown can retire all of them in one call.

use crate::cleanup::Cleanup;
use therefore_dom::{Document, Event, EventType, ListenerId, NodeId, TimerId};

/// Listeners, timers and nodes owned by one widget instance.
#[derive(Debug, Default)]
pub struct WidgetResources {
	listeners: Vec<ListenerId>,
	timers: Vec<TimerId>,
	nodes: Vec<NodeId>,
}

impl WidgetResources {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches a listener and records it.
	pub fn listen<F>(&mut self, doc: &mut Document, target: NodeId, event_type: EventType, listener: F) -> ListenerId
	where
		F: Fn(&mut Document, &mut Event) + 'static,
	{
		let id = doc.add_event_listener(target, event_type, listener);
		self.listeners.push(id);
		id
	}

	/// Schedules a timer and records it.
	pub fn set_timeout<F>(&mut self, doc: &mut Document, delay_ms: u64, task: F) -> TimerId
	where
		F: FnOnce(&mut Document) + 'static,
	{
		let id = doc.set_timeout(delay_ms, task);
		self.timers.push(id);
		id
	}

	/// Records a node the widget created; it is detached on release.
	pub fn adopt_node(&mut self, node: NodeId) {
		self.nodes.push(node);
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty() && self.timers.is_empty() && self.nodes.is_empty()
	}

	/// Removes listeners, cancels pending timers and detaches created nodes.
	pub fn release(self, doc: &mut Document) {
		for id in self.listeners {
			doc.remove_event_listener(id);
		}
		for id in self.timers {
			doc.clear_timeout(id);
		}
		for node in self.nodes {
			if let Err(err) = doc.remove(node) {
				tracing::debug!(%node, error = %err, "created node already gone");
			}
		}
	}

	pub fn into_cleanup(self) -> Cleanup {
		Cleanup::new(move |doc| self.release(doc))
	}
}
