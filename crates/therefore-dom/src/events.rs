//! Event listeners and bubbling dispatch.
//!
//! Listeners are reference-counted closures that receive the document
//! mutably, so a handler can open popovers, move focus or remove other
//! listeners. Dispatch walks from the target up to the top of its tree
//! (the document node when the target is connected).

use crate::document::Document;
use crate::node::NodeId;
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Event types the document dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
	Click,
	KeyDown,
	Change,
	Custom(String),
}

impl EventType {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Click => "click",
			Self::KeyDown => "keydown",
			Self::Change => "change",
			Self::Custom(name) => name,
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A dispatched event.
#[derive(Debug, Clone)]
pub struct Event {
	event_type: EventType,
	target: NodeId,
	current_target: NodeId,
	key: Option<String>,
	shift_key: bool,
	default_prevented: bool,
	propagation_stopped: bool,
}

impl Event {
	pub fn new(event_type: EventType, target: NodeId) -> Self {
		Self {
			event_type,
			target,
			current_target: target,
			key: None,
			shift_key: false,
			default_prevented: false,
			propagation_stopped: false,
		}
	}

	pub fn click(target: NodeId) -> Self {
		Self::new(EventType::Click, target)
	}

	/// A `keydown` carrying a `KeyboardEvent.key` value such as `"Enter"`, `" "` or `"Escape"`.
	pub fn key_down(target: NodeId, key: impl Into<String>) -> Self {
		let mut event = Self::new(EventType::KeyDown, target);
		event.key = Some(key.into());
		event
	}

	/// Sets the shift modifier.
	pub fn with_shift(mut self, shift: bool) -> Self {
		self.shift_key = shift;
		self
	}

	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	pub fn target(&self) -> NodeId {
		self.target
	}

	/// The node whose listener is currently running.
	pub fn current_target(&self) -> NodeId {
		self.current_target
	}

	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	pub fn shift_key(&self) -> bool {
		self.shift_key
	}

	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}

	/// Stops bubbling after the listeners of the current node have run.
	pub fn stop_propagation(&mut self) {
		self.propagation_stopped = true;
	}

	pub fn propagation_stopped(&self) -> bool {
		self.propagation_stopped
	}
}

/// Handle returned by [`Document::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listener callback.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

struct Registration {
	target: NodeId,
	event_type: EventType,
	listener: Listener,
}

/// Registered listeners in registration order.
#[derive(Default)]
pub(crate) struct ListenerTable {
	next_id: u64,
	entries: IndexMap<ListenerId, Registration>,
}

impl fmt::Debug for ListenerTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListenerTable")
			.field("len", &self.entries.len())
			.finish()
	}
}

impl ListenerTable {
	pub(crate) fn add(&mut self, target: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.entries.insert(
			id,
			Registration {
				target,
				event_type,
				listener,
			},
		);
		id
	}

	pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
		self.entries.shift_remove(&id).is_some()
	}

	pub(crate) fn contains(&self, id: ListenerId) -> bool {
		self.entries.contains_key(&id)
	}

	pub(crate) fn matching(&self, target: NodeId, event_type: &EventType) -> Vec<(ListenerId, Listener)> {
		self.entries
			.iter()
			.filter(|(_, r)| r.target == target && r.event_type == *event_type)
			.map(|(id, r)| (*id, Rc::clone(&r.listener)))
			.collect()
	}

	pub(crate) fn count(&self, target: NodeId, event_type: &EventType) -> usize {
		self.entries
			.values()
			.filter(|r| r.target == target && r.event_type == *event_type)
			.count()
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}
}

impl Document {
	/// Attaches a listener and returns its handle.
	pub fn add_event_listener<F>(&mut self, target: NodeId, event_type: EventType, listener: F) -> ListenerId
	where
		F: Fn(&mut Document, &mut Event) + 'static,
	{
		self.listeners.add(target, event_type, Rc::new(listener))
	}

	/// Detaches a listener. Returns `false` if it was already gone.
	pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
		self.listeners.remove(id)
	}

	/// Number of listeners of `event_type` on `target`.
	pub fn listener_count(&self, target: NodeId, event_type: &EventType) -> usize {
		self.listeners.count(target, event_type)
	}

	/// Number of listeners registered anywhere in the document.
	pub fn total_listeners(&self) -> usize {
		self.listeners.len()
	}

	/// Dispatches `event`, bubbling from its target, and returns it after dispatch.
	///
	/// Listeners are snapshotted per node before they run; a listener removed
	/// by an earlier listener of the same dispatch does not fire.
	pub fn dispatch_event(&mut self, mut event: Event) -> Event {
		let path = self.propagation_path(event.target);
		tracing::trace!(
			event = %event.event_type,
			target = %event.target,
			depth = path.len(),
			"dispatching event"
		);

		for node in path {
			event.current_target = node;
			for (id, listener) in self.listeners.matching(node, &event.event_type) {
				if !self.listeners.contains(id) {
					continue;
				}
				listener(self, &mut event);
			}
			if event.propagation_stopped {
				break;
			}
		}

		event
	}

	/// Dispatches a click on `target`.
	pub fn click(&mut self, target: NodeId) -> Event {
		self.dispatch_event(Event::click(target))
	}

	/// Dispatches a keydown with `key` on `target`.
	pub fn key_down(&mut self, target: NodeId, key: &str) -> Event {
		self.dispatch_event(Event::key_down(target, key))
	}

	fn propagation_path(&self, target: NodeId) -> Vec<NodeId> {
		let mut path = vec![target];
		let mut current = target;
		while let Some(parent) = self.parent(current) {
			path.push(parent);
			current = parent;
		}
		path
	}
}
