//! Component registry: marker name → initializer.

use crate::cleanup::Cleanup;
use crate::context::HydrationContext;
use crate::error::HydrationError;
use crate::widgets;
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use therefore_dom::{Document, NodeId};

/// Result of running an initializer.
///
/// `Ok(None)` means the widget allocated nothing (including the case where
/// the markup it needs is missing).
pub type InitResult = Result<Option<Cleanup>, HydrationError>;

/// Turns one marked element into a live widget.
pub type Initializer = Rc<dyn Fn(&mut Document, &mut HydrationContext, NodeId) -> InitResult>;

/// Built-in widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
	Citation,
	Sidenote,
	Lightbox,
	Timeline,
	Avatar,
	ScriptureCompare,
}

impl ComponentKind {
	pub const ALL: [ComponentKind; 6] = [
		Self::Citation,
		Self::Sidenote,
		Self::Lightbox,
		Self::Timeline,
		Self::Avatar,
		Self::ScriptureCompare,
	];

	/// The `data-component` value for this kind.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Citation => "citation",
			Self::Sidenote => "sidenote",
			Self::Lightbox => "lightbox",
			Self::Timeline => "timeline",
			Self::Avatar => "avatar",
			Self::ScriptureCompare => "scripture-compare",
		}
	}

	/// Runs the built-in initializer for this kind.
	pub fn initialize(self, doc: &mut Document, ctx: &mut HydrationContext, element: NodeId) -> InitResult {
		match self {
			Self::Citation => widgets::citation::init(doc, ctx, element),
			Self::Sidenote => widgets::sidenote::init(doc, ctx, element),
			Self::Lightbox => widgets::lightbox::init(doc, ctx, element),
			Self::Timeline => widgets::timeline::init(doc, ctx, element),
			Self::Avatar => widgets::avatar::init(doc, ctx, element),
			Self::ScriptureCompare => widgets::scripture::init(doc, ctx, element),
		}
	}
}

impl fmt::Display for ComponentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a name matches no built-in kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component: {0}")]
pub struct UnknownComponent(pub String);

impl FromStr for ComponentKind {
	type Err = UnknownComponent;

	/// Exact, case-sensitive match.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| UnknownComponent(s.to_string()))
	}
}

/// Maps component names to initializers.
///
/// Lookup is exact-string and case-sensitive.
#[derive(Clone)]
pub struct ComponentRegistry {
	entries: IndexMap<String, Initializer>,
}

impl fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentRegistry")
			.field("components", &self.entries.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl Default for ComponentRegistry {
	fn default() -> Self {
		Self::with_builtin_widgets()
	}
}

impl ComponentRegistry {
	/// An empty registry.
	pub fn empty() -> Self {
		Self {
			entries: IndexMap::new(),
		}
	}

	/// A registry holding every [`ComponentKind`].
	pub fn with_builtin_widgets() -> Self {
		let mut registry = Self::empty();
		for kind in ComponentKind::ALL {
			registry.register_kind(kind);
		}
		registry
	}

	/// Registers the built-in initializer for `kind` under its marker name.
	pub fn register_kind(&mut self, kind: ComponentKind) -> &mut Self {
		self.register(kind.as_str(), move |doc, ctx, element| {
			kind.initialize(doc, ctx, element)
		})
	}

	/// Registers (or replaces) an initializer.
	pub fn register<F>(&mut self, name: impl Into<String>, init: F) -> &mut Self
	where
		F: Fn(&mut Document, &mut HydrationContext, NodeId) -> InitResult + 'static,
	{
		self.entries.insert(name.into(), Rc::new(init));
		self
	}

	pub fn get(&self, name: &str) -> Option<Initializer> {
		self.entries.get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
