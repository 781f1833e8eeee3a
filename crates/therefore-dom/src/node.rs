//! Node payloads and handles for the document tree.

use indexmap::IndexMap;
use std::fmt;

/// Node identifier.
///
/// Identifiers index into the document arena and are never reused, so an id
/// taken before a node was removed keeps pointing at that (now detached) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
	/// The document node. Listeners registered here are document-level listeners.
	pub const DOCUMENT: NodeId = NodeId(0);

	/// Get the raw index
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Element payload: tag name, attributes and inline style.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
	/// Lower-case tag name.
	pub tag: String,
	/// Attributes in insertion order. The `style` attribute is kept in `style`.
	pub attributes: IndexMap<String, String>,
	/// Inline style properties (`element.style`).
	pub style: IndexMap<String, String>,
}

impl ElementData {
	pub(crate) fn new(tag: &str) -> Self {
		Self {
			tag: tag.to_ascii_lowercase(),
			attributes: IndexMap::new(),
			style: IndexMap::new(),
		}
	}

	/// Whitespace-separated entries of the `class` attribute.
	pub fn classes(&self) -> impl Iterator<Item = &str> {
		self.attributes
			.get("class")
			.map(|c| c.split_whitespace())
			.into_iter()
			.flatten()
	}

	pub(crate) fn has_class(&self, class: &str) -> bool {
		self.classes().any(|c| c == class)
	}

	pub(crate) fn style_text(&self) -> String {
		self.style
			.iter()
			.map(|(k, v)| format!("{}: {};", k, v))
			.collect::<Vec<_>>()
			.join(" ")
	}

	pub(crate) fn set_style_text(&mut self, text: &str) {
		self.style.clear();
		for decl in text.split(';') {
			if let Some((prop, value)) = decl.split_once(':') {
				let prop = prop.trim();
				let value = value.trim();
				if !prop.is_empty() && !value.is_empty() {
					self.style.insert(prop.to_string(), value.to_string());
				}
			}
		}
	}
}

/// What a node holds.
#[derive(Debug, Clone)]
pub enum NodeData {
	/// The document node (always [`NodeId::DOCUMENT`]).
	Document,
	/// An element.
	Element(ElementData),
	/// A text node.
	Text(String),
}

/// Value stored in each tree slot: the stable handle plus the payload.
#[derive(Debug, Clone)]
pub(crate) struct Node {
	pub(crate) id: NodeId,
	pub(crate) data: NodeData,
}

impl Node {
	pub(crate) fn new(id: NodeId, data: NodeData) -> Self {
		Self { id, data }
	}

	pub(crate) fn element(&self) -> Option<&ElementData> {
		match &self.data {
			NodeData::Element(el) => Some(el),
			_ => None,
		}
	}
}
