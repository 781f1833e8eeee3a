//! The document tree.
//!
//! Structure lives in an [`ego_tree::Tree`]; [`NodeId`] handles map onto its
//! slots so ids stay stable across detach and re-insert.

use crate::error::DomError;
use crate::events::ListenerTable;
use crate::geometry::{Rect, Size};
use crate::node::{ElementData, Node, NodeData, NodeId};
use crate::scheduler::Scheduler;
use crate::selector::Selector;
use ego_tree::{NodeMut, NodeRef, Tree};
use std::collections::HashMap;

/// An in-memory document: node tree plus the browser-side state hydration
/// depends on (listeners, focus, geometry, frames and timers).
#[derive(Debug)]
pub struct Document {
	tree: Tree<Node>,
	handles: Vec<ego_tree::NodeId>,
	html: NodeId,
	body: NodeId,
	focused: Option<NodeId>,
	viewport: Size,
	rects: HashMap<NodeId, Rect>,
	pub(crate) listeners: ListenerTable,
	pub(crate) scheduler: Scheduler,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates a document containing `<html><body></body></html>`.
	pub fn new() -> Self {
		let tree = Tree::new(Node::new(NodeId::DOCUMENT, NodeData::Document));
		let root = tree.root().id();
		let mut doc = Self {
			tree,
			handles: vec![root],
			html: NodeId::DOCUMENT,
			body: NodeId::DOCUMENT,
			focused: None,
			viewport: Size::default(),
			rects: HashMap::new(),
			listeners: ListenerTable::default(),
			scheduler: Scheduler::default(),
		};
		let html = doc.create_element("html");
		let body = doc.create_element("body");
		// Fresh elements under the document node; cannot fail.
		let _ = doc.append_child(NodeId::DOCUMENT, html);
		let _ = doc.append_child(html, body);
		doc.html = html;
		doc.body = body;
		doc
	}

	/// Creates a document whose body holds the parsed `html`.
	pub fn from_body_html(html: &str) -> Self {
		let mut doc = Self::new();
		let body = doc.body;
		crate::html::parse_into(&mut doc, body, html);
		doc
	}

	pub fn document_element(&self) -> NodeId {
		self.html
	}

	pub fn body(&self) -> NodeId {
		self.body
	}

	fn handle(&self, id: NodeId) -> Result<ego_tree::NodeId, DomError> {
		self.handles
			.get(id.index())
			.copied()
			.ok_or(DomError::UnknownNode(id))
	}

	fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
		let handle = self.handle(id).ok()?;
		self.tree.get(handle)
	}

	fn node_mut(&mut self, id: NodeId) -> Result<NodeMut<'_, Node>, DomError> {
		let handle = self.handle(id)?;
		self.tree.get_mut(handle).ok_or(DomError::UnknownNode(id))
	}

	fn with_element<R>(&mut self, id: NodeId, f: impl FnOnce(&mut ElementData) -> R) -> Result<R, DomError> {
		let mut node = self.node_mut(id)?;
		match &mut node.value().data {
			NodeData::Element(el) => Ok(f(el)),
			_ => Err(DomError::NotAnElement(id)),
		}
	}

	fn push(&mut self, data: NodeData) -> NodeId {
		let id = NodeId(self.handles.len() as u32);
		let handle = self.tree.orphan(Node::new(id, data)).id();
		self.handles.push(handle);
		id
	}

	/// Returns the node's payload.
	pub fn data(&self, id: NodeId) -> Option<&NodeData> {
		self.node(id).map(|n| &n.value().data)
	}

	pub fn element(&self, id: NodeId) -> Option<&ElementData> {
		self.node(id).and_then(|n| n.value().element())
	}

	pub fn is_element(&self, id: NodeId) -> bool {
		self.element(id).is_some()
	}

	pub fn tag_name(&self, id: NodeId) -> Option<&str> {
		self.element(id).map(|el| el.tag.as_str())
	}

	// ---- construction & tree mutation -------------------------------------

	pub fn create_element(&mut self, tag: &str) -> NodeId {
		self.push(NodeData::Element(ElementData::new(tag)))
	}

	pub fn create_text(&mut self, text: &str) -> NodeId {
		self.push(NodeData::Text(text.to_string()))
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.node(id)?.parent().map(|p| p.value().id)
	}

	pub fn children(&self, id: NodeId) -> Vec<NodeId> {
		self.node(id)
			.map(|n| n.children().map(|c| c.value().id).collect())
			.unwrap_or_default()
	}

	pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
		self.node(id)
			.map(|n| {
				n.children()
					.filter(|c| c.value().element().is_some())
					.map(|c| c.value().id)
					.collect()
			})
			.unwrap_or_default()
	}

	/// True when `node` is `ancestor` or one of its descendants.
	pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
		if ancestor == node {
			return true;
		}
		self.node(node)
			.is_some_and(|n| n.ancestors().any(|a| a.value().id == ancestor))
	}

	/// True when the node is reachable from the document node.
	pub fn is_connected(&self, id: NodeId) -> bool {
		self.node(id).is_some() && self.contains(NodeId::DOCUMENT, id)
	}

	fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
		let parent_node = self.node(parent).ok_or(DomError::UnknownNode(parent))?;
		let child_node = self.node(child).ok_or(DomError::UnknownNode(child))?;
		if matches!(parent_node.value().data, NodeData::Text(_)) {
			return Err(DomError::HierarchyRequest {
				parent,
				child,
				reason: "text nodes cannot have children",
			});
		}
		if matches!(child_node.value().data, NodeData::Document) {
			return Err(DomError::HierarchyRequest {
				parent,
				child,
				reason: "the document node cannot be inserted",
			});
		}
		if self.contains(child, parent) {
			return Err(DomError::HierarchyRequest {
				parent,
				child,
				reason: "a node cannot be inserted into itself or its descendants",
			});
		}
		Ok(())
	}

	/// Detaches `id` from its parent. A no-op for nodes already detached.
	pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
		self.node_mut(id)?.detach();
		if let Some(focused) = self.focused
			&& self.contains(id, focused)
		{
			self.focused = None;
		}
		Ok(())
	}

	/// Appends `child` to `parent`, moving it if it is already attached elsewhere.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
		self.check_insert(parent, child)?;
		self.remove(child)?;
		let child = self.handle(child)?;
		self.node_mut(parent)?.append_id(child);
		Ok(())
	}

	/// Inserts `child` before `reference` under `parent`.
	pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<(), DomError> {
		self.check_insert(parent, child)?;
		if self.parent(reference) != Some(parent) {
			return Err(DomError::HierarchyRequest {
				parent,
				child,
				reason: "reference node is not a child of parent",
			});
		}
		if child == reference {
			return Ok(());
		}
		self.remove(child)?;
		let child = self.handle(child)?;
		self.node_mut(reference)?.insert_id_before(child);
		Ok(())
	}

	/// Puts `replacement` where `old` was. `old` ends up detached.
	pub fn replace_with(&mut self, old: NodeId, replacement: NodeId) -> Result<(), DomError> {
		if old == replacement {
			return self.node(old).map(|_| ()).ok_or(DomError::UnknownNode(old));
		}
		let Some(parent) = self.parent(old) else {
			self.node(old).ok_or(DomError::UnknownNode(old))?;
			return self.remove(replacement);
		};
		self.insert_before(parent, replacement, old)?;
		self.remove(old)
	}

	fn remove_children(&mut self, id: NodeId) -> Result<(), DomError> {
		self.node(id).ok_or(DomError::UnknownNode(id))?;
		for child in self.children(id) {
			self.remove(child)?;
		}
		Ok(())
	}

	/// Concatenated text of all descendant text nodes.
	pub fn text_content(&self, id: NodeId) -> String {
		let Some(node) = self.node(id) else {
			return String::new();
		};
		node.descendants()
			.filter_map(|n| match &n.value().data {
				NodeData::Text(text) => Some(text.as_str()),
				_ => None,
			})
			.collect()
	}

	/// Replaces all children with a single text node (none for an empty string).
	pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
		if let NodeData::Text(existing) = &mut self.node_mut(id)?.value().data {
			*existing = text.to_string();
			return Ok(());
		}
		self.remove_children(id)?;
		if !text.is_empty() {
			let node = self.create_text(text);
			self.append_child(id, node)?;
		}
		Ok(())
	}

	/// Replaces all children with the parsed `html` fragment.
	pub fn set_inner_html(&mut self, id: NodeId, html: &str) -> Result<(), DomError> {
		self.with_element(id, |_| ())?;
		self.remove_children(id)?;
		crate::html::parse_into(self, id, html);
		Ok(())
	}

	pub fn inner_html(&self, id: NodeId) -> String {
		crate::html::serialize_children(self, id)
	}

	pub fn outer_html(&self, id: NodeId) -> String {
		crate::html::serialize_node(self, id)
	}

	// ---- attributes, classes, style ---------------------------------------

	pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
		let el = self.element(id)?;
		if name == "style" {
			return (!el.style.is_empty()).then(|| el.style_text());
		}
		el.attributes.get(name).cloned()
	}

	pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
		self.get_attribute(id, name).is_some()
	}

	pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
		self.with_element(id, |el| {
			if name == "style" {
				el.set_style_text(value);
			} else {
				el.attributes.insert(name.to_string(), value.to_string());
			}
		})
	}

	pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
		self.with_element(id, |el| {
			if name == "style" {
				el.style.clear();
			} else {
				el.attributes.shift_remove(name);
			}
		})
	}

	/// Reads `data-<key>` (`key` in kebab case).
	pub fn data_attribute(&self, id: NodeId, key: &str) -> Option<String> {
		self.get_attribute(id, &format!("data-{}", key))
	}

	pub fn has_class(&self, id: NodeId, class: &str) -> bool {
		self.element(id).is_some_and(|el| el.has_class(class))
	}

	pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
		self.with_element(id, |el| {
			if el.has_class(class) {
				return;
			}
			let mut classes: Vec<&str> = el.classes().collect();
			classes.push(class);
			let joined = classes.join(" ");
			el.attributes.insert("class".to_string(), joined);
		})
	}

	pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
		self.with_element(id, |el| {
			if !el.has_class(class) {
				return;
			}
			let joined = el
				.classes()
				.filter(|c| *c != class)
				.collect::<Vec<_>>()
				.join(" ");
			el.attributes.insert("class".to_string(), joined);
		})
	}

	/// Reads an inline style property.
	pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
		self.element(id)?.style.get(property).map(String::as_str)
	}

	/// Sets an inline style property; an empty value removes it, like
	/// assigning `""` through CSSOM.
	pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<(), DomError> {
		self.with_element(id, |el| {
			if value.is_empty() {
				el.style.shift_remove(property);
			} else {
				el.style.insert(property.to_string(), value.to_string());
			}
		})
	}

	// ---- queries ----------------------------------------------------------

	/// Descendants of `root` (excluding `root`) in document order.
	pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
		self.node(root)
			.map(|n| n.descendants().skip(1).map(|d| d.value().id).collect())
			.unwrap_or_default()
	}

	pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
		self.element(id).is_some_and(|el| selector.matches(el))
	}

	pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
		let node = self.node(root)?;
		node.descendants()
			.skip(1)
			.find(|d| d.value().element().is_some_and(|el| selector.matches(el)))
			.map(|d| d.value().id)
	}

	pub fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|id| self.matches(*id, selector))
			.collect()
	}

	/// [`query_selector`](Self::query_selector) with a selector string.
	/// Invalid selectors match nothing.
	pub fn query(&self, root: NodeId, selector: &str) -> Option<NodeId> {
		let selector = Selector::parse(selector).ok()?;
		self.query_selector(root, &selector)
	}

	/// [`query_selector_all`](Self::query_selector_all) with a selector string.
	/// Invalid selectors match nothing.
	pub fn query_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
		match Selector::parse(selector) {
			Ok(selector) => self.query_selector_all(root, &selector),
			Err(_) => Vec::new(),
		}
	}

	/// Finds an element by `id` attribute anywhere in the tree rooted at the document.
	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.query_selector(NodeId::DOCUMENT, &Selector::id(id))
	}

	// ---- focus & geometry -------------------------------------------------

	pub fn focus(&mut self, id: NodeId) -> Result<(), DomError> {
		self.with_element(id, |_| ())?;
		self.focused = Some(id);
		Ok(())
	}

	pub fn blur(&mut self) {
		self.focused = None;
	}

	pub fn active_element(&self) -> Option<NodeId> {
		self.focused
	}

	pub fn viewport(&self) -> Size {
		self.viewport
	}

	pub fn set_viewport(&mut self, size: Size) {
		self.viewport = size;
	}

	/// Last rectangle reported for the node; zero-sized when none was reported.
	pub fn bounding_rect(&self, id: NodeId) -> Rect {
		self.rects.get(&id).copied().unwrap_or_default()
	}

	pub fn set_bounding_rect(&mut self, id: NodeId, rect: Rect) {
		self.rects.insert(id, rect);
	}
}
