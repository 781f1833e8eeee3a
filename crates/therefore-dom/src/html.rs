//! HTML import (via `scraper`) and serialization.

use crate::document::Document;
use crate::node::{NodeData, NodeId};
use ego_tree::NodeRef;
use scraper::Html;

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Parses `html` as a fragment and appends the result under `parent`.
pub(crate) fn parse_into(doc: &mut Document, parent: NodeId, html: &str) {
	let fragment = Html::parse_fragment(html);
	for child in fragment.root_element().children() {
		import(doc, parent, child);
	}
}

fn import(doc: &mut Document, parent: NodeId, source: NodeRef<'_, scraper::Node>) {
	let id = match source.value() {
		scraper::Node::Element(el) => {
			let id = doc.create_element(el.name());
			for (name, value) in el.attrs() {
				// Fresh element; cannot fail.
				let _ = doc.set_attribute(id, name, value);
			}
			id
		}
		scraper::Node::Text(text) => doc.create_text(text),
		_ => return,
	};
	if doc.append_child(parent, id).is_err() {
		return;
	}
	for child in source.children() {
		import(doc, id, child);
	}
}

fn escape_text(text: &str, out: &mut String) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			c => out.push(c),
		}
	}
}

fn escape_attr(value: &str, out: &mut String) {
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'"' => out.push_str("&quot;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			c => out.push(c),
		}
	}
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
	match doc.data(id) {
		Some(NodeData::Text(text)) => escape_text(text, out),
		Some(NodeData::Element(el)) => {
			out.push('<');
			out.push_str(&el.tag);
			for (name, value) in &el.attributes {
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				escape_attr(value, out);
				out.push('"');
			}
			if !el.style.is_empty() {
				out.push_str(" style=\"");
				escape_attr(&el.style_text(), out);
				out.push('"');
			}
			out.push('>');
			if VOID_ELEMENTS.contains(&el.tag.as_str()) {
				return;
			}
			write_children(doc, id, out);
			out.push_str("</");
			out.push_str(&el.tag);
			out.push('>');
		}
		Some(NodeData::Document) => write_children(doc, id, out),
		None => {}
	}
}

fn write_children(doc: &Document, id: NodeId, out: &mut String) {
	for child in doc.children(id) {
		write_node(doc, child, out);
	}
}

pub(crate) fn serialize_node(doc: &Document, id: NodeId) -> String {
	let mut out = String::new();
	write_node(doc, id, &mut out);
	out
}

pub(crate) fn serialize_children(doc: &Document, id: NodeId) -> String {
	let mut out = String::new();
	write_children(doc, id, &mut out);
	out
}
