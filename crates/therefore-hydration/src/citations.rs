//! Page-wide citation numbering and the citations accordion.

use crate::error::HydrationError;
use therefore_dom::{Document, NodeId};

/// One registered citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationEntry {
	/// 1-based, contiguous, in first-seen order.
	pub number: u32,
	pub text: String,
	/// Empty when the citation has no source link.
	pub url: String,
	element: NodeId,
}

/// Citations seen on the current page.
///
/// Numbers are handed out in registration order. Registering an element
/// that already has a number returns that number, so re-hydrating the same
/// markup after a cleanup keeps the numbering stable. Call
/// [`reset`](Self::reset) when leaving a post.
#[derive(Debug, Default)]
pub struct CitationRegistry {
	entries: Vec<CitationEntry>,
	accordion: Option<NodeId>,
}

impl CitationRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Assigns the citation on `element` its number.
	pub fn register(&mut self, element: NodeId, text: &str, url: &str) -> u32 {
		if let Some(number) = self.number_of(element) {
			return number;
		}
		let number = self.entries.len() as u32 + 1;
		self.entries.push(CitationEntry {
			number,
			text: text.to_string(),
			url: url.to_string(),
			element,
		});
		number
	}

	/// Takes back the number just handed to `element`. Only the most recent
	/// registration can be withdrawn, so numbering stays contiguous.
	pub fn withdraw(&mut self, element: NodeId) -> bool {
		if self.entries.last().is_some_and(|e| e.element == element) {
			self.entries.pop();
			return true;
		}
		false
	}

	pub fn number_of(&self, element: NodeId) -> Option<u32> {
		self.entries
			.iter()
			.find(|e| e.element == element)
			.map(|e| e.number)
	}

	pub fn entries(&self) -> &[CitationEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The rendered accordion, if any.
	pub fn accordion(&self) -> Option<NodeId> {
		self.accordion
	}

	/// Renders every registered citation as a collapsible ordered list and
	/// appends it to the first `.content` descendant of `container` (or to
	/// `container` itself).
	///
	/// Returns `None` when no citations are registered. A previously rendered
	/// accordion is replaced.
	pub fn build_accordion(&mut self, doc: &mut Document, container: NodeId) -> Result<Option<NodeId>, HydrationError> {
		if self.entries.is_empty() {
			return Ok(None);
		}
		self.remove_accordion(doc);

		let target = doc.query(container, ".content").unwrap_or(container);

		let details = doc.create_element("details");
		doc.set_attribute(details, "class", "citations-accordion")?;

		let summary = doc.create_element("summary");
		doc.set_text_content(summary, &format!("Citations ({})", self.entries.len()))?;
		doc.append_child(details, summary)?;

		let list = doc.create_element("ol");
		doc.set_attribute(list, "class", "citations-list")?;
		for entry in &self.entries {
			let item = doc.create_element("li");

			let number = doc.create_element("span");
			doc.set_attribute(number, "class", "citation-number")?;
			doc.set_text_content(number, &format!("[{}]", entry.number))?;
			doc.append_child(item, number)?;

			let body = if entry.url.is_empty() {
				doc.create_element("span")
			} else {
				let link = doc.create_element("a");
				doc.set_attribute(link, "href", &entry.url)?;
				doc.set_attribute(link, "target", "_blank")?;
				doc.set_attribute(link, "rel", "noopener noreferrer")?;
				link
			};
			doc.set_text_content(body, &entry.text)?;
			doc.append_child(item, body)?;

			doc.append_child(list, item)?;
		}
		doc.append_child(details, list)?;
		doc.append_child(target, details)?;

		tracing::debug!(citations = self.entries.len(), "citations accordion built");
		self.accordion = Some(details);
		Ok(Some(details))
	}

	fn remove_accordion(&mut self, doc: &mut Document) {
		if let Some(accordion) = self.accordion.take()
			&& let Err(err) = doc.remove(accordion)
		{
			tracing::debug!(error = %err, "accordion already gone");
		}
	}

	/// Forgets every citation and removes the rendered accordion.
	pub fn reset(&mut self, doc: &mut Document) {
		self.entries.clear();
		self.remove_accordion(doc);
	}
}
