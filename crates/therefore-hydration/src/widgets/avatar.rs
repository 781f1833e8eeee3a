//! Author avatars with an initials fallback.

use crate::context::HydrationContext;
use crate::registry::InitResult;
use therefore_dom::{Document, NodeId};

/// Initials from the first letters of the first two words, upper-cased.
pub fn initials(name: &str) -> String {
	name.split_whitespace()
		.filter_map(|word| word.chars().next())
		.take(2)
		.flat_map(char::to_uppercase)
		.collect()
}

/// Replaces the marker with an avatar container holding the image and its
/// fallback. The marker leaves the document, so nothing is left to clean up.
pub fn init(doc: &mut Document, _ctx: &mut HydrationContext, element: NodeId) -> InitResult {
	let Some(image) = doc.query(element, "img") else {
		return Ok(None);
	};
	let src = doc.get_attribute(image, "src").unwrap_or_default();
	let alt = doc.get_attribute(image, "alt").unwrap_or_default();

	let container = doc.create_element("div");
	doc.set_attribute(container, "class", "inline-block")?;

	let avatar = doc.create_element("span");
	doc.set_attribute(avatar, "class", "avatar size-16")?;

	let img = doc.create_element("img");
	doc.set_attribute(img, "src", &src)?;
	doc.set_attribute(img, "alt", &alt)?;
	doc.set_attribute(img, "class", "avatar-image")?;
	doc.append_child(avatar, img)?;

	let fallback = doc.create_element("span");
	doc.set_attribute(fallback, "class", "avatar-fallback")?;
	doc.set_text_content(fallback, &initials(&alt))?;
	doc.append_child(avatar, fallback)?;

	doc.append_child(container, avatar)?;
	doc.replace_with(element, container)?;
	Ok(None)
}
