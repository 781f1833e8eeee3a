//! Hydration markers in server-rendered markup.
//!
//! ```text
//! <span data-component="sidenote" data-sidenote-content="...">   <- marker
//!   <button class="sidenote-trigger">1</button>
//! </span>
//!
//! after hydration:
//! <span data-component="sidenote" ... data-hydrated="true">
//! ```

use therefore_dom::{Document, NodeId, Selector};

/// Attribute naming the component an element should become.
pub const COMPONENT_ATTR: &str = "data-component";

/// Attribute recording that an element has been hydrated.
pub const HYDRATED_ATTR: &str = "data-hydrated";

/// Value written to [`HYDRATED_ATTR`].
pub const HYDRATED_VALUE: &str = "true";

/// Server-rendered tag links, enhanced without a component marker.
pub const TAG_LINK_SELECTOR: &str = "a.tag-link";

/// A marked element found in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
	pub element: NodeId,
	pub component: String,
}

/// Finds every descendant of `container` carrying a non-empty component
/// marker, in document order.
pub fn find_markers(doc: &Document, container: NodeId) -> Vec<Marker> {
	doc.query_selector_all(container, &Selector::attr(COMPONENT_ATTR))
		.into_iter()
		.filter_map(|element| {
			let component = doc.get_attribute(element, COMPONENT_ATTR)?;
			(!component.is_empty()).then_some(Marker { element, component })
		})
		.collect()
}

/// Tag links under `container`, in document order.
pub fn find_tag_links(doc: &Document, container: NodeId) -> Vec<NodeId> {
	doc.query_all(container, TAG_LINK_SELECTOR)
}

/// True when the element carries any hydrated flag.
pub fn is_hydrated(doc: &Document, element: NodeId) -> bool {
	doc.get_attribute(element, HYDRATED_ATTR)
		.is_some_and(|v| !v.is_empty())
}
