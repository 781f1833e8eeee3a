//! Server-rendered tag links routed through client-side navigation.

use crate::cleanup::Cleanup;
use crate::context::HydrationContext;
use crate::registry::InitResult;
use therefore_dom::{Document, EventType, NavigationState, NodeId, TransitionKind};

/// True for hrefs the client router should handle.
pub fn is_internal(href: &str) -> bool {
	!href.is_empty() && !href.starts_with("http")
}

pub fn init(doc: &mut Document, ctx: &mut HydrationContext, link: NodeId) -> InitResult {
	let navigator = ctx.navigator();
	let listener = doc.add_event_listener(link, EventType::Click, move |doc, event| {
		let Some(href) = doc.get_attribute(link, "href") else {
			return;
		};
		if !is_internal(&href) {
			return;
		}
		event.prevent_default();
		tracing::debug!(%href, "tag link navigation");
		navigator.navigate(&href, Some(NavigationState::with_transition(TransitionKind::Slide)));
	});
	Ok(Some(Cleanup::new(move |doc| {
		doc.remove_event_listener(listener);
	})))
}
