//! Therefore DOM - in-memory document model for hydration
//!
//! A small tree-backed document that stands in for the browser DOM, so
//! hydration widgets can be driven and inspected without a browser.
//!
//! ## Features
//!
//! - **Node tree**: an `ego_tree::Tree` behind stable [`NodeId`] handles; removed nodes stay addressable
//! - **Selectors**: compound simple selectors (`a.tag-link`, `[role='tooltip']`)
//! - **Events**: bubbling dispatch with `preventDefault` / `stopPropagation`
//! - **Focus & geometry**: active element, host-reported rectangles and viewport
//! - **Scheduling**: animation frames and timers on a virtual clock
//! - **HTML**: fragment import through `scraper`, serialization back to markup
//! - **Navigation**: the [`Navigator`] contract widgets use for client-side routing
//!
//! ## Example
//!
//! ```
//! use therefore_dom::{Document, EventType};
//!
//! let mut doc = Document::from_body_html(r#"<button class="cycle">next</button>"#);
//! let button = doc.query(doc.body(), "button.cycle").unwrap();
//! doc.add_event_listener(button, EventType::Click, |doc, event| {
//!     let _ = doc.add_class(event.current_target(), "pressed");
//! });
//! doc.click(button);
//! assert!(doc.has_class(button, "pressed"));
//! ```

pub mod document;
pub mod error;
pub mod events;
pub mod geometry;
mod html;
pub mod navigation;
pub mod node;
pub mod scheduler;
pub mod selector;

pub use document::Document;
pub use error::DomError;
pub use events::{Event, EventType, Listener, ListenerId};
pub use geometry::{Rect, Size};
pub use navigation::{
	NavigationRequest, NavigationState, Navigator, NoopNavigator, RecordingNavigator, TransitionKind,
};
pub use node::{ElementData, NodeData, NodeId};
pub use scheduler::{FrameId, Task, TimerId};
pub use selector::Selector;
