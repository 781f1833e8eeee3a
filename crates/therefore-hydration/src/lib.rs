//! Therefore Hydration - progressive enhancement of server-rendered posts
//!
//! Post HTML arrives fully rendered. Elements that should become interactive
//! carry a `data-component` marker; the [`HydrationRuntime`] finds them,
//! runs the matching initializer from the [`ComponentRegistry`] once per
//! element and keeps each widget's [`Cleanup`] until the next teardown.
//!
//! ## Built-in components
//!
//! | Marker | Behaviour |
//! |--------|-----------|
//! | `citation` | numbered popover, page-wide numbering, citations accordion |
//! | `sidenote` | popover with the note's HTML |
//! | `lightbox` | click-to-zoom overlay with scroll lock and focus trap |
//! | `timeline` | staggered entrance, click-to-highlight |
//! | `avatar` | image with initials fallback |
//! | `scripture-compare` | cycles alternate translations |
//!
//! Tag links (`a.tag-link`) need no marker; they are routed through the
//! context's [`Navigator`](therefore_dom::Navigator).
//!
//! ## Example
//!
//! ```
//! use therefore_dom::Document;
//! use therefore_hydration::HydrationRuntime;
//!
//! let mut doc = Document::from_body_html(
//!     r#"<span data-component="sidenote" data-sidenote-content="A note">
//!          <button class="sidenote-trigger">1</button>
//!        </span>"#,
//! );
//! let body = doc.body();
//! let mut runtime = HydrationRuntime::default();
//!
//! let report = runtime.hydrate(&mut doc, body);
//! assert_eq!(report.hydrated, 1);
//! assert_eq!(runtime.hydrate(&mut doc, body).hydrated, 0);
//!
//! runtime.cleanup_all(&mut doc);
//! assert_eq!(doc.total_listeners(), 0);
//! ```

pub mod citations;
pub mod cleanup;
pub mod context;
pub mod error;
pub mod markers;
pub mod modal;
pub mod registry;
pub mod resources;
pub mod runtime;
pub mod widgets;

pub use citations::{CitationEntry, CitationRegistry};
pub use cleanup::{Cleanup, CleanupStack};
pub use context::HydrationContext;
pub use error::HydrationError;
pub use markers::{COMPONENT_ATTR, HYDRATED_ATTR, HYDRATED_VALUE, Marker, find_markers};
pub use modal::{ModalSlot, OpenModal, ScrollLock};
pub use registry::{ComponentKind, ComponentRegistry, InitResult, Initializer, UnknownComponent};
pub use resources::WidgetResources;
pub use runtime::{FailedComponent, HydrationReport, HydrationRuntime, is_hydrated};
pub use widgets::scripture::ScriptureCursor;
