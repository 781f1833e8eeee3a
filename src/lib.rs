//! # Therefore
//!
//! Progressive hydration and client-side search for the Therefore
//! publishing site.
//!
//! Posts are rendered on the server as complete HTML. This crate adds the
//! interactive layer on top: citation and sidenote popovers, a lightbox,
//! scripture translation cycling, timelines and avatars are attached to
//! marked elements by the hydration runtime, and the search modal ranks
//! posts with a typo-tolerant fuzzy index.
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything below
//! - `minimal` - document model and hydration only
//! - `dom` - the arena document model ([`dom`])
//! - `conf` - layered settings ([`conf`])
//! - `hydration` - component registry, runtime and widgets ([`hydration`])
//! - `search` - fuzzy index and search modal ([`search`])
//! - `tracing-init` - [`init_tracing`] installs a `tracing-subscriber`
//!   formatter driven by `RUST_LOG`
//!
//! ## Quick Example
//!
//! ```
//! # #[cfg(all(feature = "hydration", feature = "search"))]
//! # {
//! use therefore::prelude::*;
//!
//! let mut doc = Document::from_body_html(
//!     r#"<p>Grace <span data-component="sidenote" data-sidenote-content="See Romans 5">
//!          <button class="sidenote-trigger">1</button></span></p>"#,
//! );
//! let body = doc.body();
//! let mut runtime = HydrationRuntime::default();
//! assert_eq!(runtime.hydrate(&mut doc, body).hydrated, 1);
//!
//! let posts = vec![PostListItem::new("on-free-will", "On Free Will")];
//! let index = SearchIndex::build(&posts, SearchOptions::default()).unwrap();
//! assert_eq!(index.search("free", 8).len(), 1);
//! # }
//! ```

#[cfg(feature = "conf")]
pub use therefore_conf as conf;
#[cfg(feature = "dom")]
pub use therefore_dom as dom;
#[cfg(feature = "hydration")]
pub use therefore_hydration as hydration;
#[cfg(feature = "search")]
pub use therefore_search as search;

// Settings
#[cfg(feature = "conf")]
pub use therefore_conf::{ConfigError, FieldWeights, HydrationSettings, SearchSettings, Settings};

// Document model
#[cfg(feature = "dom")]
pub use therefore_dom::{
	Document, DomError, Event, EventType, NavigationState, Navigator, NodeId, RecordingNavigator,
	TransitionKind,
};

// Hydration
#[cfg(feature = "hydration")]
pub use therefore_hydration::{
	Cleanup, ComponentKind, ComponentRegistry, HydrationContext, HydrationError, HydrationReport,
	HydrationRuntime,
};

// Search
#[cfg(feature = "search")]
pub use therefore_search::{
	ModalView, PostListItem, ResultCard, SearchError, SearchIndex, SearchModal, SearchOptions,
	SearchResult,
};

/// Installs a global `tracing` subscriber that formats to stderr and reads
/// its filter from `RUST_LOG` (default `info`).
///
/// Returns `false` when a global subscriber was already installed, so it is
/// safe to call more than once.
#[cfg(feature = "tracing-init")]
pub fn init_tracing() -> bool {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let installed = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.is_ok();
	if installed {
		tracing::debug!("tracing subscriber installed");
	}
	installed
}

/// Common imports.
pub mod prelude {
	#[cfg(feature = "conf")]
	pub use crate::{FieldWeights, Settings};
	#[cfg(feature = "dom")]
	pub use crate::{Document, NavigationState, Navigator, NodeId};
	#[cfg(feature = "hydration")]
	pub use crate::{HydrationContext, HydrationReport, HydrationRuntime};
	#[cfg(feature = "search")]
	pub use crate::{ModalView, PostListItem, SearchIndex, SearchModal, SearchOptions};
}
