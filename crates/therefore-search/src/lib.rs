//! Therefore Search - fuzzy post search for the blog's search modal
//!
//! Posts are indexed over five weighted fields and matched with a bitap
//! matcher that tolerates typos and prefers matches near the start of a
//! field. Results carry character spans for highlighting; the modal layer
//! turns them into cards, folds a dominant series into a single aggregate
//! card and extracts body-text snippets.
//!
//! | Field | Default weight |
//! |-------|----------------|
//! | `title` | 0.40 |
//! | `summary` | 0.25 |
//! | `searchContent` | 0.15 |
//! | `tags` | 0.12 |
//! | `series` | 0.08 |
//!
//! ## Example
//!
//! ```
//! use therefore_search::{PostListItem, SearchField, SearchIndex, SearchOptions};
//!
//! let posts = vec![
//!     PostListItem::new("a", "Grace and Freedom"),
//!     PostListItem::new("b", "On Free Will"),
//! ];
//! let index = SearchIndex::build(&posts, SearchOptions::default()).unwrap();
//!
//! let results = index.search("free", 8);
//! let title = results[0].field_match(SearchField::Title).unwrap();
//! assert_eq!(title.spans[0].slice(&title.value), "Free");
//! ```

pub mod bitap;
pub mod error;
pub mod highlight;
pub mod index;
pub mod modal;
pub mod options;
pub mod post;
pub mod series;
pub mod snippet;

pub use bitap::{BitapMatch, BitapPattern, MAX_BITS, fold_case};
pub use error::SearchError;
pub use highlight::{Segment, Span, highlight, normalize_spans};
pub use index::{FieldMatch, SearchIndex, SearchResult, field_norm};
pub use modal::{
	MAX_CARD_TAGS, ModalView, PROMPT_TEXT, PostCard, ResultCard, SERIES_PATH, SearchModal,
	SeriesCard, format_publish_date, post_path,
};
pub use options::{SearchField, SearchOptions};
pub use post::{PostListItem, PostRecord};
pub use series::{SeriesAggregate, series_aggregate};
pub use snippet::{Snippet, extract_snippet};
