//! Built-in widget initializers.

pub mod avatar;
pub mod citation;
pub mod lightbox;
pub mod popover;
pub mod scripture;
pub mod sidenote;
pub mod tag_link;
pub mod timeline;

pub use popover::{Placement, placement};
