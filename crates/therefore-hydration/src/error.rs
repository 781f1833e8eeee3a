//! Hydration errors.

use therefore_dom::{DomError, NodeId};

/// Errors an initializer can report.
///
/// Missing optional markup is not an error: initializers that cannot find
/// the elements they enhance return `Ok(None)` and leave the markup inert.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HydrationError {
	/// A document mutation failed.
	#[error("DOM operation failed: {0}")]
	Dom(#[from] DomError),

	/// An attribute holds a value the widget cannot use.
	#[error("invalid {attribute}='{value}' on {element}")]
	InvalidAttribute {
		element: NodeId,
		attribute: String,
		value: String,
	},

	/// A host-registered initializer gave up.
	#[error("component '{component}' failed: {reason}")]
	Failed { component: String, reason: String },
}
