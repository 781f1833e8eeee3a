//! Error types for document operations.

use crate::node::NodeId;

/// Errors raised by mutating document operations.
///
/// Read helpers (`get_attribute`, `query_selector`, ...) return `Option`
/// instead; only structural misuse is reported as an error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	#[error("unknown node: {0}")]
	UnknownNode(NodeId),

	#[error("node {0} is not an element")]
	NotAnElement(NodeId),

	#[error("cannot insert {child} into {parent}: {reason}")]
	HierarchyRequest {
		parent: NodeId,
		child: NodeId,
		reason: &'static str,
	},

	#[error("invalid selector '{selector}': {reason}")]
	InvalidSelector { selector: String, reason: String },
}
