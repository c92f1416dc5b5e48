//! Error types for tree manipulation.

use crate::node::NodeType;

/// Errors raised by structural tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// The child is the parent itself or one of its ancestors.
	#[error("cannot insert a node into itself or one of its descendants")]
	HierarchyRequest,
	/// The reference node is not a child of the node being operated on.
	#[error("node is not a child of this parent")]
	NotAChild,
	/// The node kind cannot hold children.
	#[error("{0:?} nodes cannot contain children")]
	NotAContainer(NodeType),
	/// An element-only operation was invoked on another node kind.
	#[error("{operation} requires an element, found {found:?}")]
	NotAnElement {
		/// The attempted operation.
		operation: &'static str,
		/// The node kind it was attempted on.
		found: NodeType,
	},
	/// A character-data operation was invoked on a node without character data.
	#[error("{0:?} nodes carry no character data")]
	NotCharacterData(NodeType),
}
