//! Arena representation of a parsed fixture document.

use crate::error::FixtureResult;

/// Identity of a node within one [`DocumentTree`].
///
/// Two aliases of the same anchor carry the same `NodeId`, which is what the
/// construction layer keys its identity map on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Returns the arena index of this node.
	pub fn index(&self) -> usize {
		self.0
	}
}

/// A single parsed node.
///
/// Nodes are never mutated after parsing. Children are referenced by
/// [`NodeId`] so that a node shared through an anchor appears once in the
/// arena no matter how many aliases point at it.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
	/// A scalar leaf. `plain` distinguishes unquoted scalars, which are
	/// subject to type resolution, from quoted ones, which are always text.
	Scalar {
		/// Literal scalar content.
		value: String,
		/// Whether the scalar was written in plain (unquoted) style.
		plain: bool,
		/// Explicit tag, if any.
		tag: Option<String>,
	},

	/// An ordered sequence of child nodes.
	Sequence {
		/// Explicit tag, if any.
		tag: Option<String>,
		/// Child nodes in document order.
		items: Vec<NodeId>,
	},

	/// A mapping of key nodes to value nodes.
	Mapping {
		/// Explicit tag, if any. A registered entity tag here selects the
		/// entity type to construct.
		tag: Option<String>,
		/// Key/value entries in document order.
		entries: Vec<(NodeId, NodeId)>,
	},
}

impl DocumentNode {
	/// Returns the explicit tag on this node, if any.
	pub fn tag(&self) -> Option<&str> {
		match self {
			DocumentNode::Scalar { tag, .. }
			| DocumentNode::Sequence { tag, .. }
			| DocumentNode::Mapping { tag, .. } => tag.as_deref(),
		}
	}
}

/// A fully parsed fixture document.
#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
	pub(crate) nodes: Vec<DocumentNode>,
	pub(crate) roots: Vec<NodeId>,
}

impl DocumentTree {
	/// Parses a document from text.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Parse`](crate::error::FixtureError::Parse) if
	/// the text is not well-formed, including aliases to undefined anchors.
	pub fn parse(text: &str) -> FixtureResult<Self> {
		super::build::build(text)
	}

	/// Returns the node behind `id`.
	///
	/// # Panics
	///
	/// Panics if `id` does not belong to this tree.
	pub fn node(&self, id: NodeId) -> &DocumentNode {
		&self.nodes[id.0]
	}

	/// Returns the top-level nodes in document order.
	pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.roots.iter().copied()
	}

	/// Returns the number of distinct nodes in the tree.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns true if the document contained no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
