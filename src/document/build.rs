//! Assembles `yaml-rust2` parser events into a [`DocumentTree`].
//!
//! Anchored nodes are registered by anchor id as they are created; an alias
//! event attaches the anchored node's existing [`NodeId`] instead of creating
//! a new node. Scanner errors and unknown aliases surface as parse errors.

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use std::collections::HashMap;

use super::tree::{DocumentNode, DocumentTree, NodeId};
use crate::error::{FixtureError, FixtureResult};

pub(super) fn build(text: &str) -> FixtureResult<DocumentTree> {
	let mut builder = TreeBuilder::default();
	let mut parser = Parser::new_from_str(text);
	parser
		.load(&mut builder, false)
		.map_err(|e| FixtureError::Parse(e.to_string()))?;

	if let Some(message) = builder.error.take() {
		return Err(FixtureError::Parse(message));
	}
	Ok(builder.tree)
}

/// A container node currently being filled.
enum Frame {
	Sequence(NodeId),
	Mapping {
		id: NodeId,
		pending_key: Option<NodeId>,
	},
}

#[derive(Default)]
struct TreeBuilder {
	tree: DocumentTree,
	stack: Vec<Frame>,
	anchors: HashMap<usize, NodeId>,
	error: Option<String>,
}

impl TreeBuilder {
	fn push_node(&mut self, node: DocumentNode, anchor_id: usize) -> NodeId {
		let id = NodeId(self.tree.nodes.len());
		self.tree.nodes.push(node);
		if anchor_id > 0 {
			self.anchors.insert(anchor_id, id);
		}
		id
	}

	/// Attaches `id` to the container being filled, or to the root list.
	fn attach(&mut self, id: NodeId) {
		match self.stack.last_mut() {
			Some(Frame::Sequence(parent)) => {
				let parent = *parent;
				if let DocumentNode::Sequence { items, .. } = &mut self.tree.nodes[parent.0] {
					items.push(id);
				}
			}
			Some(Frame::Mapping { id: parent, pending_key }) => match pending_key.take() {
				Some(key) => {
					let parent = *parent;
					if let DocumentNode::Mapping { entries, .. } = &mut self.tree.nodes[parent.0] {
						entries.push((key, id));
					}
				}
				None => *pending_key = Some(id),
			},
			None => self.tree.roots.push(id),
		}
	}

	fn fail(&mut self, mark: Marker, message: &str) {
		if self.error.is_none() {
			self.error = Some(format!(
				"{} at line {} column {}",
				message,
				mark.line(),
				mark.col() + 1
			));
		}
	}
}

fn tag_string(tag: Option<Tag>) -> Option<String> {
	tag.map(|t| format!("{}{}", t.handle, t.suffix))
}

impl MarkedEventReceiver for TreeBuilder {
	fn on_event(&mut self, ev: Event, mark: Marker) {
		if self.error.is_some() {
			return;
		}
		match ev {
			Event::Scalar(value, style, anchor_id, tag) => {
				let plain = style == TScalarStyle::Plain;
				let node = DocumentNode::Scalar {
					value,
					plain,
					tag: tag_string(tag),
				};
				let id = self.push_node(node, anchor_id);
				self.attach(id);
			}
			Event::SequenceStart(anchor_id, tag) => {
				let node = DocumentNode::Sequence {
					tag: tag_string(tag),
					items: Vec::new(),
				};
				let id = self.push_node(node, anchor_id);
				self.stack.push(Frame::Sequence(id));
			}
			Event::SequenceEnd => {
				if let Some(Frame::Sequence(id)) = self.stack.pop() {
					self.attach(id);
				}
			}
			Event::MappingStart(anchor_id, tag) => {
				let node = DocumentNode::Mapping {
					tag: tag_string(tag),
					entries: Vec::new(),
				};
				let id = self.push_node(node, anchor_id);
				self.stack.push(Frame::Mapping {
					id,
					pending_key: None,
				});
			}
			Event::MappingEnd => {
				if let Some(Frame::Mapping { id, pending_key }) = self.stack.pop() {
					if pending_key.is_some() {
						self.fail(mark, "mapping ended with a dangling key");
						return;
					}
					self.attach(id);
				}
			}
			Event::Alias(anchor_id) => match self.anchors.get(&anchor_id) {
				Some(id) => {
					let id = *id;
					self.attach(id);
				}
				None => self.fail(mark, "alias refers to an undefined anchor"),
			},
			Event::Nothing
			| Event::StreamStart
			| Event::StreamEnd
			| Event::DocumentStart
			| Event::DocumentEnd => {}
		}
	}
}
