//! Tree to graph transform.
//!
//! Flattens a nested [`Tree`] into the node/link lists consumed by the layout
//! engine. Traversal is depth-first pre-order so the output is deterministic:
//! a node always precedes its children and the link leading to it.

use std::collections::HashSet;

use super::types::{GraphData, GraphLink, GraphNode, Tree, TreeNode};
use crate::error::TreeError;

/// Flattens a forest into graph nodes and parent to child links.
///
/// Does not validate ids; see [`Tree::validate`].
pub fn flatten(tree: &Tree) -> GraphData {
	let mut data = GraphData {
		nodes: Vec::with_capacity(tree.len()),
		links: Vec::new(),
	};
	for root in &tree.nodes {
		visit(root, None, &mut data);
	}
	data
}

fn visit(node: &TreeNode, parent: Option<u64>, data: &mut GraphData) {
	data.nodes.push(GraphNode {
		id: node.id,
		name: node.name.clone(),
		node_type: node.node_type.clone(),
	});
	if let Some(source) = parent {
		data.links.push(GraphLink {
			source,
			target: node.id,
		});
	}
	for child in node.children() {
		visit(child, Some(node.id), data);
	}
}

impl Tree {
	/// Total number of nodes across all roots.
	pub fn len(&self) -> usize {
		fn count(node: &TreeNode) -> usize {
			1 + node.children().iter().map(count).sum::<usize>()
		}
		self.nodes.iter().map(count).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Depth of the deepest root-to-leaf path; 0 for an empty tree.
	pub fn depth(&self) -> usize {
		fn depth(node: &TreeNode) -> usize {
			1 + node.children().iter().map(depth).max().unwrap_or(0)
		}
		self.nodes.iter().map(depth).max().unwrap_or(0)
	}

	/// Finds a node by id, depth-first.
	pub fn find(&self, id: u64) -> Option<&TreeNode> {
		fn find(nodes: &[TreeNode], id: u64) -> Option<&TreeNode> {
			nodes
				.iter()
				.find_map(|n| if n.id == id { Some(n) } else { find(n.children(), id) })
		}
		find(&self.nodes, id)
	}

	/// Checks that every id occurs once.
	///
	/// An owned nested tree cannot contain cycles or dangling parent
	/// references, so duplicate ids are the only malformation left.
	pub fn validate(&self) -> Result<(), TreeError> {
		let mut seen = HashSet::new();
		let mut stack: Vec<&TreeNode> = self.nodes.iter().rev().collect();
		while let Some(node) = stack.pop() {
			if !seen.insert(node.id) {
				return Err(TreeError::DuplicateId { id: node.id });
			}
			stack.extend(node.children().iter().rev());
		}
		Ok(())
	}
}
