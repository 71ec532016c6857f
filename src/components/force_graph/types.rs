//! Tree input and flat graph data structures.

use serde::{Deserialize, Serialize};

/// A node of the server-supplied tree.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TreeNode {
	/// Unique identifier, carried over to the graph node.
	pub id: u64,
	pub name: String,
	/// Free-form type tag (e.g. "Leaf", "Branch"). Used for auto-colouring.
	pub node_type: String,
	/// Owned children. `None` and an empty list both mark a leaf.
	#[serde(default)]
	pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
	/// Children as a slice, empty for leaves.
	pub fn children(&self) -> &[TreeNode] {
		self.children.as_deref().unwrap_or_default()
	}
}

/// A forest of tree nodes as delivered by the tree provider.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Tree {
	/// Root nodes, in display order.
	#[serde(default)]
	pub nodes: Vec<TreeNode>,
	/// Id counter of the provider. Informational only.
	#[serde(default)]
	pub counter: u64,
}

/// A node in the graph.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphNode {
	/// Identifier of the originating tree node. Used to reference nodes in links.
	pub id: u64,
	/// Display label.
	pub name: String,
	pub node_type: String,
}

impl GraphNode {
	/// Looks up a field by name, as used by `node_auto_color_by`.
	pub fn field(&self, name: &str) -> Option<String> {
		match name {
			"id" => Some(self.id.to_string()),
			"name" => Some(self.name.clone()),
			"node_type" => Some(self.node_type.clone()),
			_ => None,
		}
	}
}

/// A directed parent to child edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphLink {
	/// Parent node ID.
	pub source: u64,
	/// Child node ID.
	pub target: u64,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
