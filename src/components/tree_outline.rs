//! Nested-list view of the tree, shown next to the graph.

use leptos::prelude::*;

use super::force_graph::{Tree, TreeNode};

/// One visible row of the outline.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineRow {
	pub id: u64,
	pub name: String,
	pub node_type: String,
	/// Nesting level, 0 for roots.
	pub depth: usize,
}

/// Rows of the outline in pre-order, matching the graph's node order.
pub fn outline_rows(tree: &Tree) -> Vec<OutlineRow> {
	fn visit(node: &TreeNode, depth: usize, rows: &mut Vec<OutlineRow>) {
		rows.push(OutlineRow {
			id: node.id,
			name: node.name.clone(),
			node_type: node.node_type.clone(),
			depth,
		});
		for child in node.children() {
			visit(child, depth + 1, rows);
		}
	}

	let mut rows = Vec::new();
	for root in &tree.nodes {
		visit(root, 0, &mut rows);
	}
	rows
}

#[component]
pub fn TreeOutline(#[prop(into)] tree: Signal<Option<Tree>>) -> impl IntoView {
	let rows = move || tree.with(|t| t.as_ref().map(outline_rows).unwrap_or_default());

	view! {
		<ul class="tree-outline">
			<For each=rows key=|row| row.id let:row>
				<li
					class="tree-outline-item"
					data-node-type=row.node_type.clone()
					style=format!("padding-left: {}em;", row.depth)
				>
					{row.name}
				</li>
			</For>
		</ul>
	}
}
