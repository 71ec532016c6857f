//! tree-graph: Interactive force-directed graph visualization of a tree.
//!
//! This crate provides a WASM-based graph visualization that loads a nested
//! tree from a tree provider, flattens it into nodes and parent/child links,
//! and renders it with physics-based layout, pan/zoom, and node dragging.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;
pub mod error;
pub mod source;

pub use components::force_graph::{
	ForceGraphView, GraphData, GraphLink, GraphNode, NodeCanvasObject, NodePainter, NodeSprite,
	Theme, Tree, TreeNode, ViewportConfig, flatten,
};
pub use components::tree_outline::TreeOutline;
pub use config::GraphConfig;
pub use error::{Error, TreeError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("tree-graph: logging initialized");
}

/// Main application component.
/// Loads the tree and renders it as a force-directed graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = GraphConfig::load();
	let tree = RwSignal::new(None::<Tree>);
	source::load_tree(config.endpoint.clone(), tree);

	let graph_data = Memo::new(move |_| {
		Arc::new(tree.with(|t| t.as_ref().map(flatten).unwrap_or_default()))
	});

	let color_by = config.node_auto_color_by.clone();
	let particles = config.link_directional_particles;
	let viewport = config.viewport();
	let show_outline = config.show_outline;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Tree Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph" style="position: fixed; inset: 0;">
			<Show
				when=move || graph_data.with(|d| !d.is_empty())
				fallback=|| view! { <p class="graph-empty">"No tree loaded."</p> }
			>
				<ForceGraphView
					graph_data=graph_data
					node_auto_color_by=color_by.clone()
					link_directional_particles=particles
					viewport=viewport
				/>
			</Show>
			<div class="graph-overlay">
				<h1>"Tree"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
			</div>
		</div>
		<Show when=move || show_outline>
			<TreeOutline tree=tree />
		</Show>
	}
}
