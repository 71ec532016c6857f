//! Force-directed graph visualization of a tree.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Flattening of the nested tree into nodes and parent/child links
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Pluggable node painting with scale-aware labels
//! - Fit-to-container re-centering after debounced window resizes
//!
//! # Example
//!
//! ```ignore
//! use tree_graph::{flatten, ForceGraphView, Tree};
//!
//! let tree: Tree = serde_json::from_str(json)?;
//! let data = std::sync::Arc::new(flatten(&tree));
//!
//! view! { <ForceGraphView graph_data=Signal::stored(data) link_directional_particles=6 /> }
//! ```

pub mod canvas;
mod component;
mod dom;
mod model;
pub mod paint;
mod particles;
mod render;
pub mod scale;
mod session;
mod state;
pub mod theme;
mod types;
pub mod viewport;

pub use canvas::Canvas2d;
pub use component::ForceGraphView;
pub use model::flatten;
pub use paint::{NodeCanvasObject, NodePainter, NodeShape, NodeSprite, PaintOptions, paint_node};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, Tree, TreeNode};
pub use viewport::ViewportConfig;
