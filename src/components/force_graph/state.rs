//! Layout engine: force simulation, camera and pointer interaction.
//!
//! Wraps the `force_graph` physics simulation. Once built from a
//! [`GraphData`], the engine owns every node position; the graph data itself
//! is never written to. The camera is a pan/zoom [`ViewTransform`] that the
//! viewport controller re-frames through [`LayoutHandle`].

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::particles::LinkParticles;
use super::theme::{AutoColor, Theme};
use super::types::{GraphData, GraphNode};
use super::viewport::LayoutHandle;

/// Zoom limits shared by wheel zoom and zoom-to-fit.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Pointer hit radius in world units, matching the default node radius.
pub const HIT_RADIUS: f64 = 10.0;

/// Per-node metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub node: GraphNode,
	/// CSS colour from `node_auto_color_by`.
	pub color: String,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to `MIN_ZOOM..=MAX_ZOOM`).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Axis-aligned extent of the node positions in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}

/// Force simulation plus camera, built once per graph.
pub struct LayoutEngine {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	pub particles: LinkParticles,
	auto_color: AutoColor,
	theme: Theme,
	links: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl LayoutEngine {
	pub fn new(data: &GraphData, width: f64, height: f64, color_by: &str, theme: Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut auto_color = AutoColor::new(color_by);
		let colors = auto_color.assign(&data.nodes, &theme.palette);
		let mut id_to_idx = HashMap::new();
		let mut links = Vec::new();

		// Seed on a circle around the origin; the camera starts centred on it.
		for (i, (node, color)) in data.nodes.iter().zip(colors).enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					node: node.clone(),
					color,
				},
			});
			id_to_idx.insert(node.id, idx);
		}

		// Links to unknown ids have nothing to attach to and are skipped.
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				links.push((src, tgt));
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
			particles: LinkParticles::default(),
			auto_color,
			theme,
			links,
		}
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn color_by(&self) -> &str {
		self.auto_color.field()
	}

	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Re-assigns node colours by another field. Positions are kept.
	pub fn recolor(&mut self, color_by: &str) {
		if self.auto_color.field() == color_by {
			return;
		}
		let mut auto_color = AutoColor::new(color_by);
		let palette = &self.theme.palette;
		self.graph.visit_nodes_mut(|node| {
			let info = &mut node.data.user_data;
			info.color = auto_color.color_for(&info.node, palette).to_css();
		});
		self.auto_color = auto_color;
	}

	/// Current position of the node with `id`.
	pub fn position_of(&self, id: u64) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.node.id == id {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Extent of all node positions, `None` for an empty graph.
	pub fn bounds(&self) -> Option<Bounds> {
		let mut bounds: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			});
		});
		bounds
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Starts dragging the node under the pointer, or panning the background.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends a drag or pan. Dragged nodes stay anchored where they were dropped.
	pub fn pointer_up(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	/// Zooms around the pointer; positive `delta_y` zooms out.
	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl LayoutHandle for LayoutEngine {
	fn set_size(&mut self, width: f64, height: f64) {
		self.resize(width, height);
	}

	fn zoom_to_fit(&mut self, padding: f64) {
		let Some(bounds) = self.bounds() else {
			return;
		};
		let avail_w = (self.width - 2.0 * padding).max(1.0);
		let avail_h = (self.height - 2.0 * padding).max(1.0);
		// A single node (or a line of nodes) has no extent on some axis.
		let k = (avail_w / bounds.width().max(1.0))
			.min(avail_h / bounds.height().max(1.0))
			.clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = bounds.center();
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::model::flatten;
	use crate::components::force_graph::types::{GraphLink, Tree, TreeNode};

	fn sample() -> GraphData {
		let leaf = |id: u64, node_type: &str| TreeNode {
			id,
			name: format!("n{id}"),
			node_type: node_type.into(),
			children: None,
		};
		flatten(&Tree {
			nodes: vec![TreeNode {
				children: Some(vec![leaf(2, "Leaf"), leaf(3, "Leaf"), leaf(4, "Leaf")]),
				..leaf(1, "Branch")
			}],
			counter: 5,
		})
	}

	fn engine() -> LayoutEngine {
		LayoutEngine::new(&sample(), 800.0, 600.0, "node_type", Theme::default())
	}

	fn color_of(engine: &LayoutEngine, id: u64) -> String {
		let mut color = String::new();
		engine.graph.visit_nodes(|node| {
			if node.data.user_data.node.id == id {
				color = node.data.user_data.color.clone();
			}
		});
		color
	}

	#[test]
	fn builds_nodes_and_links() {
		let engine = engine();
		assert_eq!(engine.link_count(), 3);
		for id in 1..=4 {
			assert!(engine.position_of(id).is_some());
		}
		assert!(engine.position_of(9).is_none());
		assert_eq!(engine.transform, ViewTransform { x: 400.0, y: 300.0, k: 1.0 });
	}

	#[test]
	fn dangling_links_are_skipped() {
		let mut data = sample();
		data.links.push(GraphLink {
			source: 1,
			target: 42,
		});
		let engine = LayoutEngine::new(&data, 100.0, 100.0, "node_type", Theme::default());
		assert_eq!(engine.link_count(), 3);
	}

	#[test]
	fn auto_color_by_node_type() {
		let mut engine = engine();
		assert_eq!(color_of(&engine, 2), color_of(&engine, 3));
		assert_ne!(color_of(&engine, 1), color_of(&engine, 2));

		let before = engine.position_of(2);
		engine.recolor("id");
		assert_eq!(engine.color_by(), "id");
		assert_ne!(color_of(&engine, 2), color_of(&engine, 3));
		assert_eq!(engine.position_of(2), before);
	}

	#[test]
	fn zoom_to_fit_centres_bounds() {
		let mut engine = engine();
		engine.transform = ViewTransform { x: -500.0, y: 40.0, k: 7.0 };
		engine.zoom_to_fit(100.0);

		let bounds = engine.bounds().unwrap();
		let (cx, cy) = bounds.center();
		let t = &engine.transform;
		assert!((t.x + cx * t.k - 400.0).abs() < 1e-6);
		assert!((t.y + cy * t.k - 300.0).abs() < 1e-6);
		// 600x400 usable area around a ~200x200 seed circle.
		assert!(t.k > 1.5 && t.k < 2.5, "k = {}", t.k);
	}

	#[test]
	fn zoom_to_fit_on_empty_graph_is_noop() {
		let mut engine =
			LayoutEngine::new(&GraphData::default(), 800.0, 600.0, "node_type", Theme::default());
		let before = engine.transform.clone();
		engine.zoom_to_fit(100.0);
		assert_eq!(engine.transform, before);
	}

	#[test]
	fn set_size_updates_dimensions() {
		let mut engine = engine();
		engine.set_size(400.0, 300.0);
		assert_eq!((engine.width, engine.height), (400.0, 300.0));
	}

	#[test]
	fn wheel_zoom_is_clamped_and_keeps_pointer_fixed() {
		let mut engine = engine();
		let before = engine.screen_to_graph(123.0, 45.0);
		engine.wheel(123.0, 45.0, -1.0);
		let after = engine.screen_to_graph(123.0, 45.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			engine.wheel(0.0, 0.0, 1.0);
		}
		assert_eq!(engine.transform.k, MIN_ZOOM);
	}

	#[test]
	fn drag_moves_and_anchors_node() {
		let mut engine = engine();
		let (x, y) = engine.position_of(1).unwrap();
		let (sx, sy) = (x + engine.transform.x, y + engine.transform.y);

		engine.pointer_down(sx, sy);
		assert!(engine.drag.active);
		engine.pointer_move(sx + 30.0, sy - 10.0);
		engine.pointer_up();

		let (nx, ny) = engine.position_of(1).unwrap();
		assert!((nx - (x + 30.0)).abs() < 1e-3 && (ny - (y - 10.0)).abs() < 1e-3);
		assert!(!engine.drag.active);
	}

	#[test]
	fn background_drag_pans() {
		let mut engine = engine();
		engine.pointer_down(5.0, 5.0);
		assert!(engine.pan.active);
		engine.pointer_move(25.0, 0.0);
		engine.pointer_up();
		assert_eq!((engine.transform.x, engine.transform.y), (420.0, 295.0));
	}

	#[test]
	fn tick_advances_flow_time() {
		let mut engine = engine();
		engine.tick(0.5);
		engine.tick(0.5);
		assert_eq!(engine.flow_time, 1.0);
	}
}
