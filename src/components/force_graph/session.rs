//! Keeps one layout engine alive across re-renders.
//!
//! The engine owns the simulated positions, so rebuilding it visibly resets
//! the layout. [`GraphSession::sync`] rebuilds only when the graph itself
//! changes, and applies cosmetic settings to the running engine otherwise.

use std::sync::Arc;

use log::info;

use super::particles::LinkParticles;
use super::state::LayoutEngine;
use super::theme::Theme;
use super::types::GraphData;
use super::viewport::Size;

/// Settings that never require a new simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Cosmetics {
	/// Node field used for auto-colouring.
	pub color_by: String,
	/// Directional particles per link.
	pub particles: u32,
}

impl Default for Cosmetics {
	fn default() -> Self {
		Self {
			color_by: "node_type".into(),
			particles: 0,
		}
	}
}

#[derive(Default)]
pub struct GraphSession {
	data: Option<Arc<GraphData>>,
	engine: Option<LayoutEngine>,
	builds: usize,
}

impl GraphSession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn engine(&self) -> Option<&LayoutEngine> {
		self.engine.as_ref()
	}

	pub fn engine_mut(&mut self) -> Option<&mut LayoutEngine> {
		self.engine.as_mut()
	}

	/// Number of engines built so far.
	pub fn builds(&self) -> usize {
		self.builds
	}

	/// Brings the session up to date with `data`.
	///
	/// The engine is rebuilt only if `data` is neither the same allocation nor
	/// equal in value to the graph it was built from. Returns whether a new
	/// engine was built.
	pub fn sync(
		&mut self,
		data: &Arc<GraphData>,
		size: Size,
		cosmetics: &Cosmetics,
		theme: &Theme,
	) -> bool {
		let unchanged = self
			.data
			.as_ref()
			.is_some_and(|current| Arc::ptr_eq(current, data) || **current == **data);

		let rebuilt = if unchanged && self.engine.is_some() {
			if let Some(engine) = self.engine.as_mut() {
				engine.recolor(&cosmetics.color_by);
			}
			false
		} else {
			self.engine = Some(LayoutEngine::new(
				data,
				size.width,
				size.height,
				&cosmetics.color_by,
				theme.clone(),
			));
			self.builds += 1;
			info!(
				"tree-graph: layout built for {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			true
		};
		self.data = Some(data.clone());

		if let Some(engine) = self.engine.as_mut() {
			engine.particles = LinkParticles {
				per_link: cosmetics.particles,
				..engine.particles
			};
		}
		rebuilt
	}

	/// Drops the engine, e.g. when the tree is cleared.
	pub fn clear(&mut self) {
		self.data = None;
		self.engine = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn graph(n: u64) -> GraphData {
		GraphData {
			nodes: (1..=n)
				.map(|id| GraphNode {
					id,
					name: format!("n{id}"),
					node_type: if id == 1 { "Branch" } else { "Leaf" }.into(),
				})
				.collect(),
			links: (2..=n).map(|target| GraphLink { source: 1, target }).collect(),
		}
	}

	fn sync(session: &mut GraphSession, data: &Arc<GraphData>, cosmetics: &Cosmetics) -> bool {
		session.sync(data, Size::new(800.0, 600.0), cosmetics, &Theme::default())
	}

	#[test]
	fn same_graph_keeps_positions() {
		let mut session = GraphSession::new();
		let data = Arc::new(graph(4));
		let cosmetics = Cosmetics::default();

		assert!(sync(&mut session, &data, &cosmetics));
		let engine = session.engine_mut().unwrap();
		engine.tick(0.016);
		engine.tick(0.016);
		let moved = engine.position_of(2);

		assert!(!sync(&mut session, &data, &cosmetics));
		// A fresh allocation with equal content is the same graph.
		assert!(!sync(&mut session, &Arc::new(graph(4)), &cosmetics));
		assert_eq!(session.builds(), 1);
		assert_eq!(session.engine().unwrap().position_of(2), moved);
	}

	#[test]
	fn cosmetic_changes_do_not_rebuild() {
		let mut session = GraphSession::new();
		let data = Arc::new(graph(3));
		sync(&mut session, &data, &Cosmetics::default());

		let cosmetics = Cosmetics {
			color_by: "id".into(),
			particles: 6,
		};
		assert!(!sync(&mut session, &data, &cosmetics));
		let engine = session.engine().unwrap();
		assert_eq!(engine.particles.per_link, 6);
		assert_eq!(engine.color_by(), "id");
		assert_eq!(session.builds(), 1);
	}

	#[test]
	fn new_graph_rebuilds() {
		let mut session = GraphSession::new();
		let cosmetics = Cosmetics::default();
		sync(&mut session, &Arc::new(graph(3)), &cosmetics);
		assert!(sync(&mut session, &Arc::new(graph(5)), &cosmetics));
		assert_eq!(session.builds(), 2);
		assert_eq!(session.engine().unwrap().link_count(), 4);

		session.clear();
		assert!(session.engine().is_none());
		assert!(sync(&mut session, &Arc::new(graph(5)), &cosmetics));
	}
}
