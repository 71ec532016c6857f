//! Frame rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Links, then directional particles (world space)
//! 3. Nodes, each drawn by the node canvas callback

use std::f64::consts::PI;

use super::canvas::Canvas2d;
use super::paint::{NodeCanvasObject, NodeSprite};
use super::scale::ScaleBehavior;
use super::state::LayoutEngine;

/// Renders the complete graph to the canvas.
pub fn render(engine: &LayoutEngine, ctx: &dyn Canvas2d, paint_node: &NodeCanvasObject) {
	let theme = engine.theme();
	ctx.set_fill_style(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, engine.width, engine.height);

	ctx.save();
	ctx.translate(engine.transform.x, engine.transform.y);
	ctx.scale(engine.transform.k, engine.transform.k);

	draw_links(engine, ctx);
	if engine.particles.per_link > 0 {
		draw_particles(engine, ctx);
	}
	draw_nodes(engine, ctx, paint_node);

	ctx.restore();
}

fn draw_links(engine: &LayoutEngine, ctx: &dyn Canvas2d) {
	let theme = engine.theme();
	ctx.set_stroke_style(&theme.link.to_css());
	ctx.set_line_width(ScaleBehavior::Screen.apply(theme.link_width, engine.transform.k));

	engine.graph.visit_edges(|n1, n2, _| {
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_particles(engine: &LayoutEngine, ctx: &dyn Canvas2d) {
	let theme = engine.theme();
	let radius = ScaleBehavior::Screen.apply(theme.particle_radius, engine.transform.k);
	let fixed_color = theme.particle.map(|c| c.to_css());

	engine.graph.visit_edges(|n1, n2, _| {
		let color = fixed_color
			.as_deref()
			.unwrap_or(n1.data.user_data.color.as_str());
		ctx.set_fill_style(color);
		let (from, to) = (
			(n1.x() as f64, n1.y() as f64),
			(n2.x() as f64, n2.y() as f64),
		);
		for (x, y) in engine.particles.positions(from, to, engine.flow_time) {
			ctx.begin_path();
			ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
	});
}

fn draw_nodes(engine: &LayoutEngine, ctx: &dyn Canvas2d, paint_node: &NodeCanvasObject) {
	let k = engine.transform.k;
	engine.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let sprite = NodeSprite {
			node: &info.node,
			x: Some(node.x() as f64),
			y: Some(node.y() as f64),
			color: Some(&info.color),
		};
		paint_node(&sprite, ctx, k);
	});
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::super::canvas::recording::{Call, RecordingCanvas};
	use super::super::paint::NodePainter;
	use super::super::particles::LinkParticles;
	use super::super::theme::Theme;
	use super::super::types::{GraphData, GraphLink, GraphNode};
	use super::*;

	fn data() -> GraphData {
		let node = |id: u64| GraphNode {
			id,
			name: format!("n{id}"),
			node_type: "t".into(),
		};
		GraphData {
			nodes: vec![node(1), node(2), node(3)],
			links: vec![
				GraphLink {
					source: 1,
					target: 2,
				},
				GraphLink {
					source: 1,
					target: 3,
				},
			],
		}
	}

	fn engine() -> LayoutEngine {
		LayoutEngine::new(&data(), 400.0, 300.0, "node_type", Theme::default())
	}

	#[test]
	fn paints_every_node_after_links() {
		let engine = engine();
		let canvas = RecordingCanvas::default();
		render(&engine, &canvas, &NodePainter::default().into_canvas_object());
		let calls = canvas.calls();

		let labels: Vec<usize> = calls
			.iter()
			.enumerate()
			.filter(|(_, c)| matches!(c, Call::FillText(..)))
			.map(|(i, _)| i)
			.collect();
		assert_eq!(labels.len(), 3);
		let last_link = calls.iter().rposition(|c| matches!(c, Call::LineTo(..))).unwrap();
		assert!(last_link < labels[0]);

		assert_eq!(calls[0], Call::FillStyle(engine.theme().background.to_css()));
		assert_eq!(calls[1], Call::FillRect(0.0, 0.0, 400.0, 300.0));
		assert_eq!(calls[3], Call::Translate(200.0, 150.0));
		assert_eq!(calls.last(), Some(&Call::Restore));
	}

	#[test]
	fn painter_receives_zoom_and_auto_color() {
		let mut engine = engine();
		engine.transform.k = 2.5;
		let seen: Rc<RefCell<Vec<(u64, f64, Option<String>)>>> = Rc::default();
		let sink = seen.clone();
		let paint: NodeCanvasObject =
			Rc::new(move |sprite: &NodeSprite<'_>, _: &dyn Canvas2d, k: f64| {
				let color = sprite.color.map(str::to_string);
				sink.borrow_mut().push((sprite.node.id, k, color));
			});

		render(&engine, &RecordingCanvas::default(), &paint);
		let seen = seen.borrow();
		assert_eq!(seen.len(), 3);
		assert!(seen.iter().all(|(_, k, color)| *k == 2.5 && color.is_some()));
		assert_eq!(seen[0].2, seen[1].2);
	}

	#[test]
	fn draws_directional_particles() {
		let mut engine = engine();
		let noop: NodeCanvasObject = Rc::new(|_: &NodeSprite<'_>, _: &dyn Canvas2d, _: f64| {});

		let canvas = RecordingCanvas::default();
		render(&engine, &canvas, &noop);
		assert!(!canvas.calls().iter().any(|c| matches!(c, Call::Arc(..))));

		engine.particles = LinkParticles::new(6);
		let canvas = RecordingCanvas::default();
		render(&engine, &canvas, &noop);
		let arcs = canvas.calls().iter().filter(|c| matches!(c, Call::Arc(..))).count();
		assert_eq!(arcs, 12);
	}
}
