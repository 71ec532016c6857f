//! Per-node drawing.
//!
//! The renderer calls a [`NodeCanvasObject`] once per node per frame, after the
//! camera transform is applied and the node's position for that frame is known.
//! [`NodePainter`] is the default implementation: a labelled circle, or a
//! labelled rounded rectangle.
//!
//! Painting only issues calls on the supplied canvas. It reads nothing but
//! its arguments, so nodes can be painted in any order.

use std::f64::consts::PI;
use std::rc::Rc;

use super::canvas::Canvas2d;
use super::scale::{ScaleBehavior, clamp_scale};
use super::theme::Color;
use super::types::GraphNode;

pub const DEFAULT_FILL: &str = "rgba(66, 153, 225, 0.8)";
pub const DEFAULT_STROKE: &str = "rgba(255, 255, 255, 0.8)";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_RADIUS: f64 = 10.0;
pub const DEFAULT_FONT_SIZE: f64 = 8.0;

/// A node at its current simulated position.
#[derive(Clone, Copy, Debug)]
pub struct NodeSprite<'a> {
	pub node: &'a GraphNode,
	/// `None` until the layout engine has placed the node.
	pub x: Option<f64>,
	pub y: Option<f64>,
	/// Colour assigned by `node_auto_color_by`, if any.
	pub color: Option<&'a str>,
}

impl NodeSprite<'_> {
	/// Position, with unplaced coordinates at the origin.
	pub fn position(&self) -> (f64, f64) {
		(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
	}
}

/// Custom node drawing routine: `(sprite, canvas, zoom level)`.
pub type NodeCanvasObject = Rc<dyn Fn(&NodeSprite<'_>, &dyn Canvas2d, f64)>;

#[derive(Clone, Debug, PartialEq)]
pub struct CircleStyle {
	pub radius: f64,
	/// Explicit fill. `None` falls back to the node colour, then [`DEFAULT_FILL`].
	pub fill: Option<String>,
	pub stroke: String,
	pub stroke_width: f64,
}

impl Default for CircleStyle {
	fn default() -> Self {
		Self {
			radius: DEFAULT_RADIUS,
			fill: None,
			stroke: DEFAULT_STROKE.into(),
			stroke_width: DEFAULT_STROKE_WIDTH,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundedRectStyle {
	pub width: f64,
	pub height: f64,
	pub corner_radius: f64,
	pub fill: Option<String>,
	pub stroke: String,
	pub stroke_width: f64,
}

impl Default for RoundedRectStyle {
	fn default() -> Self {
		Self {
			width: 40.0,
			height: 16.0,
			corner_radius: 4.0,
			fill: None,
			stroke: DEFAULT_STROKE.into(),
			stroke_width: 1.0,
		}
	}
}

/// Node geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeShape {
	Circle(CircleStyle),
	RoundedRect(RoundedRectStyle),
}

impl Default for NodeShape {
	fn default() -> Self {
		NodeShape::Circle(CircleStyle::default())
	}
}

impl NodeShape {
	fn fill(&self) -> Option<&str> {
		match self {
			NodeShape::Circle(s) => s.fill.as_deref(),
			NodeShape::RoundedRect(s) => s.fill.as_deref(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
	/// Font size in screen pixels at zoom level 1.
	pub base_font_size: f64,
	pub font_family: String,
	/// Explicit text colour. `None` picks white or near-black against the fill.
	pub color: Option<String>,
	pub size_behavior: ScaleBehavior,
}

impl Default for LabelStyle {
	fn default() -> Self {
		Self {
			base_font_size: DEFAULT_FONT_SIZE,
			font_family: "Sans-Serif".into(),
			color: None,
			size_behavior: ScaleBehavior::Screen,
		}
	}
}

impl LabelStyle {
	/// CSS font for zoom level `k`; text keeps a constant on-screen size.
	pub fn font(&self, k: f64) -> String {
		let size = self.size_behavior.apply(self.base_font_size, k);
		format!("{}px {}", size, self.font_family)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintOptions {
	pub shape: NodeShape,
	pub label: LabelStyle,
}

/// Draws one node with its label.
///
/// `scale` is the camera zoom. Values that are zero, negative or not finite
/// are clamped to [`MIN_SCALE`](super::scale::MIN_SCALE).
pub fn paint_node<C: Canvas2d + ?Sized>(
	sprite: &NodeSprite<'_>,
	ctx: &C,
	scale: f64,
	options: &PaintOptions,
) {
	let k = clamp_scale(scale);
	let (x, y) = sprite.position();
	let fill = options
		.shape
		.fill()
		.or(sprite.color)
		.unwrap_or(DEFAULT_FILL);

	match &options.shape {
		NodeShape::Circle(style) => draw_circle(ctx, x, y, fill, style),
		NodeShape::RoundedRect(style) => draw_rounded_rect(ctx, x, y, fill, style),
	}

	let text_color = options
		.label
		.color
		.clone()
		.unwrap_or_else(|| Color::parse(fill).contrasting().to_css());
	ctx.set_fill_style(&text_color);
	ctx.set_font(&options.label.font(k));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.fill_text(&sprite.node.name, x, y);
}

fn draw_circle<C: Canvas2d + ?Sized>(ctx: &C, x: f64, y: f64, fill: &str, style: &CircleStyle) {
	ctx.begin_path();
	ctx.arc(x, y, style.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style(fill);
	ctx.set_stroke_style(&style.stroke);
	ctx.set_line_width(style.stroke_width);
	ctx.fill();
	ctx.stroke();
	ctx.close_path();
}

fn draw_rounded_rect<C: Canvas2d + ?Sized>(
	ctx: &C,
	x: f64,
	y: f64,
	fill: &str,
	style: &RoundedRectStyle,
) {
	let (hw, hh) = (style.width / 2.0, style.height / 2.0);
	let r = style.corner_radius.clamp(0.0, hw.min(hh));

	ctx.begin_path();
	ctx.set_fill_style(fill);
	ctx.set_stroke_style(&style.stroke);
	ctx.set_line_width(style.stroke_width);

	// Clockwise from the top edge; each arcTo rounds one corner.
	ctx.move_to(x - hw + r, y - hh);
	ctx.arc_to(x + hw, y - hh, x + hw, y + hh, r);
	ctx.arc_to(x + hw, y + hh, x - hw, y + hh, r);
	ctx.arc_to(x - hw, y + hh, x - hw, y - hh, r);
	ctx.arc_to(x - hw, y - hh, x + hw, y - hh, r);

	ctx.close_path();
	ctx.fill();
	ctx.stroke();
}

/// The default node painter, configured once and shared by every frame.
#[derive(Clone, Debug, Default)]
pub struct NodePainter {
	pub options: PaintOptions,
}

impl NodePainter {
	pub fn new(options: PaintOptions) -> Self {
		Self { options }
	}

	pub fn paint<C: Canvas2d + ?Sized>(&self, sprite: &NodeSprite<'_>, ctx: &C, scale: f64) {
		paint_node(sprite, ctx, scale, &self.options);
	}

	/// Wraps the painter as a node canvas callback.
	pub fn into_canvas_object(self) -> NodeCanvasObject {
		Rc::new(
			move |sprite: &NodeSprite<'_>, ctx: &dyn Canvas2d, scale: f64| {
				self.paint(sprite, ctx, scale)
			},
		)
	}
}
