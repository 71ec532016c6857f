//! Colours, palettes and the per-field auto-colouring used by the graph.

use std::collections::HashMap;

use super::types::GraphNode;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Relative luminance in `0.0..=1.0` (sRGB weights, no gamma).
	pub fn luminance(self) -> f64 {
		(0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
	}

	/// Text colour readable on top of this colour.
	pub fn contrasting(self) -> Color {
		if self.luminance() > 0.6 {
			Color::rgb(17, 17, 17)
		} else {
			Color::rgb(255, 255, 255)
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS colour string.
	/// Supports hex (`#RRGGBB`, `#RGB`), `rgb()`/`rgba()` and the `white`/`black`
	/// keywords. Anything else becomes mid grey.
	pub fn parse(color_str: &str) -> Color {
		let s = color_str.trim();
		let hex = |h: &str| u8::from_str_radix(h, 16).unwrap_or(128);
		let is_hex = s.starts_with('#') && s.is_ascii();
		if is_hex && s.len() == 7 {
			Color::rgb(hex(&s[1..3]), hex(&s[3..5]), hex(&s[5..7]))
		} else if is_hex && s.len() == 4 {
			let short = |h: &str| hex(h).saturating_mul(17);
			Color::rgb(short(&s[1..2]), short(&s[2..3]), short(&s[3..4]))
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else if s.eq_ignore_ascii_case("white") {
			Color::rgb(255, 255, 255)
		} else if s.eq_ignore_ascii_case("black") {
			Color::rgb(0, 0, 0)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// A curated color palette for nodes.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Ten-colour categorical palette (default).
	pub fn category() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(127, 127, 127), // Grey
				Color::rgb(188, 189, 34),  // Olive
				Color::rgb(23, 190, 207),  // Cyan
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Visual style of everything drawn around the nodes.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub link: Color,
	pub link_width: f64,
	/// Colour of directional particles. `None` uses the source node's colour.
	pub particle: Option<Color>,
	/// Particle radius in screen pixels.
	pub particle_radius: f64,
	pub palette: NodePalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(17, 24, 39),
			link: Color::rgba(140, 160, 180, 0.5),
			link_width: 1.0,
			particle: None,
			particle_radius: 2.0,
			palette: NodePalette::category(),
		}
	}
}

/// Assigns palette colours to distinct values of one node field.
///
/// Values are numbered in order of first appearance, so equal values share a
/// colour and a given graph always colours the same way.
#[derive(Clone, Debug)]
pub struct AutoColor {
	field: String,
	assigned: HashMap<String, usize>,
}

impl AutoColor {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			assigned: HashMap::new(),
		}
	}

	pub fn field(&self) -> &str {
		&self.field
	}

	/// Colour for `node`. Nodes lacking the field share the first palette entry.
	pub fn color_for(&mut self, node: &GraphNode, palette: &NodePalette) -> Color {
		let Some(value) = node.field(&self.field) else {
			return palette.get(0);
		};
		let next = self.assigned.len();
		let index = *self.assigned.entry(value).or_insert(next);
		palette.get(index)
	}

	/// Colours every node in order.
	pub fn assign(&mut self, nodes: &[GraphNode], palette: &NodePalette) -> Vec<String> {
		nodes
			.iter()
			.map(|n| self.color_for(n, palette).to_css())
			.collect()
	}
}
