//! Zoom-dependent sizing.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system of the simulation. Values in
//!   world-space scale proportionally with zoom.
//! - **Screen-space**: pixel coordinates on the canvas. Values in screen-space
//!   stay constant regardless of zoom level.
//!
//! All drawing happens after the camera transform has been applied, so a
//! screen-space size must be divided by the zoom level `k` before use.

/// Smallest zoom level accepted by scale computations.
pub const MIN_SCALE: f64 = 0.01;

/// Replaces a zero, negative or non-finite zoom level with [`MIN_SCALE`].
pub fn clamp_scale(k: f64) -> f64 {
	if k.is_finite() && k >= MIN_SCALE {
		k
	} else {
		MIN_SCALE
	}
}

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		let k = clamp_scale(k);
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}
