//! Directional particles travelling along links.

/// Evenly spaced particles flowing from a link's source to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkParticles {
	/// Particles per link. Zero disables them.
	pub per_link: u32,
	/// Fraction of the link length covered per second.
	pub speed: f64,
}

impl Default for LinkParticles {
	fn default() -> Self {
		Self {
			per_link: 0,
			speed: 0.6,
		}
	}
}

impl LinkParticles {
	pub fn new(per_link: u32) -> Self {
		Self {
			per_link,
			..Self::default()
		}
	}

	/// Progress (`0.0..1.0`) of each particle along its link at `time` seconds.
	pub fn offsets(&self, time: f64) -> impl Iterator<Item = f64> + '_ {
		let n = self.per_link as f64;
		let base = time * self.speed;
		(0..self.per_link).map(move |i| {
			let t = base + i as f64 / n;
			t - t.floor()
		})
	}

	/// Particle positions on the segment `(x1, y1) -> (x2, y2)`.
	pub fn positions(
		&self,
		(x1, y1): (f64, f64),
		(x2, y2): (f64, f64),
		time: f64,
	) -> impl Iterator<Item = (f64, f64)> + '_ {
		self.offsets(time)
			.map(move |t| (x1 + (x2 - x1) * t, y1 + (y2 - y1) * t))
	}
}
