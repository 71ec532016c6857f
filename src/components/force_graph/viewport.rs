//! Keeps the drawing surface sized to its container and the camera framed.
//!
//! The controller never touches browser globals itself. It measures through a
//! [`Container`], learns about resizes through [`ResizeEvents`], reads time
//! from a [`Clock`] and drives the layout engine through the narrow
//! [`LayoutHandle`] capability. The DOM implementations live in `dom.rs`.
//!
//! Resizes are debounced: every notification restarts a quiet period, and the
//! re-fit happens on the first [`ViewportController::tick`] after the period
//! has elapsed. The geometry is read at that moment, so bursts of resize
//! events collapse into one re-fit with the final size.

use std::cell::Cell;
use std::rc::Rc;

/// Width and height in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// True unless both sides are positive.
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}
}

/// Imperative camera control exposed by the layout engine.
pub trait LayoutHandle {
	fn set_size(&mut self, width: f64, height: f64);
	/// Re-frame the camera so every node is visible inside `padding` pixels.
	fn zoom_to_fit(&mut self, padding: f64);
}

/// Host element geometry. `None` while the element is not mounted.
pub trait Container {
	fn bounding_box(&self) -> Option<Size>;
}

/// Monotonic time source in milliseconds.
pub trait Clock {
	fn now_ms(&self) -> f64;
}

/// Source of resize notifications.
pub trait ResizeEvents {
	/// Registers `on_resize`. The listener stays registered until the returned
	/// subscription is dropped.
	fn subscribe(&self, on_resize: Box<dyn FnMut()>) -> ResizeSubscription;
}

/// Registration guard for a resize listener. Dropping it unregisters.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct ResizeSubscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl ResizeSubscription {
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}
}

impl Drop for ResizeSubscription {
	fn drop(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

/// Tunables for [`ViewportController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	/// Padding kept around the graph when re-fitting, in screen pixels.
	pub fit_padding: f64,
	/// Quiet period after the last resize before re-fitting.
	pub debounce_ms: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			fit_padding: 100.0,
			debounce_ms: 200.0,
		}
	}
}

pub struct ViewportController {
	config: ViewportConfig,
	clock: Rc<dyn Clock>,
	size: Option<Size>,
	/// Caller-fixed sides that measurements never override.
	fixed_width: Option<f64>,
	fixed_height: Option<f64>,
	/// Time of the most recent unhandled resize notification.
	last_resize: Rc<Cell<Option<f64>>>,
	subscription: Option<ResizeSubscription>,
}

impl ViewportController {
	pub fn new(config: ViewportConfig, clock: Rc<dyn Clock>) -> Self {
		Self {
			config,
			clock,
			size: None,
			fixed_width: None,
			fixed_height: None,
			last_resize: Rc::new(Cell::new(None)),
			subscription: None,
		}
	}

	/// Pins a side to an explicit length; only the other side follows the container.
	pub fn with_fixed_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
		self.fixed_width = width;
		self.fixed_height = height;
		self
	}

	/// Container box with fixed sides applied. A collapsed box counts as missing.
	fn read(&self, container: &dyn Container) -> Option<Size> {
		let measured = container.bounding_box().filter(|s| !s.is_empty())?;
		Some(Size::new(
			self.fixed_width.unwrap_or(measured.width),
			self.fixed_height.unwrap_or(measured.height),
		))
	}

	/// Last measured size.
	pub fn size(&self) -> Option<Size> {
		self.size
	}

	pub fn is_active(&self) -> bool {
		self.subscription.is_some()
	}

	/// Whether a resize is waiting for its quiet period to elapse.
	pub fn is_pending(&self) -> bool {
		self.last_resize.get().is_some()
	}

	/// Mount: measure the container, size the engine and start listening.
	///
	/// Calling it again while active only re-measures.
	pub fn activate(
		&mut self,
		container: &dyn Container,
		events: &dyn ResizeEvents,
		handle: Option<&mut dyn LayoutHandle>,
	) -> Option<Size> {
		let size = self.measure(container);
		if let (Some(size), Some(handle)) = (size, handle) {
			handle.set_size(size.width, size.height);
		}
		if self.subscription.is_none() {
			let (last_resize, clock) = (self.last_resize.clone(), self.clock.clone());
			self.subscription = Some(events.subscribe(Box::new(move || {
				last_resize.set(Some(clock.now_ms()));
			})));
		}
		size
	}

	/// Unmount: release the resize listener and forget any pending re-fit.
	pub fn deactivate(&mut self) {
		self.subscription = None;
		self.last_resize.set(None);
	}

	/// Reads the container's current geometry. A missing box is a no-op.
	pub fn measure(&mut self, container: &dyn Container) -> Option<Size> {
		if let Some(size) = self.read(container) {
			self.size = Some(size);
		}
		self.size
	}

	/// Re-fits once the quiet period after the last resize has elapsed.
	///
	/// Returns `true` when the engine was resized and re-framed. Without a
	/// container box or an engine handle the pending resize is dropped.
	pub fn tick(&mut self, container: &dyn Container, handle: Option<&mut dyn LayoutHandle>) -> bool {
		let Some(at) = self.last_resize.get() else {
			return false;
		};
		if self.clock.now_ms() - at < self.config.debounce_ms {
			return false;
		}
		self.last_resize.set(None);

		let Some(size) = self.read(container) else {
			return false;
		};
		self.size = Some(size);
		let Some(handle) = handle else {
			return false;
		};
		log::debug!(
			"tree-graph: re-fit to {}x{} (padding {})",
			size.width,
			size.height,
			self.config.fit_padding
		);
		handle.set_size(size.width, size.height);
		handle.zoom_to_fit(self.config.fit_padding);
		true
	}
}


#[cfg(test)]
mod tests {
	use super::fakes::*;
	use super::*;

	fn controller(clock: &Rc<ManualClock>) -> ViewportController {
		ViewportController::new(ViewportConfig::default(), clock.clone())
	}

	#[test]
	fn activate_measures_and_sizes_engine() {
		let clock = Rc::new(ManualClock::default());
		let (container, events, mut handle) = (
			FakeContainer::sized(800.0, 600.0),
			FakeResizeEvents::default(),
			FakeHandle::default(),
		);
		let mut viewport = controller(&clock);

		let size = viewport.activate(&container, &events, Some(&mut handle));
		assert_eq!(size, Some(Size::new(800.0, 600.0)));
		assert_eq!(handle.calls, vec![HandleCall::SetSize(800.0, 600.0)]);
		assert!(viewport.is_active());
		assert_eq!(events.listener_count(), 1);

		// Re-activation does not stack listeners.
		viewport.activate(&container, &events, None);
		assert_eq!(events.listener_count(), 1);
	}

	#[test]
	fn resize_burst_refits_once_with_final_size() {
		let clock = Rc::new(ManualClock::default());
		let (container, events, mut handle) = (
			FakeContainer::sized(800.0, 600.0),
			FakeResizeEvents::default(),
			FakeHandle::default(),
		);
		let mut viewport = controller(&clock);
		viewport.activate(&container, &events, Some(&mut handle));
		handle.calls.clear();

		clock.set(10.0);
		container.resize(600.0, 450.0);
		events.fire();
		clock.set(50.0);
		container.resize(400.0, 300.0);
		events.fire();

		for now in [60.0, 120.0, 249.0] {
			clock.set(now);
			assert!(!viewport.tick(&container, Some(&mut handle)));
		}
		assert!(handle.calls.is_empty());

		clock.set(250.0);
		assert!(viewport.tick(&container, Some(&mut handle)));
		clock.set(1000.0);
		assert!(!viewport.tick(&container, Some(&mut handle)));

		assert_eq!(
			handle.calls,
			vec![
				HandleCall::SetSize(400.0, 300.0),
				HandleCall::ZoomToFit(100.0)
			]
		);
		assert_eq!(viewport.size(), Some(Size::new(400.0, 300.0)));
	}

	#[test]
	fn measurement_reads_current_geometry() {
		let clock = Rc::new(ManualClock::default());
		let (container, events) = (FakeContainer::sized(800.0, 600.0), FakeResizeEvents::default());
		let mut handle = FakeHandle::default();
		let mut viewport = controller(&clock);
		viewport.activate(&container, &events, None);

		events.fire();
		// Geometry changes after the notification but before the re-fit.
		container.resize(1024.0, 768.0);
		clock.set(500.0);
		assert!(viewport.tick(&container, Some(&mut handle)));
		assert_eq!(handle.calls[0], HandleCall::SetSize(1024.0, 768.0));
	}

	#[test]
	fn missing_container_or_handle_is_a_noop() {
		let clock = Rc::new(ManualClock::default());
		let (container, events) = (FakeContainer::default(), FakeResizeEvents::default());
		let mut viewport = controller(&clock);

		assert_eq!(viewport.activate(&container, &events, None), None);
		events.fire();
		clock.set(300.0);
		assert!(!viewport.tick(&container, None));
		assert!(!viewport.is_pending());

		container.resize(300.0, 200.0);
		events.fire();
		clock.set(600.0);
		assert!(!viewport.tick(&container, None));
		assert_eq!(viewport.size(), Some(Size::new(300.0, 200.0)));
	}

	#[test]
	fn collapsed_box_counts_as_unmeasured() {
		let clock = Rc::new(ManualClock::default());
		let (container, events) = (FakeContainer::sized(800.0, 0.0), FakeResizeEvents::default());
		let mut handle = FakeHandle::default();
		let mut viewport = controller(&clock);

		assert_eq!(viewport.activate(&container, &events, Some(&mut handle)), None);
		assert!(handle.calls.is_empty());

		container.resize(0.0, 600.0);
		events.fire();
		clock.set(300.0);
		assert!(!viewport.tick(&container, Some(&mut handle)));
		assert_eq!(viewport.size(), None);
	}

	#[test]
	fn fixed_side_survives_refit() {
		let clock = Rc::new(ManualClock::default());
		let (container, events) = (FakeContainer::sized(800.0, 600.0), FakeResizeEvents::default());
		let mut handle = FakeHandle::default();
		let mut viewport = controller(&clock).with_fixed_size(Some(500.0), None);

		let size = viewport.activate(&container, &events, Some(&mut handle));
		assert_eq!(size, Some(Size::new(500.0, 600.0)));

		container.resize(400.0, 300.0);
		events.fire();
		clock.set(250.0);
		assert!(viewport.tick(&container, Some(&mut handle)));
		assert_eq!(
			handle.calls,
			vec![
				HandleCall::SetSize(500.0, 600.0),
				HandleCall::SetSize(500.0, 300.0),
				HandleCall::ZoomToFit(100.0),
			]
		);
		assert_eq!(viewport.size(), Some(Size::new(500.0, 300.0)));
	}

	#[test]
	fn deactivate_releases_listener() {
		let clock = Rc::new(ManualClock::default());
		let (container, events) = (FakeContainer::sized(10.0, 10.0), FakeResizeEvents::default());
		let mut viewport = controller(&clock);
		viewport.activate(&container, &events, None);
		events.fire();
		assert!(viewport.is_pending());

		viewport.deactivate();
		assert_eq!(events.listener_count(), 0);
		assert!(!viewport.is_active());
		assert!(!viewport.is_pending());

		events.fire();
		assert!(!viewport.is_pending());
	}

	#[test]
	fn dropping_controller_releases_listener() {
		let clock = Rc::new(ManualClock::default());
		let (container, events) = (FakeContainer::sized(10.0, 10.0), FakeResizeEvents::default());
		{
			let mut viewport = controller(&clock);
			viewport.activate(&container, &events, None);
			assert_eq!(events.listener_count(), 1);
		}
		assert_eq!(events.listener_count(), 0);
	}
}
