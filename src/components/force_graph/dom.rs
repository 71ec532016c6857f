//! Browser implementations of the viewport traits.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::viewport::{Clock, Container, ResizeEvents, ResizeSubscription, Size};

/// A host element measured through `getBoundingClientRect`.
pub struct ElementContainer(Option<Element>);

impl ElementContainer {
	pub fn new(element: Option<Element>) -> Self {
		Self(element)
	}
}

impl Container for ElementContainer {
	fn bounding_box(&self) -> Option<Size> {
		let rect = self.0.as_ref()?.get_bounding_client_rect();
		let size = Size::new(rect.width(), rect.height());
		// Detached, not laid out yet, or collapsed.
		(!size.is_empty()).then_some(size)
	}
}

/// `resize` events of the browser window.
pub struct WindowResizeEvents;

impl ResizeEvents for WindowResizeEvents {
	fn subscribe(&self, on_resize: Box<dyn FnMut()>) -> ResizeSubscription {
		let Some(window) = web_sys::window() else {
			warn!("tree-graph: no window, resize tracking disabled");
			return ResizeSubscription::new(|| ());
		};
		let callback = Closure::wrap(on_resize);
		if let Err(e) =
			window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
		{
			warn!("tree-graph: failed to add resize listener: {:?}", e);
		}
		ResizeSubscription::new(move || {
			if let Err(e) = window
				.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
			{
				warn!("tree-graph: failed to remove resize listener: {:?}", e);
			}
			drop(callback);
		})
	}
}

/// `performance.now()`, falling back to `Date.now()`.
pub struct PerformanceClock;

impl Clock for PerformanceClock {
	fn now_ms(&self) -> f64 {
		web_sys::window()
			.and_then(|w| w.performance())
			.map(|p| p.now())
			.unwrap_or_else(js_sys::Date::now)
	}
}
