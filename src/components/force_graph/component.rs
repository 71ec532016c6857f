//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates a container and a canvas element and wires up
//! mouse/wheel event handlers for node dragging, panning, and zooming. An
//! animation loop runs via `requestAnimationFrame`; each frame advances the
//! simulation, lets the viewport controller re-fit after resizes, and renders.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::dom::{ElementContainer, PerformanceClock, WindowResizeEvents};
use super::paint::{NodeCanvasObject, NodePainter};
use super::render;
use super::session::{Cosmetics, GraphSession};
use super::theme::Theme;
use super::types::GraphData;
use super::viewport::{LayoutHandle, Size, ViewportConfig, ViewportController};

/// Simulation step per animation frame, in seconds.
const FRAME_DT: f32 = 0.016;
/// Canvas size used when the container cannot be measured.
const FALLBACK_SIZE: Size = Size::new(800.0, 600.0);

/// Bundles the layout session with viewport tracking and drawing configuration.
struct GraphContext {
	session: GraphSession,
	viewport: ViewportController,
	paint_node: NodeCanvasObject,
	theme: Theme,
}

/// Owns the animation loop and resize listener of one mounted view.
///
/// Stored in the component's reactive owner, so it is dropped when the view
/// is torn down.
struct FrameLoop {
	frame_id: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	context: Rc<RefCell<GraphContext>>,
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
		if let Ok(mut c) = self.context.try_borrow_mut() {
			c.viewport.deactivate();
		}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// The layout engine is built from `graph_data` and kept for as long as the
/// graph stays the same; changing the colouring field or the particle count
/// restyles the running simulation. Without explicit `width`/`height` the
/// canvas follows the size of its container and re-fits the camera after
/// window resizes.
#[component]
pub fn ForceGraphView(
	/// Nodes and links to lay out.
	#[prop(into)]
	graph_data: Signal<Arc<GraphData>>,
	/// Custom node drawing. Defaults to a labelled circle.
	#[prop(optional)]
	node_canvas_object: Option<NodeCanvasObject>,
	/// Node field whose distinct values get distinct colours.
	#[prop(into, default = Signal::stored("node_type".to_string()))]
	node_auto_color_by: Signal<String>,
	/// Moving particles drawn along each link.
	#[prop(into, default = Signal::stored(0))]
	link_directional_particles: Signal<u32>,
	/// Fixed canvas width in pixels.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height in pixels.
	#[prop(default = None)]
	height: Option<f64>,
	/// Re-fit padding and resize debounce.
	#[prop(default = ViewportConfig::default())]
	viewport: ViewportConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let fixed_size = width.is_some() && height.is_some();

	let context = Rc::new(RefCell::new(GraphContext {
		session: GraphSession::new(),
		viewport: ViewportController::new(viewport, Rc::new(PerformanceClock))
			.with_fixed_size(width, height),
		paint_node: node_canvas_object
			.unwrap_or_else(|| NodePainter::default().into_canvas_object()),
		theme: Theme::default(),
	}));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let _frame_loop = StoredValue::new_local(FrameLoop {
		frame_id: frame_id.clone(),
		callback: animate.clone(),
		context: context.clone(),
	});
	let (context_init, animate_init, frame_init) =
		(context.clone(), animate.clone(), frame_id.clone());

	Effect::new(move |_| {
		let data = graph_data.get();
		let cosmetics = Cosmetics {
			color_by: node_auto_color_by.get(),
			particles: link_directional_particles.get(),
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let container = ElementContainer::new(container_ref.get().map(Element::from));

		{
			let mut guard = context_init.borrow_mut();
			let c = &mut *guard;
			let measured = if fixed_size {
				None
			} else {
				c.viewport.activate(&container, &WindowResizeEvents, None)
			};
			// Measurements already carry the fixed sides.
			let size = measured.unwrap_or(Size::new(
				width.unwrap_or(FALLBACK_SIZE.width),
				height.unwrap_or(FALLBACK_SIZE.height),
			));
			canvas.set_width(size.width as u32);
			canvas.set_height(size.height as u32);

			c.session.sync(&data, size, &cosmetics, &c.theme);
			if let Some(engine) = c.session.engine_mut() {
				engine.set_size(size.width, size.height);
			}
		}

		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = context_2d(&canvas) else {
			warn!("tree-graph: canvas 2d context unavailable");
			return;
		};

		let (context_anim, animate_inner, frame_inner) =
			(context_init.clone(), animate_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut guard = context_anim.borrow_mut();
				let c = &mut *guard;
				if !fixed_size {
					let container =
						ElementContainer::new(container_ref.get_untracked().map(Element::from));
					let handle = c
						.session
						.engine_mut()
						.map(|e| e as &mut dyn LayoutHandle);
					if c.viewport.tick(&container, handle) {
						if let Some(size) = c.viewport.size() {
							canvas.set_width(size.width as u32);
							canvas.set_height(size.height as u32);
						}
					}
				}
				if let Some(engine) = c.session.engine_mut() {
					engine.tick(FRAME_DT);
					render::render(engine, &ctx, &c.paint_node);
				}
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame_inner.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			frame_init.set(
				window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(engine) = context_md.borrow_mut().session.engine_mut() {
			engine.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(engine) = context_mm.borrow_mut().session.engine_mut() {
			engine.pointer_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(engine) = context_mu.borrow_mut().session.engine_mut() {
			engine.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(engine) = context_ml.borrow_mut().session.engine_mut() {
			engine.pointer_up();
		}
	};

	let context_wh = context;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(engine) = context_wh.borrow_mut().session.engine_mut() {
			engine.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="force-graph-container"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="position: absolute; top: 0; left: 0; display: block; cursor: grab;"
			/>
		</div>
	}
}
