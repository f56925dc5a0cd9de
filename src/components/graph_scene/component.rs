//! Leptos component hosting the graph scene canvas.
//!
//! The component wires a canvas element to a scene controller inside an
//! `Effect`: the first run builds the controller and loads the initial
//! graph, later runs forward the `data` signal to the reload bus. A small
//! toolbar exposes the layout and label-refinement controls.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::bus::{GRAPH_TOPIC, ReloadBus};
use super::canvas::CanvasScene;
use super::controller::{SceneController, SceneOptions};
use super::scene::RenderScene;
use super::scheduler::RafClock;
use super::types::GraphData;

/// Simulation steps queued by one press of the layout button.
const LAYOUT_BURST: u32 = 50;

type ControllerSlot = Rc<RefCell<Option<Rc<RefCell<SceneController>>>>>;

/// Renders a live graph scene on a canvas element.
///
/// Pass graph data via the reactive `data` signal; replacement data
/// reloads the scene through the controller's bus subscription. The
/// component sizes itself to the window when `fullscreen` is set,
/// otherwise to its parent container; explicit `width`/`height` override
/// automatic sizing.
#[component]
pub fn GraphSceneCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller: ControllerSlot = Rc::new(RefCell::new(None));
	let bus = ReloadBus::new();

	let (controller_init, bus_init) = (controller.clone(), bus.clone());
	Effect::new(move |_| {
		let data = data.get();
		if controller_init.borrow().is_some() {
			bus_init.publish(GRAPH_TOPIC, &data);
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let factory = {
			let canvas = canvas.clone();
			Box::new(move || {
				CanvasScene::new(canvas.clone())
					.map(|scene| Box::new(scene) as Box<dyn RenderScene>)
					.expect("canvas 2d context")
			})
		};
		let created =
			SceneController::new(factory, Rc::new(RafClock), SceneOptions::default(), &bus_init);
		SceneController::load(&created, data);
		*controller_init.borrow_mut() = Some(created);
	});

	let controller_layout = controller.clone();
	let on_run_layout = move |_| {
		if let Some(controller) = controller_layout.borrow().as_ref() {
			controller.borrow_mut().run_layout(LAYOUT_BURST);
		}
	};

	let controller_label = controller.clone();
	let on_label_step = move |_| {
		if let Some(controller) = controller_label.borrow().as_ref() {
			controller.borrow_mut().weisfeiler_lehman_step();
		}
	};

	view! {
		<div class="graph-scene">
			<canvas node_ref=canvas_ref class="graph-scene-canvas" style="display: block;" />
			<div class="graph-scene-toolbar">
				<button on:click=on_run_layout>"Run layout"</button>
				<button on:click=on_label_step>"WL step"</button>
			</div>
		</div>
	}
}
