//! wl-graph-scene: live force-directed graph scene with Weisfeiler-Lehman
//! label overlays.
//!
//! This crate binds a mutable graph and an iterative force layout to a
//! record-collection rendering pipeline, keeping simulation state and
//! render records synchronized every frame. Node labels can be refined one
//! Weisfeiler-Lehman round at a time and are drawn over the nodes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph_scene::{
	GraphData, GraphLink, GraphNode, GraphSceneCanvas, SceneController, SceneOptions,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("wl-graph-scene: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"wl-graph-scene: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("wl-graph-scene: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data from the DOM, falling back to the built-in grid demo.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(|| GraphData::grid(10, 10));
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Weisfeiler-Lehman Graph Labels" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphSceneCanvas data=graph_signal fullscreen=true />
			<div class="graph-overlay">
				<h1>"Weisfeiler-Lehman Labels"</h1>
				<p class="subtitle">
					"Run layout to settle the graph. Each WL step refines node labels."
				</p>
			</div>
		</div>
	}
}
