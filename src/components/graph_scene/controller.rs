//! Scene controller: graph loading, per-frame sync and the public surface.
//!
//! The controller owns at most one loaded scene at a time. Loading a graph
//! synchronously tears the previous scene down (frame task cancelled
//! first, render scene released second) before the replacement is built:
//! warm-up simulation step, collections sized exactly to the graph,
//! view records bound to stable handles, frame task started. Every tick
//! consumes at most one queued simulation step, then re-syncs the
//! collections and submits the frame.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use super::bus::{GRAPH_TOPIC, ReloadBus, Subscription};
use super::collections::{
	LineCollection, LineHandle, LineRecord, PointCollection, PointHandle, PointRecord,
	TextCollection, TextRecord,
};
use super::graph::Graph;
use super::labels::{self, DictLifetime, LabelDict, LabelState};
use super::layout::{LayoutConfig, LayoutDriver};
use super::scene::{Frame, RenderScene, ViewBox};
use super::scheduler::{FrameClock, FrameTask};
use super::types::GraphData;

const CLEAR_COLOR: [f32; 4] = [12.0 / 255.0, 41.0 / 255.0, 82.0 / 255.0, 1.0];
const SCENE_HALF_EXTENT: f32 = 40.0;
const LINK_COLOR: u32 = 0xffffff10;
const GLYPH_COLOR: u32 = 0xffffffff;
const DIM_GLYPH_COLOR: u32 = 0x888888ff;
const ID_FONT_SIZE: f32 = 2.0;
const LABEL_FONT_SIZE: f32 = 1.0;

/// Controller-level options, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SceneOptions {
	/// Whether link records are refreshed and drawn each frame.
	pub draw_links: bool,
	/// Lifetime of the label canonicalization memo.
	pub dict_lifetime: DictLifetime,
	/// Simulation parameters applied to every loaded graph.
	pub layout: LayoutConfig,
}

impl Default for SceneOptions {
	fn default() -> Self {
		Self {
			draw_links: true,
			dict_lifetime: DictLifetime::default(),
			layout: LayoutConfig::default(),
		}
	}
}

/// Ties a node to its view record and point handle.
struct NodeBinding {
	id: String,
	view: PointRecord,
	handle: PointHandle,
}

/// Ties a link to its view record and line handle.
struct LinkBinding {
	from_id: String,
	to_id: String,
	view: LineRecord,
	handle: LineHandle,
}

/// Everything owned by one loaded graph: simulation, render scene,
/// collections, bindings and label state. Dropped wholesale on reload.
struct LoadedScene {
	graph: Graph,
	layout: LayoutDriver,
	render: Box<dyn RenderScene>,
	points: PointCollection,
	lines: LineCollection,
	text: TextCollection,
	nodes: Vec<NodeBinding>,
	links: Vec<LinkBinding>,
	labels: Option<LabelState>,
	task: FrameTask,
}

/// Owns the current scene and drives it: loads graphs (directly or through
/// the reload bus), schedules frames, and exposes the public surface.
pub struct SceneController {
	options: SceneOptions,
	create_scene: Box<dyn Fn() -> Box<dyn RenderScene>>,
	clock: Rc<dyn FrameClock>,
	dict: LabelDict,
	pending_steps: u32,
	scene: Option<LoadedScene>,
	reload: Option<Subscription>,
}

impl SceneController {
	/// Create a controller and subscribe it to the reload bus. No graph is
	/// loaded yet; call [`SceneController::load`] or publish on the bus.
	pub fn new(
		create_scene: Box<dyn Fn() -> Box<dyn RenderScene>>,
		clock: Rc<dyn FrameClock>,
		options: SceneOptions,
		bus: &ReloadBus,
	) -> Rc<RefCell<Self>> {
		let controller = Rc::new(RefCell::new(Self {
			options,
			create_scene,
			clock,
			dict: LabelDict::new(),
			pending_steps: 0,
			scene: None,
			reload: None,
		}));

		let weak = Rc::downgrade(&controller);
		let subscription = bus.subscribe(GRAPH_TOPIC, move |data| {
			if let Some(controller) = weak.upgrade() {
				Self::load(&controller, data.clone());
			}
		});
		controller.borrow_mut().reload = Some(subscription);
		controller
	}

	/// Replace the current graph: tear down any loaded scene, then build
	/// and start a fresh one.
	pub fn load(controller: &Rc<RefCell<Self>>, data: GraphData) {
		let mut this = controller.borrow_mut();
		this.unload();

		info!(
			"graph-scene: loading {} nodes, {} links",
			data.nodes.len(),
			data.links.len()
		);

		let mut render = (this.create_scene)();
		render.set_clear_color(CLEAR_COLOR);
		render.set_view_box(ViewBox::centered(SCENE_HALF_EXTENT));

		let graph = Graph::new(data);
		let mut layout = LayoutDriver::new(&graph, this.options.layout);
		layout.step(); // warm-up, so the first render sees settled positions

		if this.options.dict_lifetime == DictLifetime::PerGraph {
			this.dict.clear();
		}

		let mut points = PointCollection::with_capacity(graph.node_count());
		let mut text = TextCollection::new();
		let mut nodes = Vec::with_capacity(graph.node_count());
		for node in graph.nodes() {
			let position = layout.position(&node.id).unwrap_or_default();
			let view = PointRecord {
				position,
				size: node.size,
				color: node.color,
			};
			let handle = points.add(view.clone());
			text.add_text(TextRecord {
				x: position[0],
				y: position[1],
				text: node.id.clone(),
				font_size: ID_FONT_SIZE,
				color: GLYPH_COLOR,
			});
			nodes.push(NodeBinding {
				id: node.id.clone(),
				view,
				handle,
			});
		}

		let mut lines = LineCollection::with_capacity(graph.link_count());
		let mut links = Vec::with_capacity(graph.link_count());
		for link in graph.links() {
			let from = layout.position(&link.from_id).unwrap_or_default();
			let to = layout.position(&link.to_id).unwrap_or_default();
			let view = LineRecord {
				from,
				to,
				color: LINK_COLOR,
			};
			let handle = lines.add(view.clone());
			links.push(LinkBinding {
				from_id: link.from_id.clone(),
				to_id: link.to_id.clone(),
				view,
				handle,
			});
		}

		let weak = Rc::downgrade(controller);
		let task = FrameTask::start(
			this.clock.clone(),
			Rc::new(move || {
				if let Some(controller) = weak.upgrade() {
					controller.borrow_mut().frame();
				}
			}),
		);

		this.scene = Some(LoadedScene {
			graph,
			layout,
			render,
			points,
			lines,
			text,
			nodes,
			links,
			labels: None,
			task,
		});
	}

	/// Queue `steps` additional simulation steps; the scheduler consumes
	/// at most one per tick.
	pub fn run_layout(&mut self, steps: u32) {
		self.pending_steps = self.pending_steps.saturating_add(steps);
	}

	/// Run one label-refinement round over the loaded graph, replacing the
	/// previous label state.
	pub fn weisfeiler_lehman_step(&mut self) {
		let Some(scene) = self.scene.as_mut() else {
			debug!("graph-scene: label step ignored, no graph loaded");
			return;
		};
		let previous = scene.labels.as_ref().map(|state| &state.labels);
		scene.labels = Some(labels::refine(&scene.graph, previous, &mut self.dict));
	}

	/// Queued-but-unconsumed simulation steps.
	pub fn pending_steps(&self) -> u32 {
		self.pending_steps
	}

	/// Whether a graph is currently loaded.
	pub fn is_loaded(&self) -> bool {
		self.scene.is_some()
	}

	/// Tear down the loaded scene and leave the reload bus. Safe to call
	/// when nothing is loaded.
	pub fn dispose(&mut self) {
		self.unload();
		self.reload = None;
	}

	// Frame task first, render scene second: a tick scheduled between the
	// two must never touch a disposed scene.
	fn unload(&mut self) {
		if let Some(mut scene) = self.scene.take() {
			scene.task.cancel();
			scene.render.dispose();
			debug!("graph-scene: scene disposed");
		}
	}

	/// One scheduler tick: consume at most one pending simulation step,
	/// then sync the collections and submit the frame.
	fn frame(&mut self) {
		let Some(scene) = self.scene.as_mut() else {
			return;
		};
		if self.pending_steps > 0 {
			self.pending_steps -= 1;
			scene.layout.step();
		}
		Self::sync(scene, self.options.draw_links);

		let LoadedScene {
			render,
			points,
			lines,
			text,
			..
		} = scene;
		render.render_frame(Frame {
			points,
			lines,
			text,
		});
	}

	/// Copy current layout positions (and label text when present) into
	/// the render collections, addressing records by stored handle.
	fn sync(scene: &mut LoadedScene, draw_links: bool) {
		scene.text.clear();

		for binding in &mut scene.nodes {
			let position = scene.layout.position(&binding.id).unwrap_or_default();
			binding.view.position = position;
			scene.points.update(binding.handle, &binding.view);

			match label_glyphs(scene.labels.as_ref(), &binding.id) {
				Some((label, signature)) => {
					scene.text.add_text(TextRecord {
						x: position[0],
						y: position[1],
						text: label,
						font_size: LABEL_FONT_SIZE,
						color: GLYPH_COLOR,
					});
					scene.text.add_text(TextRecord {
						x: position[0],
						y: position[1] - LABEL_FONT_SIZE,
						text: signature,
						font_size: LABEL_FONT_SIZE * 0.2,
						color: DIM_GLYPH_COLOR,
					});
				}
				None => {
					scene.text.add_text(TextRecord {
						x: position[0],
						y: position[1],
						text: binding.id.clone(),
						font_size: ID_FONT_SIZE,
						color: GLYPH_COLOR,
					});
				}
			}
		}

		if draw_links {
			for binding in &mut scene.links {
				binding.view.from = scene.layout.position(&binding.from_id).unwrap_or_default();
				binding.view.to = scene.layout.position(&binding.to_id).unwrap_or_default();
				scene.lines.update(binding.handle, &binding.view);
			}
		}
	}
}

/// Primary and secondary glyph text for a node, when label state is present.
fn label_glyphs(state: Option<&LabelState>, id: &str) -> Option<(String, String)> {
	let state = state?;
	let label = state.labels.get(id)?;
	let prev = state.prev_labels.get(id)?;
	let trail = state.uncompressed_labels.get(id)?;
	Some((label.clone(), format!("{};{}", prev, trail.join(","))))
}
