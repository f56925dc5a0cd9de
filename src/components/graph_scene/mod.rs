//! Live graph scene: force layout, record collections and label overlays.
//!
//! The scene controller owns a loaded graph, its force simulation and three
//! GPU-oriented record collections (points for nodes, lines for links,
//! glyph quads for text), and keeps simulation state and render records
//! synchronized from a cancellable per-frame task. Graphs can be replaced
//! at runtime through a reload bus without leaking the previous scene, and
//! node labels can be refined one Weisfeiler-Lehman round at a time.
//!
//! # Example
//!
//! ```ignore
//! use wl_graph_scene::{GraphData, GraphSceneCanvas};
//!
//! let data = GraphData::grid(10, 10);
//!
//! view! { <GraphSceneCanvas data=data.into() fullscreen=true /> }
//! ```

mod bus;
mod canvas;
mod collections;
mod component;
mod controller;
mod graph;
mod labels;
mod layout;
mod scene;
mod scheduler;
mod types;

pub use bus::{GRAPH_TOPIC, ReloadBus, Subscription};
pub use canvas::CanvasScene;
pub use collections::{
	LineCollection, LineHandle, LineRecord, PointCollection, PointHandle, PointRecord,
	TextCollection, TextRecord,
};
pub use component::GraphSceneCanvas;
pub use controller::{SceneController, SceneOptions};
pub use graph::{Graph, Link, Node};
pub use labels::{DictLifetime, LabelDict, LabelState};
pub use layout::{LayoutConfig, LayoutDriver};
pub use scene::{Frame, RenderScene, ViewBox};
pub use scheduler::{FrameClock, FrameHandle, FrameTask, RafClock};
pub use types::{GraphData, GraphLink, GraphNode, NodeAttrs};
