//! Graph data structures for input to the scene controller.

use serde::Deserialize;

/// Packed 0xRRGGBBAA color used for nodes without an explicit color.
pub const DEFAULT_NODE_COLOR: u32 = 0x90f8fcff;

/// Optional display attributes carried by an input node.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct NodeAttrs {
	/// Point size multiplier (1.0 = normal).
	pub size: Option<f32>,
	/// Packed 0xRRGGBBAA color override.
	pub color: Option<u32>,
}

/// A node in the input graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Optional display attributes; defaults are resolved once at load.
	#[serde(default)]
	pub data: Option<NodeAttrs>,
}

/// A link between two nodes.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
	/// Source node id.
	pub from_id: String,
	/// Target node id.
	pub to_id: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Generate a `rows` x `cols` grid graph, the built-in demo input.
	pub fn grid(rows: usize, cols: usize) -> Self {
		let mut nodes = Vec::with_capacity(rows * cols);
		let mut links = Vec::new();
		for row in 0..rows {
			for col in 0..cols {
				let id = format!("{}_{}", row, col);
				if col > 0 {
					links.push(GraphLink {
						from_id: format!("{}_{}", row, col - 1),
						to_id: id.clone(),
					});
				}
				if row > 0 {
					links.push(GraphLink {
						from_id: format!("{}_{}", row - 1, col),
						to_id: id.clone(),
					});
				}
				nodes.push(GraphNode { id, data: None });
			}
		}
		Self { nodes, links }
	}
}
