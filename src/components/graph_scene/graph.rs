//! Runtime graph model backing a loaded scene.
//!
//! Input [`GraphData`] is resolved once at load: optional node attributes
//! get their defaults here and an undirected adjacency index is built for
//! neighbor queries. The scene treats the result as read-only; no
//! validation of duplicate ids or dangling links is performed.

use std::collections::HashMap;

use super::types::{DEFAULT_NODE_COLOR, GraphData};

/// A node with display attributes resolved.
#[derive(Clone, Debug)]
pub struct Node {
	/// Stable node identifier.
	pub id: String,
	/// Point size multiplier.
	pub size: f32,
	/// Packed 0xRRGGBBAA point color.
	pub color: u32,
}

/// A link between two node ids.
#[derive(Clone, Debug)]
pub struct Link {
	/// Source node id.
	pub from_id: String,
	/// Target node id.
	pub to_id: String,
}

/// Read-only runtime graph: nodes, links and an undirected adjacency index.
#[derive(Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	links: Vec<Link>,
	adjacency: Vec<Vec<usize>>,
}

impl Graph {
	/// Resolve input data into a runtime graph.
	///
	/// Links naming unknown endpoints are kept (they still occupy a line
	/// record) but contribute no adjacency.
	pub fn new(data: GraphData) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		for node in data.nodes {
			let attrs = node.data.unwrap_or_default();
			index.insert(node.id.clone(), nodes.len());
			nodes.push(Node {
				id: node.id,
				size: attrs.size.unwrap_or(1.0),
				color: attrs.color.unwrap_or(DEFAULT_NODE_COLOR),
			});
		}

		let links: Vec<Link> = data
			.links
			.into_iter()
			.map(|link| Link {
				from_id: link.from_id,
				to_id: link.to_id,
			})
			.collect();

		let mut adjacency = vec![Vec::new(); nodes.len()];
		for link in &links {
			if let (Some(&from), Some(&to)) = (index.get(&link.from_id), index.get(&link.to_id)) {
				adjacency[from].push(to);
				adjacency[to].push(from);
			}
		}

		Self {
			nodes,
			links,
			adjacency,
		}
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links, dangling ones included.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Iterate nodes in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// Iterate links in insertion order.
	pub fn links(&self) -> impl Iterator<Item = &Link> {
		self.links.iter()
	}

	/// Neighbor ids of the node at `index`, both link directions.
	pub fn neighbors(&self, index: usize) -> impl Iterator<Item = &str> {
		self.adjacency[index]
			.iter()
			.map(|&neighbor| self.nodes[neighbor].id.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{GraphLink, GraphNode, NodeAttrs};
	use super::*;

	fn data() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode {
					id: "a".into(),
					data: Some(NodeAttrs {
						size: Some(3.0),
						color: None,
					}),
				},
				GraphNode {
					id: "b".into(),
					data: None,
				},
			],
			links: vec![
				GraphLink {
					from_id: "a".into(),
					to_id: "b".into(),
				},
				GraphLink {
					from_id: "b".into(),
					to_id: "missing".into(),
				},
			],
		}
	}

	#[test]
	fn attributes_default_at_load() {
		let graph = Graph::new(data());
		let nodes: Vec<_> = graph.nodes().collect();
		assert_eq!(nodes[0].size, 3.0);
		assert_eq!(nodes[0].color, DEFAULT_NODE_COLOR);
		assert_eq!(nodes[1].size, 1.0);
	}

	#[test]
	fn dangling_links_are_kept_but_not_adjacent() {
		let graph = Graph::new(data());
		assert_eq!(graph.link_count(), 2);
		let neighbors: Vec<_> = graph.neighbors(1).collect();
		assert_eq!(neighbors, vec!["a"]);
	}
}
