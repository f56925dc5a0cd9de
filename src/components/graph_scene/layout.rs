//! Force simulation wrapper: discrete stepping and position lookup.
//!
//! The driver owns a `force_graph` simulation over the loaded graph and
//! advances it one fixed time step at a time. Positions are cached per step
//! so per-frame lookups stay cheap; the simulation is planar, so z is
//! always 0.

use std::collections::HashMap;
use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::graph::Graph;

/// Fixed simulation parameters for a loaded scene.
///
/// This is a configuration surface, not a tunable API: a scene is built
/// with one config and keeps it for its lifetime.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
	/// Simulation time advanced by each discrete step.
	pub time_step: f32,
	/// Spring rest length; also scales the initial placement ring.
	pub spring_length: f32,
	/// Spring stiffness.
	pub spring_coefficient: f32,
	/// Pairwise repulsion strength (negative pushes nodes apart).
	pub gravity: f32,
	/// Velocity damping per step.
	pub drag_coefficient: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			time_step: 0.5,
			spring_length: 10.0,
			spring_coefficient: 0.8,
			gravity: -12.0,
			drag_coefficient: 0.9,
		}
	}
}

// Factors mapping the config surface onto the simulation's tuned operating
// range: the defaults above land on charge 150 / spring 0.05 / damping 0.9.
const CHARGE_PER_GRAVITY: f32 = -12.5;
const SPRING_SCALE: f32 = 0.0625;
const NODE_MASS: f32 = 10.0;

/// Advances the force simulation one discrete step at a time and answers
/// position queries by node id.
pub struct LayoutDriver {
	simulation: ForceGraph<(), ()>,
	time_step: f32,
	indices: HashMap<String, DefaultNodeIdx>,
	positions: HashMap<DefaultNodeIdx, [f32; 3]>,
	steps_run: u64,
}

impl LayoutDriver {
	/// Build a simulation over `graph`, seeding nodes on a ring sized by
	/// the spring length.
	pub fn new(graph: &Graph, config: LayoutConfig) -> Self {
		let mut simulation = ForceGraph::new(SimulationParameters {
			force_charge: config.gravity * CHARGE_PER_GRAVITY,
			force_spring: config.spring_coefficient * SPRING_SCALE,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: config.drag_coefficient,
		});

		let count = graph.node_count().max(1) as f32;
		let radius = config.spring_length * count.sqrt();
		let mut indices = HashMap::with_capacity(graph.node_count());
		for (i, node) in graph.nodes().enumerate() {
			let angle = i as f32 * 2.0 * PI / count;
			let idx = simulation.add_node(NodeData {
				x: radius * angle.cos(),
				y: radius * angle.sin(),
				mass: NODE_MASS,
				is_anchor: false,
				user_data: (),
			});
			indices.insert(node.id.clone(), idx);
		}

		for link in graph.links() {
			if let (Some(&from), Some(&to)) =
				(indices.get(&link.from_id), indices.get(&link.to_id))
			{
				simulation.add_edge(from, to, EdgeData::default());
			}
		}

		let mut driver = Self {
			simulation,
			time_step: config.time_step,
			indices,
			positions: HashMap::new(),
			steps_run: 0,
		};
		driver.refresh_positions();
		driver
	}

	/// Advance the simulation by one fixed time step.
	pub fn step(&mut self) {
		self.simulation.update(self.time_step);
		self.steps_run += 1;
		self.refresh_positions();
	}

	/// Current position of a node; z is always 0 for the planar simulation.
	pub fn position(&self, id: &str) -> Option<[f32; 3]> {
		self.indices
			.get(id)
			.and_then(|idx| self.positions.get(idx))
			.copied()
	}

	/// Number of discrete steps run so far, the warm-up step included.
	pub fn steps_run(&self) -> u64 {
		self.steps_run
	}

	fn refresh_positions(&mut self) {
		let positions = &mut self.positions;
		positions.clear();
		self.simulation.visit_nodes(|node| {
			positions.insert(node.index(), [node.x(), node.y(), 0.0]);
		});
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::GraphData;
	use super::*;

	fn driver(rows: usize, cols: usize) -> LayoutDriver {
		let graph = Graph::new(GraphData::grid(rows, cols));
		LayoutDriver::new(&graph, LayoutConfig::default())
	}

	#[test]
	fn positions_are_available_before_any_step() {
		let driver = driver(2, 2);
		let position = driver.position("0_0").unwrap();
		assert_eq!(position[2], 0.0);
		assert!(position[0].is_finite() && position[1].is_finite());
	}

	#[test]
	fn seeded_positions_are_distinct() {
		let driver = driver(2, 2);
		assert_ne!(driver.position("0_0"), driver.position("1_1"));
	}

	#[test]
	fn stepping_counts_and_keeps_positions_finite() {
		let mut driver = driver(3, 3);
		for _ in 0..5 {
			driver.step();
		}
		assert_eq!(driver.steps_run(), 5);
		let position = driver.position("2_2").unwrap();
		assert!(position[0].is_finite() && position[1].is_finite());
	}

	#[test]
	fn unknown_id_has_no_position() {
		let driver = driver(2, 2);
		assert_eq!(driver.position("nope"), None);
	}

	#[test]
	fn empty_graph_steps_without_panicking() {
		let graph = Graph::new(GraphData::default());
		let mut driver = LayoutDriver::new(&graph, LayoutConfig::default());
		driver.step();
		assert_eq!(driver.steps_run(), 1);
	}
}
