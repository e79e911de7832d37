//! Force-directed placement of path graph nodes.

use crate::digraph::PathGraph;
use crate::path_log::NodeId;
use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use netvis_config::LayoutConfig;
use std::collections::{BTreeMap, HashMap};
use std::f32::consts::PI;
use tracing::{debug, warn};

const NODE_MASS: f32 = 10.0;

/// Parameters of the force simulation
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub iterations: u32,
    pub time_step: f32,
    pub charge: f32,
    pub spring: f32,
    pub max_force: f32,
    pub node_speed: f32,
    pub damping: f32,
    pub seed_radius: f32,
}

impl From<&LayoutConfig> for LayoutSettings {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            iterations: config.iterations,
            time_step: config.time_step,
            charge: config.charge,
            spring: config.spring,
            max_force: config.max_force,
            node_speed: config.node_speed,
            damping: config.damping,
            seed_radius: config.seed_radius,
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl LayoutSettings {
    fn simulation_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            force_charge: self.charge,
            force_spring: self.spring,
            force_max: self.max_force,
            node_speed: self.node_speed,
            damping_factor: self.damping,
        }
    }
}

/// Axis aligned box around all positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Node positions in layout space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: BTreeMap<NodeId, (f64, f64)>,
}

impl Layout {
    pub fn get(&self, node: NodeId) -> Option<(f64, f64)> {
        self.positions.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in ascending node order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, (f64, f64))> + '_ {
        self.positions.iter().map(|(&node, &pos)| (node, pos))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.positions.values();
        let &(x, y) = iter.next()?;
        Some(iter.fold(
            Bounds {
                min_x: x,
                max_x: x,
                min_y: y,
                max_y: y,
            },
            |b, &(x, y)| Bounds {
                min_x: b.min_x.min(x),
                max_x: b.max_x.max(x),
                min_y: b.min_y.min(y),
                max_y: b.max_y.max(y),
            },
        ))
    }
}

/// Seed position of node `i` of `count` on a circle of `radius`
fn seed_position(i: usize, count: usize, radius: f32) -> (f32, f32) {
    let angle = i as f32 * 2.0 * PI / count as f32;
    (radius * angle.cos(), radius * angle.sin())
}

/// Place every node of `graph` with a force simulation.
///
/// Nodes start evenly spaced on a circle in ascending id order, so equal
/// input always gives equal output. Self-loops exert no force and are left
/// out of the simulation.
pub fn compute_layout(graph: &PathGraph, settings: &LayoutSettings) -> Layout {
    let nodes = graph.nodes();
    if nodes.is_empty() {
        return Layout::default();
    }

    let mut simulation: ForceGraph<NodeId, ()> =
        ForceGraph::new(settings.simulation_parameters());
    let mut index = HashMap::with_capacity(nodes.len());
    let mut seeds = HashMap::with_capacity(nodes.len());

    for (i, &node) in nodes.iter().enumerate() {
        let (x, y) = seed_position(i, nodes.len(), settings.seed_radius);
        let idx = simulation.add_node(NodeData {
            x,
            y,
            mass: NODE_MASS,
            is_anchor: false,
            user_data: node,
        });
        index.insert(node, idx);
        seeds.insert(node, (x, y));
    }

    for (from, to) in graph.edges() {
        if from == to {
            continue;
        }
        if let (Some(&src), Some(&tgt)) = (index.get(&from), index.get(&to)) {
            simulation.add_edge(src, tgt, EdgeData::default());
        }
    }

    for _ in 0..settings.iterations {
        simulation.update(settings.time_step);
    }

    let mut positions = BTreeMap::new();
    let mut reseeded = 0usize;
    simulation.visit_nodes(|n| {
        let node = n.data.user_data;
        let (x, y) = if n.x().is_finite() && n.y().is_finite() {
            (n.x(), n.y())
        } else {
            reseeded += 1;
            seeds.get(&node).copied().unwrap_or((0.0, 0.0))
        };
        positions.insert(node, (f64::from(x), f64::from(y)));
    });

    if reseeded > 0 {
        warn!(reseeded, "Simulation diverged for some nodes, using seed positions");
    }
    debug!(
        nodes = positions.len(),
        iterations = settings.iterations,
        "Computed force layout"
    );

    Layout { positions }
}
