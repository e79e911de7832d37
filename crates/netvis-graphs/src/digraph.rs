//! Directed graph assembled from logged routes.

use crate::path_log::{NodeId, RoutePath};
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Directed graph whose edges are the consecutive hops of every route.
///
/// Inserting an existing edge is a no-op, so hops repeated across routes
/// appear once. Nodes only enter the graph through edges.
#[derive(Debug, Clone, Default)]
pub struct PathGraph {
    graph: DiGraphMap<NodeId, ()>,
}

/// Serializable snapshot of a [`PathGraph`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl PathGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every route's consecutive pairs
    pub fn from_paths(paths: &[RoutePath]) -> Self {
        let mut graph = Self::new();
        for path in paths {
            graph.add_path(path);
        }

        info!(
            paths = paths.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Assembled path graph"
        );
        graph
    }

    /// Add an edge for each consecutive pair of `path`
    pub fn add_path(&mut self, path: &[NodeId]) {
        for hop in path.windows(2) {
            self.add_edge(hop[0], hop[1]);
        }
    }

    /// Add `from -> to`; returns `false` when the edge already existed
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        self.graph.add_edge(from, to, ()).is_none()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Node ids in ascending order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Edges in ascending order
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<(NodeId, NodeId)> =
            self.graph.all_edges().map(|(from, to, _)| (from, to)).collect();
        edges.sort_unstable();
        edges
    }

    /// Outgoing neighbours of `node` in ascending order
    pub fn successors(&self, node: NodeId) -> Vec<NodeId> {
        if !self.graph.contains_node(node) {
            return Vec::new();
        }
        let mut successors: Vec<NodeId> = self.graph.neighbors(node).collect();
        successors.sort_unstable();
        successors
    }

    /// Node to outgoing neighbour set mapping
    pub fn adjacency(&self) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
        self.graph
            .nodes()
            .map(|node| (node, self.graph.neighbors(node).collect()))
            .collect()
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            nodes: self.nodes(),
            edges: self.edges(),
        }
    }
}
