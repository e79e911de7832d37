//! # netvis Graphs
//!
//! Data preparation and PNG rendering for the two netvis pipelines:
//!
//! - coordinate plot: `graph.dat` rows, deduplicated points and lines
//!   between consecutive row pairs
//! - path graph: `path=[...]` routes from a simulator log, assembled into a
//!   directed graph and drawn with a force-directed layout

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod coordinates;
pub mod digraph;
pub mod layout;
pub mod path_log;
pub mod pipeline;
pub mod renderer;

pub use coordinates::{pair_segments, parse_coordinates, read_coordinates, unique_nodes};
pub use coordinates::{Coordinate, CoordinateSet, Segment};
pub use digraph::{GraphSummary, PathGraph};
pub use layout::{compute_layout, Bounds, Layout, LayoutSettings};
pub use path_log::{extract_path, extract_paths, read_paths, ExtractionReport, NodeId, RoutePath};
pub use pipeline::{run_coordinate_plot, run_path_graph, PathGraphOutcome};
pub use renderer::{
    arrow_geometry, parse_color, CoordinatePlotRenderer, GraphRenderer, NetworkGraphRenderer,
    NetworkScene, NetworkStyle, PixelMapper, PlotStyle,
};
