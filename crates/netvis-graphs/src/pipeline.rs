//! End-to-end runs of the two plotting pipelines.

use crate::coordinates::CoordinateSet;
use crate::digraph::{GraphSummary, PathGraph};
use crate::layout::LayoutSettings;
use crate::path_log::{read_paths, ExtractionReport};
use crate::renderer::{
    CoordinatePlotRenderer, GraphRenderer, NetworkGraphRenderer, NetworkScene, NetworkStyle,
    PlotStyle,
};
use netvis_common::Result;
use netvis_config::{CoordPlotConfig, PathGraphConfig};
use std::path::Path;
use tracing::info_span;

/// What a path graph run produced
#[derive(Debug, Clone)]
pub struct PathGraphOutcome {
    pub report: ExtractionReport,
    pub summary: GraphSummary,
}

/// Read `config.input`, plot it and write `config.output`
pub fn run_coordinate_plot(config: &CoordPlotConfig) -> Result<CoordinateSet> {
    let _span = info_span!("coordinate_plot", input = %config.input).entered();

    let set = CoordinateSet::load(&config.input)?;
    CoordinatePlotRenderer::new().render_to_file(
        &set,
        &PlotStyle::from(config),
        Path::new(&config.output),
    )?;
    Ok(set)
}

/// Read `config.input`, build and lay out the path graph and write `config.output`
pub fn run_path_graph(config: &PathGraphConfig) -> Result<PathGraphOutcome> {
    let _span = info_span!("path_graph", input = %config.input).entered();

    let report = read_paths(&config.input)?;
    let graph = PathGraph::from_paths(&report.paths);
    let summary = graph.summary();

    let scene = NetworkScene::build(graph, &LayoutSettings::from(&config.layout));
    NetworkGraphRenderer::new().render_to_file(
        &scene,
        &NetworkStyle::from(config),
        Path::new(&config.output),
    )?;

    Ok(PathGraphOutcome { report, summary })
}
