//! PNG rendering for the coordinate plot and the path graph

use crate::coordinates::CoordinateSet;
use crate::digraph::PathGraph;
use crate::layout::{compute_layout, Bounds, Layout, LayoutSettings};
use netvis_common::{ensure, Result, VisError};
use netvis_config::{CoordPlotConfig, PathGraphConfig};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::{info, warn};

const FONT_FAMILY: &str = "sans-serif";
const CHART_MARGIN: u32 = 20;
const GRAPH_MARGIN: u32 = 30;

/// Trait for renderers that write a PNG file
pub trait GraphRenderer {
    /// The data this renderer draws
    type Data;

    /// Styling options this renderer understands
    type Style;

    /// Render `data` to a PNG at `path`
    fn render_to_file(&self, data: &Self::Data, style: &Self::Style, path: &Path) -> Result<()>;

    /// Gets the name of this graph type
    fn name(&self) -> &'static str;
}

/// Parse a color string (hex format) to RGBColor
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    // Default to black if parsing fails
    RGBColor(0, 0, 0)
}

/// Styling for the coordinate scatter plot
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub show_grid: bool,
    pub point_radius: u32,
    pub point_color: RGBColor,
    pub line_color: RGBColor,
    pub background: RGBColor,
}

impl From<&CoordPlotConfig> for PlotStyle {
    fn from(config: &CoordPlotConfig) -> Self {
        Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            width: config.width,
            height: config.height,
            show_grid: config.show_grid,
            point_radius: config.point_radius,
            point_color: parse_color(&config.point_color),
            line_color: parse_color(&config.line_color),
            background: parse_color(&config.background_color),
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::from(&CoordPlotConfig::default())
    }
}

/// Scatter plot of unique coordinates with lines between row pairs
#[derive(Debug, Default)]
pub struct CoordinatePlotRenderer;

impl CoordinatePlotRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Padded axis ranges over the finite rows.
    ///
    /// A zero-width span is widened by at least one unit each way. Fails when
    /// the padded span no longer fits in an `f64`.
    pub fn axis_ranges(set: &CoordinateSet) -> Result<(Range<f64>, Range<f64>)> {
        let Some((x_min, x_max, y_min, y_max)) = set.bounds() else {
            return Ok((0.0..1.0, 0.0..1.0));
        };
        Ok((pad_range(x_min, x_max, "x")?, pad_range(y_min, y_max, "y")?))
    }
}

fn ensure_canvas(width: u32, height: u32) -> Result<()> {
    ensure!(
        width > 0 && height > 0,
        "Canvas must be at least 1x1 pixels, got {}x{}",
        width,
        height
    );
    Ok(())
}

fn pad_range(min: f64, max: f64, axis: &str) -> Result<Range<f64>> {
    let span = max - min;
    let padding = if span <= f64::EPSILON {
        (min.abs() * 0.05).max(1.0)
    } else if span.is_finite() {
        span * 0.05
    } else {
        // scale before subtracting so the difference stays finite
        max * 0.05 - min * 0.05
    };

    let range = (min - padding)..(max + padding);
    if !(range.end - range.start).is_finite() {
        return Err(VisError::validation_field(
            format!("coordinate span {min}..{max} is too wide to plot"),
            axis,
        ));
    }
    Ok(range)
}

impl GraphRenderer for CoordinatePlotRenderer {
    type Data = CoordinateSet;
    type Style = PlotStyle;

    fn render_to_file(&self, set: &CoordinateSet, style: &PlotStyle, path: &Path) -> Result<()> {
        ensure_canvas(style.width, style.height)?;
        let (x_range, y_range) = Self::axis_ranges(set)?;

        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(CHART_MARGIN)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if !style.title.is_empty() {
            builder.caption(&style.title, (FONT_FAMILY, 20));
        }
        let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str());
        if !style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let skipped = set.rows.iter().filter(|p| !p.is_finite()).count();
        if skipped > 0 {
            warn!(skipped, "Leaving rows with non-finite values off the plot");
        }

        let point_style = style.point_color.filled();
        chart.draw_series(
            set.unique_nodes
                .iter()
                .filter(|p| p.is_finite())
                .map(|p| Circle::new((p.x, p.y), style.point_radius, point_style)),
        )?;

        let line_style = style.line_color.stroke_width(1);
        chart.draw_series(
            set.segments
                .iter()
                .filter(|s| s.from.is_finite() && s.to.is_finite())
                .map(|s| {
                    PathElement::new(vec![(s.from.x, s.from.y), (s.to.x, s.to.y)], line_style)
                }),
        )?;

        root.present()?;

        info!(
            points = set.unique_nodes.len(),
            lines = set.segments.len(),
            "Rendered coordinate plot to {}",
            path.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "coordinate_plot"
    }
}

/// Styling for the path graph
#[derive(Debug, Clone)]
pub struct NetworkStyle {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub node_radius: u32,
    pub show_labels: bool,
    pub node_color: RGBColor,
    pub edge_color: RGBColor,
    pub label_color: RGBColor,
    pub background: RGBColor,
}

impl From<&PathGraphConfig> for NetworkStyle {
    fn from(config: &PathGraphConfig) -> Self {
        Self {
            title: config.title.clone().filter(|t| !t.is_empty()),
            width: config.width,
            height: config.height,
            node_radius: config.node_radius,
            show_labels: config.show_labels,
            node_color: parse_color(&config.node_color),
            edge_color: parse_color(&config.edge_color),
            label_color: parse_color(&config.label_color),
            background: parse_color(&config.background_color),
        }
    }
}

impl Default for NetworkStyle {
    fn default() -> Self {
        Self::from(&PathGraphConfig::default())
    }
}

impl NetworkStyle {
    fn arrow_size(&self) -> f64 {
        (f64::from(self.node_radius) * 0.8).max(6.0)
    }
}

/// A path graph together with its node placement
#[derive(Debug, Clone, Default)]
pub struct NetworkScene {
    pub graph: PathGraph,
    pub layout: Layout,
}

impl NetworkScene {
    /// Lay out `graph` with the given simulation settings
    pub fn build(graph: PathGraph, settings: &LayoutSettings) -> Self {
        let layout = compute_layout(&graph, settings);
        Self { graph, layout }
    }
}

/// Maps layout space onto a pixel rectangle with a uniform scale
#[derive(Debug, Clone, Copy)]
pub struct PixelMapper {
    bounds: Bounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl PixelMapper {
    /// Fit `bounds` into a `width` x `height` area leaving `margin` pixels free
    pub fn new(bounds: Bounds, width: u32, height: u32, margin: u32) -> Self {
        let avail_w = f64::from(width.saturating_sub(2 * margin));
        let avail_h = f64::from(height.saturating_sub(2 * margin));

        let sx = if bounds.width() > f64::EPSILON {
            avail_w / bounds.width()
        } else {
            f64::INFINITY
        };
        let sy = if bounds.height() > f64::EPSILON {
            avail_h / bounds.height()
        } else {
            f64::INFINITY
        };
        let mut scale = sx.min(sy);
        if !scale.is_finite() {
            scale = 0.0;
        }

        Self {
            bounds,
            scale,
            offset_x: f64::from(margin) + (avail_w - bounds.width() * scale) / 2.0,
            offset_y: f64::from(margin) + (avail_h - bounds.height() * scale) / 2.0,
        }
    }

    pub fn map(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.offset_x + (x - self.bounds.min_x) * self.scale,
            self.offset_y + (y - self.bounds.min_y) * self.scale,
        )
    }
}

/// Shaft and head of an edge arrow in pixel space
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub shaft: [(f64, f64); 2],
    pub head: [(f64, f64); 3],
}

/// Arrow from the rim of the `from` node to the rim of the `to` node.
///
/// `None` when the two centres coincide.
pub fn arrow_geometry(
    from: (f64, f64),
    to: (f64, f64),
    node_radius: f64,
    arrow_size: f64,
) -> Option<Arrow> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < 0.001 {
        return None;
    }

    let (ux, uy) = (dx / dist, dy / dist);
    let start = (from.0 + ux * node_radius, from.1 + uy * node_radius);
    let tip = (to.0 - ux * node_radius, to.1 - uy * node_radius);
    let back = (tip.0 - ux * arrow_size, tip.1 - uy * arrow_size);
    let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);

    Some(Arrow {
        shaft: [start, back],
        head: [tip, (back.0 + px, back.1 + py), (back.0 - px, back.1 - py)],
    })
}

fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Force-directed drawing of a path graph with arrowed edges
#[derive(Debug, Default)]
pub struct NetworkGraphRenderer;

impl NetworkGraphRenderer {
    pub fn new() -> Self {
        Self
    }

    fn draw_scene<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scene: &NetworkScene,
        style: &NetworkStyle,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let Some(bounds) = scene.layout.bounds() else {
            return Ok(());
        };
        let (width, height) = area.dim_in_pixel();
        let margin = GRAPH_MARGIN + style.node_radius;
        let mapper = PixelMapper::new(bounds, width, height, margin);

        let radius = f64::from(style.node_radius);
        let edge_style = style.edge_color.stroke_width(2);

        for (from, to) in scene.graph.edges() {
            let (Some(a), Some(b)) = (scene.layout.get(from), scene.layout.get(to)) else {
                continue;
            };
            let (a, b) = (mapper.map(a), mapper.map(b));

            if from == to {
                let ring = (style.node_radius * 3 / 4).max(3);
                area.draw(&Circle::new(
                    to_pixel((a.0, a.1 - radius)),
                    ring,
                    edge_style,
                ))?;
                continue;
            }

            if let Some(arrow) = arrow_geometry(a, b, radius, style.arrow_size()) {
                area.draw(&PathElement::new(
                    arrow.shaft.iter().copied().map(to_pixel).collect::<Vec<_>>(),
                    edge_style,
                ))?;
                area.draw(&Polygon::new(
                    arrow.head.iter().copied().map(to_pixel).collect::<Vec<_>>(),
                    style.edge_color.filled(),
                ))?;
            }
        }

        let label_size = (f64::from(style.node_radius) * 1.1).max(8.0);
        for (node, pos) in scene.layout.iter() {
            let center = to_pixel(mapper.map(pos));
            area.draw(&Circle::new(center, style.node_radius, style.node_color.filled()))?;

            if style.show_labels {
                let text_style = (FONT_FAMILY, label_size)
                    .into_font()
                    .color(&style.label_color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                area.draw(&Text::new(node.to_string(), center, text_style))?;
            }
        }

        Ok(())
    }
}

impl GraphRenderer for NetworkGraphRenderer {
    type Data = NetworkScene;
    type Style = NetworkStyle;

    fn render_to_file(&self, scene: &NetworkScene, style: &NetworkStyle, path: &Path) -> Result<()> {
        ensure_canvas(style.width, style.height)?;
        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background)?;

        if scene.graph.is_empty() {
            warn!("Path graph is empty, writing a blank figure");
        }

        match style.title.as_deref() {
            Some(title) => {
                let body = root.titled(title, (FONT_FAMILY, 24))?;
                self.draw_scene(&body, scene, style)?;
            }
            None => self.draw_scene(&root, scene, style)?,
        }

        root.present()?;

        info!(
            nodes = scene.graph.node_count(),
            edges = scene.graph.edge_count(),
            "Rendered path graph to {}",
            path.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "network_graph"
    }
}
