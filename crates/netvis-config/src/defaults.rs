//! Default values reproducing the behaviour of the original plotting scripts.

use crate::schema::*;
use netvis_common::LogFormat;

/// Default coordinate input file
pub const DEFAULT_COORDS_INPUT: &str = "graph.dat";
/// Default coordinate plot output file
pub const DEFAULT_COORDS_OUTPUT: &str = "graph.png";
/// Default path log input file
pub const DEFAULT_PATHS_INPUT: &str = "log.txt";
/// Default path graph output file
pub const DEFAULT_PATHS_OUTPUT: &str = "network_graph.png";

impl Default for Config {
    fn default() -> Self {
        Self {
            coords: CoordPlotConfig::default(),
            paths: PathGraphConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for CoordPlotConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_COORDS_INPUT.to_string(),
            output: DEFAULT_COORDS_OUTPUT.to_string(),
            title: "P2P Network Topology".to_string(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            width: 800,
            height: 600,
            show_grid: true,
            point_radius: 4,
            point_color: "#1f77b4".to_string(),
            line_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

impl Default for PathGraphConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_PATHS_INPUT.to_string(),
            output: DEFAULT_PATHS_OUTPUT.to_string(),
            title: None,
            width: 1000,
            height: 800,
            node_radius: 12,
            show_labels: true,
            node_color: "#1f77b4".to_string(),
            edge_color: "#000000".to_string(),
            label_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            time_step: 0.016,
            charge: 150.0,
            spring: 0.05,
            max_force: 100.0,
            node_speed: 3000.0,
            damping: 0.9,
            seed_radius: 100.0,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
            colored: true,
        }
    }
}
