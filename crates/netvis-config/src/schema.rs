//! Configuration structures for both plotting pipelines.

use netvis_common::LogFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Coordinate scatter plot settings
    #[validate]
    pub coords: CoordPlotConfig,

    /// Path log graph settings
    #[validate]
    pub paths: PathGraphConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Settings for the coordinate scatter plot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CoordPlotConfig {
    /// Whitespace separated two column input file
    pub input: String,

    /// PNG file the plot is written to
    pub output: String,

    /// Chart caption
    pub title: String,

    /// X axis description
    pub x_label: String,

    /// Y axis description
    pub y_label: String,

    #[validate(range(min = 100, max = 8000, message = "Width must be between 100 and 8000 pixels"))]
    pub width: u32,

    #[validate(range(min = 100, max = 8000, message = "Height must be between 100 and 8000 pixels"))]
    pub height: u32,

    /// Draw mesh grid lines
    pub show_grid: bool,

    /// Marker radius in pixels
    #[validate(range(min = 1, max = 50, message = "Point radius must be between 1 and 50 pixels"))]
    pub point_radius: u32,

    pub point_color: String,
    pub line_color: String,
    pub background_color: String,
}

/// Settings for the path log graph
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PathGraphConfig {
    /// Log file scanned for `path=[...]` entries
    pub input: String,

    /// PNG file the graph is written to
    pub output: String,

    /// Optional caption drawn above the graph
    pub title: Option<String>,

    #[validate(range(min = 100, max = 8000, message = "Width must be between 100 and 8000 pixels"))]
    pub width: u32,

    #[validate(range(min = 100, max = 8000, message = "Height must be between 100 and 8000 pixels"))]
    pub height: u32,

    /// Node circle radius in pixels
    #[validate(range(min = 2, max = 100, message = "Node radius must be between 2 and 100 pixels"))]
    pub node_radius: u32,

    /// Draw node ids inside the circles
    pub show_labels: bool,

    pub node_color: String,
    pub edge_color: String,
    pub label_color: String,
    pub background_color: String,

    /// Force simulation settings
    #[validate]
    pub layout: LayoutConfig,
}

/// Force-directed layout parameters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of simulation steps
    #[validate(range(min = 1, max = 100000, message = "Iterations must be between 1 and 100000"))]
    pub iterations: u32,

    /// Simulated seconds per step
    #[validate(range(min = 0.0001, max = 1.0, message = "Time step must be between 0.0001 and 1.0"))]
    pub time_step: f32,

    /// Repulsion between every pair of nodes
    #[validate(range(min = 0.0, max = 100000.0))]
    pub charge: f32,

    /// Attraction along edges
    #[validate(range(min = 0.0, max = 100.0))]
    pub spring: f32,

    /// Cap on the force applied to a node per step
    #[validate(range(min = 1.0, max = 100000.0))]
    pub max_force: f32,

    #[validate(range(min = 1.0, max = 1000000.0))]
    pub node_speed: f32,

    #[validate(range(min = 0.0, max = 1.0, message = "Damping must be between 0 and 1"))]
    pub damping: f32,

    /// Radius of the circle the nodes start on
    #[validate(range(min = 1.0, max = 10000.0))]
    pub seed_radius: f32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive (trace, debug, info, warn, error or a full EnvFilter string)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub level: String,

    pub format: LogFormat,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use coloured output on the console
    pub colored: bool,
}

impl From<&LoggingSettings> for netvis_common::LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format,
            file_path: settings.file.clone(),
            ansi: settings.colored,
            ..Self::default()
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.coords.validate_values()?;
        self.paths.validate_values()?;
        self.logging.validate_values()?;
        Ok(())
    }
}

impl CoordPlotConfig {
    /// Checks that derive attributes cannot express
    pub fn validate_values(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        if let Err(err) = crate::validation::validate_file_path(&self.input) {
            errors.add("input", err);
        }
        if let Err(err) = crate::validation::validate_file_path(&self.output) {
            errors.add("output", err);
        }
        if let Err(err) = crate::validation::validate_hex_color(&self.point_color) {
            errors.add("point_color", err);
        }
        if let Err(err) = crate::validation::validate_hex_color(&self.line_color) {
            errors.add("line_color", err);
        }
        if let Err(err) = crate::validation::validate_hex_color(&self.background_color) {
            errors.add("background_color", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl PathGraphConfig {
    /// Checks that derive attributes cannot express
    pub fn validate_values(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        if let Err(err) = crate::validation::validate_file_path(&self.input) {
            errors.add("input", err);
        }
        if let Err(err) = crate::validation::validate_file_path(&self.output) {
            errors.add("output", err);
        }
        for (field, color) in [
            ("node_color", &self.node_color),
            ("edge_color", &self.edge_color),
            ("label_color", &self.label_color),
            ("background_color", &self.background_color),
        ] {
            if let Err(err) = crate::validation::validate_hex_color(color) {
                errors.add(field, err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl LoggingSettings {
    /// Checks that derive attributes cannot express
    pub fn validate_values(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        if let Err(err) = crate::validation::validate_log_level(&self.level) {
            errors.add("level", err);
        }
        if let Some(ref file) = self.file {
            if let Err(err) = crate::validation::validate_file_path(file) {
                errors.add("file", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
