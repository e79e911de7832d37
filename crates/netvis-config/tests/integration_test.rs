//! Integration tests for netvis-config crate.

use netvis_common::LogFormat;
use netvis_config::{Config, ConfigLoader};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_configuration_file() {
    let file = write_yaml(
        r##"
coords:
  input: "runs/graph.dat"
  output: "runs/graph.png"
  title: "Overlay"
  width: 1024
  height: 768
  show_grid: false
  point_color: "#ff0000"
paths:
  input: "runs/log.txt"
  title: "Routes"
  node_radius: 8
  show_labels: false
  edge_color: "#333333"
  layout:
    iterations: 250
    damping: 0.5
logging:
  level: "netvis_graphs=debug,info"
  format: json
  colored: false
"##,
    );

    let config = ConfigLoader::load_from_file(file.path()).expect("Configuration should load");

    assert_eq!(config.coords.input, "runs/graph.dat");
    assert_eq!(config.coords.width, 1024);
    assert!(!config.coords.show_grid);
    assert_eq!(config.coords.point_color, "#ff0000");
    assert_eq!(config.coords.line_color, "#000000");

    assert_eq!(config.paths.input, "runs/log.txt");
    assert_eq!(config.paths.output, "network_graph.png");
    assert_eq!(config.paths.title.as_deref(), Some("Routes"));
    assert_eq!(config.paths.node_radius, 8);
    assert_eq!(config.paths.layout.iterations, 250);
    assert!((config.paths.layout.damping - 0.5).abs() < f32::EPSILON);

    assert_eq!(config.logging.level, "netvis_graphs=debug,info");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(!config.logging.colored);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_yaml("paths:\n  output: \"out.png\"\n");

    let config = ConfigLoader::load_from_file(file.path()).unwrap();
    let defaults = Config::default();

    assert_eq!(config.paths.output, "out.png");
    assert_eq!(config.paths.input, defaults.paths.input);
    assert_eq!(config.coords.input, defaults.coords.input);
    assert_eq!(config.logging.level, defaults.logging.level);
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_yaml("coords:\n  width: 10\n  point_color: \"red\"\n");

    let result = ConfigLoader::load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
fn test_malformed_yaml_is_rejected() {
    let file = write_yaml("coords: [unterminated\n");

    assert!(ConfigLoader::load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::load_from_file(dir.path().join("netvis.yaml"));

    assert!(result.is_err());
}

#[test]
fn test_target_only_log_filter_is_accepted() {
    let file = write_yaml("logging:\n  level: \"netvis_graphs\"\n");

    let config = ConfigLoader::load_from_file(file.path()).expect("Target filters are valid");
    assert_eq!(config.logging.level, "netvis_graphs");

    let mut config = Config::default();
    config.logging.level = "netvis_graphs=loud".to_string();
    assert!(config.validate_all().is_err());
}
