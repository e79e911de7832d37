//! Command line front end for the netvis pipelines.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use netvis_config::{Config, ConfigLoader};
use netvis_graphs::{run_coordinate_plot, run_path_graph};
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "netvis", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, overrides the configured level
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipelines
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scatter-plot a two column coordinate file and join row pairs
    Coords {
        /// Coordinate file (default: graph.dat)
        #[arg(short, long)]
        input: Option<String>,

        /// PNG to write (default: graph.png)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Draw the directed graph of `path=[...]` routes found in a log
    Paths {
        /// Log file (default: log.txt)
        #[arg(short, long)]
        input: Option<String>,

        /// PNG to write (default: network_graph.png)
        #[arg(short, long)]
        output: Option<String>,

        /// Force simulation steps
        #[arg(long)]
        iterations: Option<u32>,

        /// Print a JSON summary of the graph to stdout
        #[arg(long)]
        summary: bool,
    },
}

/// Copy command line values over the loaded configuration
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    match &args.command {
        Command::Coords { input, output } => {
            if let Some(input) = input {
                config.coords.input = input.clone();
            }
            if let Some(output) = output {
                config.coords.output = output.clone();
            }
        }
        Command::Paths {
            input,
            output,
            iterations,
            ..
        } => {
            if let Some(input) = input {
                config.paths.input = input.clone();
            }
            if let Some(output) = output {
                config.paths.output = output.clone();
            }
            if let Some(iterations) = iterations {
                config.paths.layout.iterations = *iterations;
            }
        }
    }
}

/// Resolve the configuration for this invocation
pub fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load()?,
    };

    apply_cli_overrides(&mut config, args);
    config
        .validate_all()
        .context("Invalid settings after command line overrides")?;
    Ok(config)
}

/// Execute the selected pipeline
pub fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Coords { .. } => {
            let set = run_coordinate_plot(&config.coords)
                .with_context(|| format!("Coordinate plot of {} failed", config.coords.input))?;
            info!(
                rows = set.rows.len(),
                output = %config.coords.output,
                "Coordinate plot written"
            );
        }
        Command::Paths { summary, .. } => {
            let outcome = run_path_graph(&config.paths)
                .with_context(|| format!("Path graph of {} failed", config.paths.input))?;
            info!(
                paths = outcome.report.paths.len(),
                nodes = outcome.summary.node_count,
                edges = outcome.summary.edge_count,
                output = %config.paths.output,
                "Path graph written"
            );

            if *summary {
                println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_command() {
        let args = Args::try_parse_from([
            "netvis",
            "paths",
            "--input",
            "run/log.txt",
            "--iterations",
            "25",
            "--summary",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Command::Paths {
                input: Some("run/log.txt".to_string()),
                output: None,
                iterations: Some(25),
                summary: true,
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["netvis", "coords", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["netvis"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::try_parse_from([
            "netvis",
            "-l",
            "warn",
            "paths",
            "-o",
            "out/graph.png",
            "--iterations",
            "7",
        ])
        .unwrap();
        let mut config = Config::default();

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.paths.output, "out/graph.png");
        assert_eq!(config.paths.input, "log.txt");
        assert_eq!(config.paths.layout.iterations, 7);
        assert_eq!(config.coords.output, "graph.png");
    }

    #[test]
    fn test_coords_overrides_leave_paths_alone() {
        let args = Args::try_parse_from(["netvis", "coords", "-i", "dump.dat"]).unwrap();
        let mut config = Config::default();

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.coords.input, "dump.dat");
        assert_eq!(config.paths.input, "log.txt");
    }
}
