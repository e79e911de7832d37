//! Error types and utilities for netvis

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for netvis operations
pub type Result<T> = std::result::Result<T, VisError>;

/// Main error type for netvis operations
#[derive(Error, Debug)]
pub enum VisError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure to open or read one of the pipeline input files
    #[error("Failed to read input file '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in an input file
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Graph layout and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl VisError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an input error for the file at `path`
    pub fn input(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error for a 1-based line number
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the error was caused by a missing file
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Input { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to VisError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for VisError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = VisError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = VisError::config_with_source(
            "config issue",
            io::Error::new(io::ErrorKind::InvalidData, "bad yaml"),
        );
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let parse_error = VisError::parse(3, "expected 2 columns, found 1");
        assert_eq!(
            parse_error.to_string(),
            "Parse error on line 3: expected 2 columns, found 1"
        );

        let validation_error = VisError::validation_field("no rows", "graph.dat");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("no rows"));
    }

    #[test]
    fn test_input_error_keeps_path_and_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let error = VisError::input("graph.dat", io_error);

        assert!(error.to_string().contains("graph.dat"));
        assert!(error.source().is_some());
        assert!(error.is_not_found());
    }

    #[test]
    fn test_unreadable_input_is_not_missing() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = VisError::input("log.txt", io_error);

        assert!(error.source().is_some());
        assert!(!error.is_not_found());
        assert!(!VisError::parse(1, "bad row").is_not_found());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = VisError::config_with_source("Middle layer", root_error);
        let top_error = VisError::graph_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}
