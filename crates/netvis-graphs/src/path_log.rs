//! Route extraction from simulator logs.
//!
//! Lines of interest carry a message dump such as
//! `AntMessage{source=3, ttl=4, path=[3, 17, 42]}`. Only the first
//! `path=[...]` on a line is read.

use netvis_common::{Result, VisError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Identifier of a node in a logged route
pub type NodeId = u64;

/// Node ids visited by one message, in order
pub type RoutePath = Vec<NodeId>;

static PATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"path=\[([^\]]*)\]").expect("Invalid path regex pattern"));

const TOKEN_SEPARATOR: &str = ", ";

/// Paths found in a log together with scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Paths in file order
    pub paths: Vec<RoutePath>,
    pub lines_scanned: usize,
    pub lines_matched: usize,
    /// Tokens inside brackets that were not plain digit runs
    pub tokens_dropped: usize,
}

/// Extract the route from one log line, `None` when the line has no path.
pub fn extract_path(line: &str) -> Option<RoutePath> {
    extract_path_counted(line).map(|(path, _)| path)
}

fn extract_path_counted(line: &str) -> Option<(RoutePath, usize)> {
    let captures = PATH_PATTERN.captures(line)?;
    let body = captures.get(1).map_or("", |m| m.as_str());
    if body.is_empty() {
        return Some((Vec::new(), 0));
    }

    let mut path = Vec::new();
    let mut dropped = 0;
    for token in body.split(TOKEN_SEPARATOR) {
        match parse_node_token(token) {
            Some(id) => path.push(id),
            None => {
                dropped += 1;
                debug!(token, "Dropping non-numeric path token");
            }
        }
    }
    Some((path, dropped))
}

/// Accept only unsigned ASCII digit runs that fit a node id.
///
/// Signs, decimals, whitespace and overflowing values all yield `None`.
fn parse_node_token(token: &str) -> Option<NodeId> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Scan log text line by line
pub fn extract_paths(text: &str) -> ExtractionReport {
    let mut report = ExtractionReport::default();

    for line in text.lines() {
        report.lines_scanned += 1;
        if let Some((path, dropped)) = extract_path_counted(line) {
            report.lines_matched += 1;
            report.tokens_dropped += dropped;
            report.paths.push(path);
        }
    }

    report
}

/// Read a log file and extract its paths
pub fn read_paths(path: impl AsRef<Path>) -> Result<ExtractionReport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| VisError::input(path, e))?;
    let report = extract_paths(&text);

    info!(
        file = %path.display(),
        lines = report.lines_scanned,
        paths = report.paths.len(),
        dropped_tokens = report.tokens_dropped,
        "Extracted routing paths"
    );
    Ok(report)
}
