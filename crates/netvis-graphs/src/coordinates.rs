//! Coordinate rows for the topology scatter plot.
//!
//! Input is a two column, whitespace separated file with one `X Y` pair per
//! line and no header. Rows may repeat. Points are drawn once per distinct
//! pair while lines join rows `(0, 1)`, `(2, 3)`, ... in file order.

use netvis_common::{Result, VisError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// One `(X, Y)` row of the coordinate file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite and can be placed on a chart
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Bit pattern used for exact value equality; `-0.0` folds onto `0.0`.
    fn key(self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Line drawn between two consecutive rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Coordinate,
    pub to: Coordinate,
}

/// Rows of a coordinate file with the derived drawing instructions
#[derive(Debug, Clone, Default)]
pub struct CoordinateSet {
    /// Rows in file order, duplicates included
    pub rows: Vec<Coordinate>,
    /// Distinct rows in first-occurrence order
    pub unique_nodes: Vec<Coordinate>,
    /// Lines between row pairs `(0, 1)`, `(2, 3)`, ...
    pub segments: Vec<Segment>,
}

impl CoordinateSet {
    /// Derive point and line lists from the rows
    pub fn from_rows(rows: Vec<Coordinate>) -> Self {
        let unique_nodes = unique_nodes(&rows);
        let segments = pair_segments(&rows);
        Self {
            rows,
            unique_nodes,
            segments,
        }
    }

    /// Read and prepare a coordinate file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let set = Self::from_rows(read_coordinates(path)?);
        info!(
            rows = set.rows.len(),
            unique_nodes = set.unique_nodes.len(),
            segments = set.segments.len(),
            "Prepared coordinate plot data"
        );
        Ok(set)
    }

    /// Smallest box holding every finite row as `(x_min, x_max, y_min, y_max)`.
    ///
    /// Rows with an infinite or NaN component are left out.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut finite = self.rows.iter().filter(|p| p.is_finite());
        let first = finite.next()?;
        Some(finite.fold(
            (first.x, first.x, first.y, first.y),
            |(x_min, x_max, y_min, y_max), p| {
                (x_min.min(p.x), x_max.max(p.x), y_min.min(p.y), y_max.max(p.y))
            },
        ))
    }
}

/// Parse coordinate text.
///
/// Every non-blank line must hold exactly two numeric fields; anything else
/// fails with the offending 1-based line number.
pub fn parse_coordinates(text: &str) -> Result<Vec<Coordinate>> {
    let mut rows = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields.as_slice() {
            [] => continue,
            [x, y] => rows.push(Coordinate::new(
                parse_field(x, line_no)?,
                parse_field(y, line_no)?,
            )),
            other => {
                return Err(VisError::parse(
                    line_no,
                    format!("expected 2 columns, found {}", other.len()),
                ))
            }
        }
    }

    debug!(rows = rows.len(), "Parsed coordinate rows");
    Ok(rows)
}

fn parse_field(field: &str, line_no: usize) -> Result<f64> {
    field
        .parse()
        .map_err(|_| VisError::parse(line_no, format!("'{field}' is not a number")))
}

/// Read a coordinate file. An empty file is rejected.
pub fn read_coordinates(path: impl AsRef<Path>) -> Result<Vec<Coordinate>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| VisError::input(path, e))?;
    let rows = parse_coordinates(&text)?;

    if rows.is_empty() {
        return Err(VisError::validation_field(
            "no coordinate rows found",
            path.display().to_string(),
        ));
    }
    Ok(rows)
}

/// Distinct coordinates in first-occurrence order
pub fn unique_nodes(rows: &[Coordinate]) -> Vec<Coordinate> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .copied()
        .filter(|row| seen.insert(row.key()))
        .collect()
}

/// Segments joining rows `(0, 1)`, `(2, 3)`, ...
pub fn pair_segments(rows: &[Coordinate]) -> Vec<Segment> {
    rows.chunks(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(Segment {
                from: *from,
                to: *to,
            }),
            // odd row count: the trailing row draws no line
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn coords(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
        pairs.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn test_scenario_with_repeated_row() {
        let rows = parse_coordinates("0 0\n1 1\n1 1\n2 2").unwrap();
        let set = CoordinateSet::from_rows(rows);

        assert_eq!(set.unique_nodes, coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]));
        assert_eq!(
            set.segments,
            vec![
                Segment {
                    from: Coordinate::new(0.0, 0.0),
                    to: Coordinate::new(1.0, 1.0)
                },
                Segment {
                    from: Coordinate::new(1.0, 1.0),
                    to: Coordinate::new(2.0, 2.0)
                },
            ]
        );
    }

    #[test]
    fn test_odd_row_count_drops_trailing_row() {
        let rows = coords(&[(0.0, 0.0), (1.0, 0.0), (5.0, 5.0)]);
        let segments = pair_segments(&rows);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].to, Coordinate::new(1.0, 0.0));
        assert!(pair_segments(&rows[..1]).is_empty());
        assert!(pair_segments(&[]).is_empty());
    }

    #[test]
    fn test_parse_accepts_tabs_floats_and_blank_lines() {
        let rows = parse_coordinates("1.5\t-2\n\n  3e2   4  \n").unwrap();
        assert_eq!(rows, coords(&[(1.5, -2.0), (300.0, 4.0)]));
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let err = parse_coordinates("0 0\n1 one\n").unwrap_err();
        match err {
            VisError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("one"));
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_wrong_column_count() {
        assert!(matches!(
            parse_coordinates("1 2 3\n"),
            Err(VisError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_coordinates("1 2\n7\n"),
            Err(VisError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        let nodes = unique_nodes(&coords(&[(0.0, -0.0), (-0.0, 0.0)]));
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_non_finite_rows_are_kept_but_not_bounded() {
        let rows = parse_coordinates("0 0\ninf 1\n2 nan\n3 -4\n").unwrap();
        let set = CoordinateSet::from_rows(rows);

        assert_eq!(set.rows.len(), 4);
        assert!(!set.rows[1].is_finite());
        assert!(!set.rows[2].is_finite());
        assert_eq!(set.bounds(), Some((0.0, 3.0, -4.0, 0.0)));
    }

    #[test]
    fn test_bounds_without_finite_rows() {
        let set = CoordinateSet::from_rows(coords(&[(f64::NAN, 1.0), (f64::INFINITY, 0.0)]));
        assert_eq!(set.bounds(), None);
    }

    #[test]
    fn test_read_missing_file_is_fatal() {
        let err = read_coordinates("/nonexistent/netvis/graph.dat").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_empty_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = read_coordinates(file.path()).unwrap_err();
        assert!(matches!(err, VisError::Validation { .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 0\n4 2\n-1 3").unwrap();

        let set = CoordinateSet::load(file.path()).unwrap();
        assert_eq!(set.rows.len(), 3);
        assert_eq!(set.segments.len(), 1);
        assert_eq!(set.bounds(), Some((-1.0, 4.0, 0.0, 3.0)));
    }

    proptest! {
        #[test]
        fn prop_unique_nodes_match_distinct_pairs(
            raw in prop::collection::vec((-5i32..5, -5i32..5), 0..60)
        ) {
            let rows: Vec<Coordinate> = raw
                .iter()
                .map(|&(x, y)| Coordinate::new(f64::from(x), f64::from(y)))
                .collect();
            let distinct: HashSet<(i32, i32)> = raw.iter().copied().collect();

            let nodes = unique_nodes(&rows);
            prop_assert!(nodes.len() <= rows.len());
            prop_assert_eq!(nodes.len(), distinct.len());
        }

        #[test]
        fn prop_segment_count_is_half_the_rows(
            raw in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..60)
        ) {
            let rows: Vec<Coordinate> = raw.into_iter().map(Coordinate::from).collect();
            let segments = pair_segments(&rows);

            prop_assert_eq!(segments.len(), rows.len() / 2);
            for (i, segment) in segments.iter().enumerate() {
                prop_assert_eq!(segment.from, rows[2 * i]);
                prop_assert_eq!(segment.to, rows[2 * i + 1]);
            }
        }
    }
}
