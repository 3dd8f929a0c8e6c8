//! Plain text path maps, one record per line:
//!
//! ```text
//! O,<x>,<y>
//! D,<x>,<y>
//! B,<x>,<y>
//! ```
//!
//! `O` is the origin, `D` the destination and every `B` line a blocked cell. Maps are written
//! origin first, then destination, then the blocked cells in row-major order, but may be read in
//! any order. Lines that cannot be parsed are skipped with a [MapWarning].
use core::fmt;
use grid_util::point::Point;
use log::warn;
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::error::{MapError, SearchError};
use crate::state::SearchState;

/// One line of a path map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapRecord {
    Origin(Point),
    Destination(Point),
    Blocked(Point),
}

impl MapRecord {
    pub fn tag(&self) -> char {
        match self {
            MapRecord::Origin(_) => 'O',
            MapRecord::Destination(_) => 'D',
            MapRecord::Blocked(_) => 'B',
        }
    }
    pub fn point(&self) -> Point {
        match *self {
            MapRecord::Origin(p) | MapRecord::Destination(p) | MapRecord::Blocked(p) => p,
        }
    }
}

impl fmt::Display for MapRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.point();
        write!(f, "{},{},{}", self.tag(), p.x, p.y)
    }
}

/// Why a line was skipped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("'{0}' is not an integer coordinate")]
    InvalidCoordinate(String),

    #[error("unknown record tag '{0}'")]
    UnknownTag(String),
}

/// A skipped line, numbered from 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapWarning {
    pub line: usize,
    pub reason: SkipReason,
}

/// The records of a map in file order, plus the lines that were skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathMap {
    pub records: Vec<MapRecord>,
    pub warnings: Vec<MapWarning>,
}

fn parse_coordinate(field: &str) -> Result<i32, SkipReason> {
    field
        .trim()
        .parse::<i32>()
        // Coordinates are never negative.
        .map(|c| c.max(0))
        .map_err(|_| SkipReason::InvalidCoordinate(field.to_owned()))
}

/// Parses a single non-empty line.
pub fn parse_record(line: &str) -> Result<MapRecord, SkipReason> {
    let fields = line.split(',').collect::<Vec<&str>>();
    if fields.len() != 3 {
        return Err(SkipReason::FieldCount(fields.len()));
    }
    let point = Point::new(parse_coordinate(fields[1])?, parse_coordinate(fields[2])?);
    match fields[0].trim() {
        "O" => Ok(MapRecord::Origin(point)),
        "D" => Ok(MapRecord::Destination(point)),
        "B" => Ok(MapRecord::Blocked(point)),
        tag => Err(SkipReason::UnknownTag(tag.to_owned())),
    }
}

/// Reads every line of `reader`. Only I/O errors abort; blank lines are ignored and malformed
/// lines are collected as warnings.
pub fn parse_map<R: BufRead>(reader: R) -> Result<PathMap, MapError> {
    let mut map = PathMap::default();
    for (ix, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(&line) {
            Ok(record) => map.records.push(record),
            Err(reason) => {
                warn!("Skipping map line {}: {}", ix + 1, reason);
                map.warnings.push(MapWarning {
                    line: ix + 1,
                    reason,
                });
            }
        }
    }
    Ok(map)
}

/// The records describing the grid of `state`. Both endpoints must be set.
pub fn records(state: &SearchState) -> Result<Vec<MapRecord>, SearchError> {
    let origin = state.origin().ok_or(SearchError::MissingOrigin)?;
    let destination = state
        .destination()
        .ok_or(SearchError::MissingDestination)?;
    let mut records = vec![
        MapRecord::Origin(origin),
        MapRecord::Destination(destination),
    ];
    records.extend(state.blocked_points().map(MapRecord::Blocked));
    Ok(records)
}

pub fn write_map<W: Write>(state: &SearchState, mut writer: W) -> Result<(), MapError> {
    for record in records(state)? {
        writeln!(writer, "{}", record)?;
    }
    writer.flush()?;
    Ok(())
}
