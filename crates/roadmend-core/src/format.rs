//! Plain-text network format.
//!
//! ```text
//! Connections:
//! city A, village B
//! village B, regional_center C
//!
//! Blocked roads:
//! village B, regional_center C, 5
//! ```
//!
//! A place is `category name`; the category is the first word and the rest of
//! the text is the name. Lines before any header are read as connections.

use crate::graph::{GraphError, RoadGraph};
use crate::place::{BlockedRoad, Place};
use std::fmt::Write;

const CONNECTIONS_HEADER: &str = "Connections:";
const BLOCKED_HEADER: &str = "Blocked roads:";

/// Errors from parsing the text format. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    MalformedLine { line: usize, message: String },
    #[error("line {line}: invalid road cost {value:?}")]
    InvalidCost { line: usize, value: String },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A place whose category or name cannot be written as a text line and read
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("place {:?} {:?} cannot be written in the text format: {reason}", .place.category, .place.name)]
pub struct UnrepresentablePlace {
    pub place: Place,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Connections,
    Blocked,
}

/// Parse a network description into a [`RoadGraph`].
pub fn parse(input: &str) -> Result<RoadGraph, ParseError> {
    let mut builder = RoadGraph::builder();
    let mut section = Section::Connections;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case(CONNECTIONS_HEADER) {
            section = Section::Connections;
            continue;
        }
        if line.starts_with("Blocked") {
            section = Section::Blocked;
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match section {
            Section::Connections => {
                let [a, b] = fields.as_slice() else {
                    return Err(malformed(
                        line_no,
                        format!("expected `place, place`, found {:?}", line),
                    ));
                };
                builder.connect(parse_place(a, line_no)?, parse_place(b, line_no)?);
            }
            Section::Blocked => {
                let [a, b, cost] = fields.as_slice() else {
                    return Err(malformed(
                        line_no,
                        format!("expected `place, place, cost`, found {:?}", line),
                    ));
                };
                let cost = cost.parse::<u64>().map_err(|_| ParseError::InvalidCost {
                    line: line_no,
                    value: (*cost).to_string(),
                })?;
                builder.block(parse_place(a, line_no)?, parse_place(b, line_no)?, cost);
            }
        }
    }

    Ok(builder.build()?)
}

/// Parse `category name` into a [`Place`].
pub fn parse_place(text: &str, line: usize) -> Result<Place, ParseError> {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((category, name)) if !name.trim().is_empty() => {
            Ok(Place::new(category, name.trim()))
        }
        _ => Err(malformed(
            line,
            format!("expected `category name`, found {:?}", text),
        )),
    }
}

fn malformed(line: usize, message: String) -> ParseError {
    ParseError::MalformedLine { line, message }
}

/// Check that `place` survives a write/[`parse`] cycle unchanged.
pub fn check_place(place: &Place) -> Result<(), UnrepresentablePlace> {
    let Place { category, name } = place;
    let reason = if category.contains(',') || name.contains(',') {
        "contains a comma"
    } else if category.chars().chain(name.chars()).any(char::is_control) {
        "contains a control character"
    } else if category.is_empty() || category.contains(char::is_whitespace) {
        "category is empty or contains whitespace"
    } else if category.starts_with("Blocked") {
        "category would be read as a section header"
    } else if name.is_empty() || name.trim() != name {
        "name is empty or has surrounding whitespace"
    } else {
        return Ok(());
    };
    Err(UnrepresentablePlace {
        place: place.clone(),
        reason,
    })
}

/// Render a graph back into the text format. Roads are written once each, in
/// key order; blocked roads keep their declared endpoint order. Places with no
/// roads have no line to carry them and are dropped.
///
/// Fails if a road endpoint is rejected by [`check_place`].
pub fn to_text(graph: &RoadGraph) -> Result<String, UnrepresentablePlace> {
    let mut out = String::new();
    writeln!(out, "{}", CONNECTIONS_HEADER).unwrap();
    for road in graph.roads() {
        check_place(road.low())?;
        check_place(road.high())?;
        writeln!(out, "{}, {}", road.low(), road.high()).unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "{}", BLOCKED_HEADER).unwrap();
    for road in graph.blocked_roads() {
        let BlockedRoad { a, b, cost } = road;
        writeln!(out, "{}, {}, {}", a, b, cost).unwrap();
    }
    Ok(out)
}
