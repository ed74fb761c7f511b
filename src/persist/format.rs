//! Trajectory text format constants and line grammar.
//!
//! ```text
//! # Objeto 0
//! 1 0 0
//! 1 0 1
//!
//! # Objeto 1
//! ...
//! ```

use crate::util::Vec3;

/// First character of a section marker line.
pub const MARKER_CHAR: char = '#';

/// Keyword following the marker character.
pub const MARKER_KEYWORD: &str = "Objeto";

/// Highest object index the reader will grow the collection to.
pub const MAX_OBJECT_INDEX: usize = u16::MAX as usize;

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    /// `# Objeto <index>`
    Marker(usize),
    /// Exactly three floats
    Waypoint(Vec3),
    /// Empty or whitespace only
    Blank,
    /// Anything else, including `#` lines that are not markers
    Unknown,
}

/// Classify one line. Never fails; unrecognized input is [`Line::Unknown`].
pub fn classify(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }

    if let Some(rest) = trimmed.strip_prefix(MARKER_CHAR) {
        return parse_marker(rest).map_or(Line::Unknown, Line::Marker);
    }

    parse_waypoint(trimmed).map_or(Line::Unknown, Line::Waypoint)
}

fn parse_marker(rest: &str) -> Option<usize> {
    let mut tokens = rest.split_whitespace();
    if tokens.next()? != MARKER_KEYWORD {
        return None;
    }
    let index = tokens.next()?.parse::<usize>().ok()?;
    match tokens.next() {
        None => Some(index),
        Some(_) => None,
    }
}

fn parse_waypoint(line: &str) -> Option<Vec3> {
    let mut tokens = line.split_whitespace();
    let mut coords = [0.0_f32; 3];
    for c in &mut coords {
        *c = tokens.next()?.parse::<f32>().ok()?;
    }
    if tokens.next().is_some() {
        return None;
    }
    let p = Vec3::from_array(coords);
    p.is_finite().then_some(p)
}

/// Section marker line for `index`, without the newline.
pub fn marker_line(index: usize) -> String {
    format!("{MARKER_CHAR} {MARKER_KEYWORD} {index}")
}

/// Waypoint line for `p`, without the newline.
///
/// `Display` for `f32` prints the shortest text that parses back to the
/// same value, so save/load is lossless.
pub fn waypoint_line(p: Vec3) -> String {
    format!("{} {} {}", p.x, p.y, p.z)
}
