//! Trajectory file reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::format::{classify, Line, MAX_OBJECT_INDEX};
use crate::util::{Error, Result, Vec3};

/// Which object incoming waypoints belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// No marker seen yet; waypoints go to object 0
    Implicit,
    InObject(usize),
}

impl Section {
    fn index(self) -> usize {
        match self {
            Section::Implicit => 0,
            Section::InObject(i) => i,
        }
    }
}

/// Line-at-a-time parser for the trajectory format.
///
/// Feeding never fails: unknown lines are skipped.
#[derive(Debug)]
pub struct Parser {
    section: Section,
    lists: Vec<Vec<Vec3>>,
    skipped: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            section: Section::Implicit,
            lists: Vec::new(),
            skipped: 0,
        }
    }

    /// Feed one line (with or without its trailing newline).
    pub fn feed(&mut self, line_no: usize, line: &str) {
        match classify(line) {
            Line::Blank => {}
            Line::Marker(index) if index > MAX_OBJECT_INDEX => {
                tracing::warn!(line = line_no, index, "object index too large, section ignored");
                self.skipped += 1;
            }
            Line::Marker(index) => {
                self.section = Section::InObject(index);
                self.grow_to(index);
            }
            Line::Waypoint(p) => {
                let index = self.section.index();
                self.grow_to(index);
                self.lists[index].push(p);
            }
            Line::Unknown => {
                tracing::trace!(line = line_no, text = line, "skipping unrecognized line");
                self.skipped += 1;
            }
        }
    }

    /// Number of non-blank lines that were not understood.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Waypoint lists by object index.
    pub fn finish(self) -> Vec<Vec<Vec3>> {
        self.lists
    }

    fn grow_to(&mut self, index: usize) {
        if index >= self.lists.len() {
            self.lists.resize_with(index + 1, Vec::new);
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse trajectory text held in memory.
pub fn parse_str(text: &str) -> Vec<Vec<Vec3>> {
    let mut parser = Parser::new();
    for (i, line) in text.lines().enumerate() {
        parser.feed(i + 1, line);
    }
    parser.finish()
}

/// Parse trajectory text from any buffered reader.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Vec<Vec3>>> {
    let mut parser = Parser::new();
    for (i, line) in reader.lines().enumerate() {
        parser.feed(i + 1, &line?);
    }
    if parser.skipped() > 0 {
        tracing::debug!("skipped {} unrecognized lines", parser.skipped());
    }
    Ok(parser.finish())
}

/// Read a trajectory file.
///
/// The file is read completely before anything is returned, so callers
/// can leave their state untouched on error.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Vec<Vec3>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    let lists = read(BufReader::new(file))?;
    tracing::debug!(
        "read {} objects, {} waypoints from {}",
        lists.len(),
        lists.iter().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(lists)
}
