//! Trajectory file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::format::{marker_line, waypoint_line};
use crate::util::{Error, Result, Vec3};

/// Write every object in index order: marker, waypoints, blank separator.
pub fn write<W, L>(mut out: W, lists: &[L]) -> Result<()>
where
    W: Write,
    L: AsRef<[Vec3]>,
{
    out.write_all(to_string(lists).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Render lists in file layout.
pub fn to_string<L: AsRef<[Vec3]>>(lists: &[L]) -> String {
    let mut text = String::new();
    for (index, list) in lists.iter().enumerate() {
        text.push_str(&marker_line(index));
        text.push('\n');
        for &p in list.as_ref() {
            text.push_str(&waypoint_line(p));
            text.push('\n');
        }
        text.push('\n');
    }
    text
}

/// Write a trajectory file, replacing any existing one.
pub fn save<L: AsRef<[Vec3]>>(path: impl AsRef<Path>, lists: &[L]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::from_io(e, path))?;
    write(BufWriter::new(file), lists)?;
    tracing::debug!("wrote {} objects to {}", lists.len(), path.display());
    Ok(())
}
