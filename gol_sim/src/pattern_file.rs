//! The simulator input file: one line of 64 hex digits, no newline.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::codec;
use crate::error::{Error, Result};
use crate::grid::{EMPTY_GRID, TGrid};
use crate::patterns::Seed;

/// Writes the normalised frame for `seed`, replacing any previous input.
pub fn write_pattern(path: &Path, seed: &Seed) -> Result<String> {
    let frame = seed.frame()?;
    fs::write(path, &frame).map_err(|source| Error::PatternWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(pattern = seed.name(), path = %path.display(), "input written");
    Ok(frame)
}

/// Reads back an input file. An empty file is an empty grid.
pub fn read_pattern(path: &Path) -> Result<TGrid> {
    let contents = fs::read_to_string(path).map_err(|source| Error::PatternRead {
        path: path.to_path_buf(),
        source,
    })?;
    match contents.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => Ok(codec::decode(line)?),
        None => Ok(EMPTY_GRID),
    }
}
