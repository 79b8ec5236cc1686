use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::FrameFormat;
use crate::error::{Error, Result};

/// Anything the playback loop can poll for frames.
///
/// Each call returns every frame seen so far, in append order.
pub trait FrameSource {
    fn read_frames(&mut self) -> Result<Vec<String>>;

    fn format(&self) -> FrameFormat {
        FrameFormat::Hex
    }
}

/// The simulator output file, re-read in full on every call.
pub struct FileSource {
    path: PathBuf,
    format: FrameFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, format: FrameFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for FileSource {
    fn read_frames(&mut self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path).map_err(|source| Error::SourceUnavailable {
            path: self.path.clone(),
            source,
        })?;
        Ok(split_frames(&contents))
    }

    fn format(&self) -> FrameFormat {
        self.format
    }
}

/// Trimmed, non-empty lines.
pub fn split_frames(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
