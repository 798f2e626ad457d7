//! Source locations as exchanged with rc.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A 1-based `file:row:col` position.
///
/// Rows and columns follow the editor convention (first line is 1). Use
/// [`Location::zero_based`] when talking to a buffer API that counts from 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    file: PathBuf,
    row: u32,
    col: u32,
}

impl Location {
    /// Returns `None` when `row` or `col` is zero.
    pub fn new(file: impl Into<PathBuf>, row: u32, col: u32) -> Option<Self> {
        if row == 0 || col == 0 {
            return None;
        }
        Some(Self {
            file: file.into(),
            row,
            col,
        })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    /// `(row, col)` counted from 0.
    pub fn zero_based(&self) -> (u32, u32) {
        (self.row - 1, self.col - 1)
    }

    /// Same position in a different file.
    pub fn with_file(&self, file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            row: self.row,
            col: self.col,
        }
    }
}

#[derive(Deserialize)]
struct RawLocation {
    file: PathBuf,
    row: u32,
    col: u32,
}

impl TryFrom<RawLocation> for Location {
    type Error = String;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        let RawLocation { file, row, col } = raw;
        Location::new(file, row, col)
            .ok_or_else(|| format!("row and col are 1-based, got {}:{}", row, col))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.row, self.col)
    }
}
