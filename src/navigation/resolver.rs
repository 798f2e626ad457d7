//! Deciding where a jump lands.
//!
//! rdm reports symlink-resolved paths. An editor that opened the project
//! through a symlink treats `/home/me/proj/a.cpp` and `/data/proj/a.cpp` as
//! different files, so targets are mapped back onto the project roots as
//! they were opened before navigating.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::location::Location;

/// Oldest entries are dropped beyond this many jumps.
const MAX_HISTORY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationAction {
    /// Move the cursor inside the current view.
    SameView { row: u32, col: u32 },
    /// Open (or focus) another file at the given position.
    OpenFile { path: PathBuf, row: u32, col: u32 },
}

impl NavigationAction {
    /// `path:row:col`, the form editors accept for "open at position".
    pub fn encoded_position(&self) -> Option<String> {
        match self {
            NavigationAction::OpenFile { path, row, col } => {
                Some(format!("{}:{}:{}", path.display(), row, col))
            }
            NavigationAction::SameView { .. } => None,
        }
    }
}

/// Resolves jump targets and remembers where each jump started.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    project_roots: Vec<PathBuf>,
    history: VecDeque<Location>,
}

impl Navigator {
    /// `project_roots` are the folders as the editor opened them.
    pub fn new(project_roots: Vec<PathBuf>) -> Self {
        Self {
            project_roots,
            history: VecDeque::new(),
        }
    }

    pub fn project_roots(&self) -> &[PathBuf] {
        &self.project_roots
    }

    /// Where to go for `target`, given the cursor that triggered the jump.
    ///
    /// The cursor location is pushed onto the jump history in both cases,
    /// before anything moves.
    pub fn resolve(&mut self, cursor: &Location, target: &Location) -> NavigationAction {
        debug!(from = %cursor, to = %target, "about to navigate to a new location");
        self.push_history(cursor.clone());

        if real_path(cursor.file()) == target.file() {
            debug!("navigating to location within the same view");
            return NavigationAction::SameView {
                row: target.row(),
                col: target.col(),
            };
        }

        let path = match to_project_path(&self.project_roots, target.file()) {
            Some(path) => {
                debug!(path = %path.display(), "new location is within the project path");
                path
            }
            None => {
                debug!("new location is outside the project path");
                target.file().to_path_buf()
            }
        };

        NavigationAction::OpenFile {
            path,
            row: target.row(),
            col: target.col(),
        }
    }

    /// Location to return to, most recent first.
    pub fn jump_back(&mut self) -> Option<Location> {
        self.history.pop_back()
    }

    pub fn history(&self) -> impl Iterator<Item = &Location> {
        self.history.iter()
    }

    fn push_history(&mut self, location: Location) {
        self.history.push_back(location);
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }
}

/// Rewrite `absolute_path` onto the first root whose resolved form
/// contains it. `None` when the path lies outside every root.
pub fn to_project_path(roots: &[PathBuf], absolute_path: &Path) -> Option<PathBuf> {
    roots.iter().find_map(|root| {
        let resolved = real_path(root);
        absolute_path
            .strip_prefix(&resolved)
            .ok()
            .map(|rest| root.join(rest))
    })
}

/// Symlink-resolved path, or the path itself when it cannot be resolved.
fn real_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
