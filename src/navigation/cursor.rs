//! Turning an editor cursor into an rc location.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::location::Location;

/// One cursor as the host buffer reports it: 0-based row and column, plus
/// the length of any selection attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub row: u32,
    pub col: u32,
    #[serde(default)]
    pub selection_len: usize,
}

impl Cursor {
    pub fn at(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            selection_len: 0,
        }
    }

    pub fn is_selection(&self) -> bool {
        self.selection_len > 0
    }
}

/// The only cursor of a view, as two locations: where it actually sits, and
/// where rc should be asked about the symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorLocation {
    pub position: Location,
    pub query: Location,
}

impl From<Location> for CursorLocation {
    /// A cursor that needs no adjustment.
    fn from(location: Location) -> Self {
        Self {
            position: location.clone(),
            query: location,
        }
    }
}

/// Location of the only cursor in `file`.
///
/// Returns `None` for several cursors or a non-empty selection; the caller
/// aborts the action with a status message. With `line_text` given, a
/// cursor sitting right after a word gets a query location at that word's
/// start, since rc does not resolve a symbol from its end position.
pub fn single_cursor(
    file: &Path,
    cursors: &[Cursor],
    line_text: Option<&str>,
) -> Option<CursorLocation> {
    let [cursor] = cursors else {
        debug!(count = cursors.len(), "can't extract single location from multiple cursors");
        return None;
    };

    if cursor.is_selection() {
        debug!("can't extract single location from non-empty selection");
        return None;
    }

    let query_col = match line_text {
        Some(text) => word_start_if_at_end(text, cursor.col as usize) as u32,
        None => cursor.col,
    };

    Some(CursorLocation {
        position: Location::new(file, cursor.row + 1, cursor.col + 1)?,
        query: Location::new(file, cursor.row + 1, query_col + 1)?,
    })
}

/// Query location of the only cursor in `file`; see [`single_cursor`].
pub fn single_location(file: &Path, cursors: &[Cursor], line_text: Option<&str>) -> Option<Location> {
    single_cursor(file, cursors, line_text).map(|cursor| cursor.query)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word that ends right before `col`, or `col` itself when the
/// cursor is not at a word end. A word end needs a word character before the
/// cursor and none under it, so `ptr->|member` and `foo(|bar)` stay put.
fn word_start_if_at_end(text: &str, col: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    if col == 0 || col > chars.len() {
        return col;
    }

    let at_word_end =
        is_word_char(chars[col - 1]) && !chars.get(col).is_some_and(|&c| is_word_char(c));
    if !at_word_end {
        return col;
    }

    let mut start = col - 1;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cursor_is_one_based() {
        let loc = single_location(Path::new("/p/a.cpp"), &[Cursor::at(9, 4)], None).unwrap();
        assert_eq!(loc.to_string(), "/p/a.cpp:10:5");
    }

    #[test]
    fn test_multiple_cursors_yield_nothing() {
        let cursors = [Cursor::at(0, 0), Cursor::at(1, 0)];
        assert!(single_location(Path::new("a.cpp"), &cursors, None).is_none());
        assert!(single_location(Path::new("a.cpp"), &[], None).is_none());
    }

    #[test]
    fn test_selection_yields_nothing() {
        let cursor = Cursor {
            row: 0,
            col: 3,
            selection_len: 2,
        };
        assert!(single_location(Path::new("a.cpp"), &[cursor], None).is_none());
    }

    #[test]
    fn test_word_end_moves_to_word_start() {
        let line = "    int value = 3;";
        // Cursor right after "value".
        let loc = single_location(Path::new("a.cpp"), &[Cursor::at(0, 13)], Some(line)).unwrap();
        assert_eq!(loc.col(), 9);
    }

    #[test]
    fn test_inside_word_is_unchanged() {
        let line = "    int value = 3;";
        let loc = single_location(Path::new("a.cpp"), &[Cursor::at(0, 10)], Some(line)).unwrap();
        assert_eq!(loc.col(), 11);
    }

    #[test]
    fn test_operator_end_is_unchanged() {
        assert_eq!(word_start_if_at_end("a == b", 4), 4);
        assert_eq!(word_start_if_at_end("x.operator==(y)", 12), 12);
    }

    #[test]
    fn test_identifier_after_punctuation_is_unchanged() {
        let col_at = |line: &str, col| {
            single_location(Path::new("a.cpp"), &[Cursor::at(0, col)], Some(line))
                .unwrap()
                .col()
        };
        assert_eq!(col_at("ptr->member", 5), 6);
        assert_eq!(col_at("std::string s;", 5), 6);
        assert_eq!(col_at("foo(bar);", 4), 5);
        assert_eq!(col_at("obj.field", 4), 5);
    }

    #[test]
    fn test_word_end_before_punctuation_moves_to_word_start() {
        assert_eq!(word_start_if_at_end("ptr->member", 3), 0);
        assert_eq!(word_start_if_at_end("foo(bar);", 3), 0);
        assert_eq!(word_start_if_at_end("foo(bar);", 7), 4);
    }

    #[test]
    fn test_single_cursor_keeps_actual_position() {
        let line = "    int value = 3;";
        let cursor = single_cursor(Path::new("a.cpp"), &[Cursor::at(2, 13)], Some(line)).unwrap();
        assert_eq!(cursor.position.col(), 14);
        assert_eq!(cursor.query.col(), 9);
        assert_eq!(cursor.position.row(), cursor.query.row());
    }

    #[test]
    fn test_after_whitespace_is_unchanged() {
        assert_eq!(word_start_if_at_end("a  b", 2), 2);
        assert_eq!(word_start_if_at_end("", 0), 0);
    }

    #[test]
    fn test_end_of_line_word() {
        assert_eq!(word_start_if_at_end("return x", 8), 7);
    }
}
