//! Parsing `--references` output into a grouped listing.
//!
//! rc prints one `file:row:col:context` line per occurrence. The listing
//! shown to the user looks like a "Find Results" buffer:
//!
//! ```text
//! /src/a.cpp:
//!  10:    int x = compute();
//!  14:    return x;
//! /src/b.cpp:
//!  3:    use(x);
//! ```
//!
//! Every file header appears once per run of lines from that file, and
//! several occurrences on the same row share one displayed line.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use tracing::debug;

use super::location::parse_position;
use crate::error::{Result, RtagsError};

/// Start and end column of a symbol on a single line, as reported by rc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: u32,
    pub end: u32,
}

/// Source of symbol column ranges, used for highlighting.
pub trait SymbolLookup {
    /// Column range of the symbol at `location` (`file:row:col`).
    fn symbol_range(&self, location: &str) -> Result<ColumnRange>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
}

/// Parse `rc --json --symbol-info` output into a column range.
pub fn parse_symbol_info(json: &str) -> Result<ColumnRange> {
    let info: SymbolInfo = serde_json::from_str(json)
        .map_err(|e| RtagsError::SymbolInfo(format!("invalid symbol info JSON: {}", e)))?;

    if info.start_line != info.end_line {
        return Err(RtagsError::SymbolInfo(format!(
            "symbol spreads over lines {}..{}",
            info.start_line, info.end_line
        )));
    }

    Ok(ColumnRange {
        start: info.start_column,
        end: info.end_column,
    })
}

/// One highlighted occurrence inside a [`ReferenceListing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub target_file: PathBuf,
    /// 0-based index of the displayed line holding this occurrence.
    pub line: usize,
    /// Columns within the displayed line, prefix included.
    pub col_start: u32,
    pub col_end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceListing {
    pub text: String,
    /// Empty when highlighting was not requested.
    pub spans: Vec<ReferenceRecord>,
    /// Every occurrence counts, coalesced ones included.
    pub result_count: usize,
    pub file_count: usize,
}

impl ReferenceListing {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.result_count == 0
    }
}

struct ReferenceLine<'a> {
    file: &'a str,
    row: &'a str,
    col: &'a str,
    context: &'a str,
}

fn split_reference_line(line: &str) -> Result<ReferenceLine<'_>> {
    let mut parts = line.splitn(4, ':');
    let (Some(file), Some(row), Some(col), Some(context)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(RtagsError::MalformedOutput(format!(
            "expected file:row:col:context: {:?}",
            line
        )));
    };

    if file.is_empty() || parse_position(row).is_none() || parse_position(col).is_none() {
        return Err(RtagsError::MalformedOutput(format!(
            "invalid reference location: {:?}",
            line
        )));
    }

    Ok(ReferenceLine {
        file,
        row: row.trim(),
        col: col.trim(),
        context,
    })
}

/// Build the grouped listing from raw rc output.
///
/// With `lookup` set, each occurrence's column range is fetched (one rc
/// call per occurrence, sequentially) and shifted past the ` {row}:`
/// prefix so the span covers the symbol as displayed.
pub fn parse_references(
    output: &str,
    lookup: Option<&dyn SymbolLookup>,
) -> Result<ReferenceListing> {
    debug!("parsing output returned from rc call");

    let mut text = String::new();
    let mut spans = Vec::new();
    let mut result_count = 0;
    let mut file_count = 0;
    let mut displayed_lines = 0usize;
    let mut previous: Option<(&str, &str)> = None;

    for raw in output.lines().filter(|l| !l.trim().is_empty()) {
        let entry = split_reference_line(raw)?;

        match previous {
            Some((file, _)) if file == entry.file => {}
            _ => {
                text.push_str(entry.file);
                text.push_str(":\n");
                displayed_lines += 1;
                file_count += 1;
                previous = None;
            }
        }

        let same_row = matches!(previous, Some((_, row)) if row == entry.row);
        if !same_row {
            text.push(' ');
            text.push_str(entry.row);
            text.push(':');
            text.push_str(entry.context);
            text.push('\n');
            displayed_lines += 1;
        }
        previous = Some((entry.file, entry.row));

        if let Some(lookup) = lookup {
            let location = format!("{}:{}:{}", entry.file, entry.row, entry.col);
            let range = lookup.symbol_range(&location)?;
            let offset = (1 + entry.row.len() + 1) as u32;
            let shift = |col: u32| {
                col.checked_add(offset).ok_or_else(|| {
                    RtagsError::SymbolInfo(format!("column {} out of range at {}", col, location))
                })
            };
            spans.push(ReferenceRecord {
                target_file: PathBuf::from(entry.file),
                line: displayed_lines - 1,
                col_start: shift(range.start)?,
                col_end: shift(range.end)?,
            });
        }

        result_count += 1;
    }

    Ok(ReferenceListing {
        text,
        spans,
        result_count,
        file_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Returns a fixed range and remembers what it was asked.
    struct FixedLookup {
        range: ColumnRange,
        asked: RefCell<Vec<String>>,
    }

    impl FixedLookup {
        fn new(start: u32, end: u32) -> Self {
            Self {
                range: ColumnRange { start, end },
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl SymbolLookup for FixedLookup {
        fn symbol_range(&self, location: &str) -> Result<ColumnRange> {
            self.asked.borrow_mut().push(location.to_string());
            Ok(self.range)
        }
    }

    struct FailingLookup;

    impl SymbolLookup for FailingLookup {
        fn symbol_range(&self, location: &str) -> Result<ColumnRange> {
            Err(RtagsError::SymbolInfo(format!("no info for {}", location)))
        }
    }

    const SAMPLE: &str = "a.cpp:1:3:int x;\na.cpp:1:9:int x;\nb.cpp:5:2:use(x);";

    #[test]
    fn test_same_row_is_coalesced() {
        let listing = parse_references(SAMPLE, None).unwrap();

        assert_eq!(listing.text, "a.cpp:\n 1:int x;\nb.cpp:\n 5:use(x);\n");
        assert_eq!(listing.result_count, 3);
        assert_eq!(listing.file_count, 2);

        let occurrences: Vec<&str> = listing.lines().filter(|l| l.starts_with(' ')).collect();
        assert_eq!(occurrences, vec![" 1:int x;", " 5:use(x);"]);
        assert!(listing.spans.is_empty());
    }

    #[test]
    fn test_spans_address_displayed_lines() {
        let lookup = FixedLookup::new(5, 6);
        let listing = parse_references(SAMPLE, Some(&lookup)).unwrap();

        let lines: Vec<usize> = listing.spans.iter().map(|s| s.line).collect();
        // Both occurrences on row 1 land on display line 1; b.cpp's on line 3.
        assert_eq!(lines, vec![1, 1, 3]);

        let displayed: Vec<&str> = listing.lines().collect();
        for span in &listing.spans {
            assert!(displayed[span.line].starts_with(' '));
        }

        // " 1:" prefix is three characters wide.
        assert_eq!(listing.spans[0].col_start, 8);
        assert_eq!(listing.spans[0].col_end, 9);
        assert_eq!(listing.spans[2].target_file, PathBuf::from("b.cpp"));

        assert_eq!(
            *lookup.asked.borrow(),
            vec!["a.cpp:1:3", "a.cpp:1:9", "b.cpp:5:2"]
        );
    }

    #[test]
    fn test_offset_grows_with_row_width() {
        let lookup = FixedLookup::new(1, 4);
        let listing = parse_references("x.h:1234:1:void f();", Some(&lookup)).unwrap();
        assert_eq!(listing.spans[0].col_start, 1 + 6);
        assert_eq!(listing.spans[0].col_end, 4 + 6);
    }

    #[test]
    fn test_huge_column_is_rejected() {
        let lookup = FixedLookup::new(u32::MAX - 1, u32::MAX);
        let err = parse_references("a.cpp:1:3:int x;", Some(&lookup)).unwrap_err();
        assert!(matches!(err, RtagsError::SymbolInfo(_)));
    }

    #[test]
    fn test_context_keeps_colons() {
        let listing = parse_references("a.cpp:7:1:std::string s;", None).unwrap();
        assert_eq!(listing.text, "a.cpp:\n 7:std::string s;\n");
    }

    #[test]
    fn test_returning_to_a_file_emits_new_header() {
        let output = "a.cpp:1:1:x\nb.cpp:2:1:y\na.cpp:3:1:z";
        let listing = parse_references(output, None).unwrap();
        assert_eq!(listing.file_count, 3);
        assert_eq!(listing.text, "a.cpp:\n 1:x\nb.cpp:\n 2:y\na.cpp:\n 3:z\n");
    }

    #[test]
    fn test_same_row_in_new_file_is_not_coalesced() {
        let output = "a.cpp:4:1:x\nb.cpp:4:1:x";
        let listing = parse_references(output, None).unwrap();
        assert_eq!(listing.lines().count(), 4);
    }

    #[test]
    fn test_empty_output() {
        let listing = parse_references("", None).unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.file_count, 0);
        assert!(listing.text.is_empty());
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_references("a.cpp:1:2", None).unwrap_err();
        assert!(matches!(err, RtagsError::MalformedOutput(_)));

        let err = parse_references("a.cpp:one:2:ctx", None).unwrap_err();
        assert!(matches!(err, RtagsError::MalformedOutput(_)));
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let err = parse_references(SAMPLE, Some(&FailingLookup)).unwrap_err();
        assert!(matches!(err, RtagsError::SymbolInfo(_)));
    }

    #[test]
    fn test_parse_symbol_info() {
        let json = r#"{
            "location": "a.cpp:1:5:",
            "symbolName": "int x",
            "startLine": 1, "startColumn": 5,
            "endLine": 1, "endColumn": 6
        }"#;
        assert_eq!(
            parse_symbol_info(json).unwrap(),
            ColumnRange { start: 5, end: 6 }
        );
    }

    #[test]
    fn test_symbol_info_spanning_lines_is_rejected() {
        let json = r#"{"startLine": 1, "startColumn": 5, "endLine": 2, "endColumn": 1}"#;
        assert!(matches!(
            parse_symbol_info(json),
            Err(RtagsError::SymbolInfo(_))
        ));
    }

    #[test]
    fn test_symbol_info_missing_fields() {
        assert!(matches!(
            parse_symbol_info(r#"{"startLine": 1}"#),
            Err(RtagsError::SymbolInfo(_))
        ));
        assert!(matches!(
            parse_symbol_info("not json"),
            Err(RtagsError::SymbolInfo(_))
        ));
    }
}
