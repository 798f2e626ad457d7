//! # rtags
//!
//! Editor-side client for the RTags C/C++ indexer.
//!
//! The crate drives `rc`, RTags' query tool, on behalf of an editor: it
//! builds the command line, runs it off the caller's thread with a
//! deadline, decides how loudly to report failures, and parses the output
//! into locations and reference listings the editor can act on.
//!
//! ## Key Features
//!
//! - **Follow location**: jump to a symbol's definition, across symlinks
//! - **Find references**: grouped listing with highlighted occurrences
//! - **Virtual overrides**: every override of a virtual method
//! - **Compilation database**: hand `compile_commands.json` to rdm
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rtags::{parse_location, Config, Navigator, RcClient};
//!
//! let client = RcClient::from_config(&Config::default());
//! let result = client.query(["--follow-location /src/main.cpp:10:5"]);
//! if result.succeeded {
//!     if let Ok(Some(target)) = parse_location(&result.stdout) {
//!         let mut navigator = Navigator::new(vec!["/src".into()]);
//!         let cursor = rtags::Location::new("/src/main.cpp", 10, 5).unwrap();
//!         println!("{:?}", navigator.resolve(&cursor, &target));
//!     }
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod output;
pub mod rc;

// Re-exports for convenience
pub use config::{Config, LogConfig};
pub use error::{Result, RtagsError};
pub use location::Location;
pub use logging::{init_logging, LogHandle};

pub use commands::{
    find_references, find_virtual_overrides, follow_location, load_compile_commands, Host,
};
pub use navigation::{
    single_cursor, single_location, Cursor, CursorLocation, NavigationAction, Navigator,
};
pub use output::{parse_location, parse_references, ReferenceListing, ReferenceRecord};
pub use rc::{classify, Invocation, InvocationResult, RcCall, RcClient, Severity};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_cursor_to_command_line() {
        let loc = single_location(Path::new("/proj/a.cpp"), &[Cursor::at(9, 4)], None).unwrap();
        let invocation = Invocation::new(
            "rc",
            [rc::format_flags(commands::find_references::REFERENCES_FLAGS, &loc)],
        );
        assert_eq!(
            invocation.render(),
            "rc --no-color --absolute-path --verify-version=124 --references /proj/a.cpp:10:5"
        );
    }

    #[test]
    fn test_parsed_location_feeds_navigator() {
        let target = parse_location("/proj/b.cpp:12:3:").unwrap().unwrap();
        let cursor = Location::new("/proj/a.cpp", 1, 1).unwrap();
        let mut navigator = Navigator::default();

        match navigator.resolve(&cursor, &target) {
            NavigationAction::OpenFile { path, row, col } => {
                assert_eq!(path, Path::new("/proj/b.cpp"));
                assert_eq!((row, col), (12, 3));
            }
            other => panic!("expected OpenFile, got {:?}", other),
        }
        assert_eq!(navigator.jump_back(), Some(cursor));
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let output = "a.cpp:1:3:int x;\na.cpp:1:9:int x;\nb.cpp:5:2:use(x);";
        let first = parse_references(output, None).unwrap();
        let second = parse_references(output, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classification_table() {
        let expected = [
            (32, Severity::Logged),
            (33, Severity::Logged),
            (34, Severity::Logged),
            (35, Severity::UserFacing),
            (36, Severity::UserFacing),
            (37, Severity::UserFacing),
            (38, Severity::Logged),
        ];
        for (code, severity) in expected {
            assert_eq!(classify(code).severity, severity, "code {}", code);
        }
    }
}
