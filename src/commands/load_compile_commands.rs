//! Hand the project's compilation database to rdm.

use std::path::PathBuf;

use tracing::{debug, info};

use super::{modal_error, report_failure, status, Host};
use crate::rc::{RcClient, Severity};

pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// `compile_commands.json` files sitting directly in one of `folders`.
pub fn find_compile_commands(folders: &[PathBuf]) -> Vec<PathBuf> {
    let found: Vec<PathBuf> = folders
        .iter()
        .map(|folder| folder.join(COMPILE_COMMANDS_FILE))
        .filter(|candidate| candidate.is_file())
        .collect();
    debug!(?found, "found compile_commands.json files");
    found
}

/// Returns the loaded database path on success.
///
/// Refuses to guess when there is no database or more than one; both cases
/// need the user's attention and are reported modally.
pub fn load_compile_commands(client: &RcClient, host: &dyn Host) -> Option<PathBuf> {
    info!("load compile commands triggered");

    let found = find_compile_commands(&host.project_folders());
    let path = match found.as_slice() {
        [] => {
            modal_error(host, "There is no compile_commands.json in your environment.");
            return None;
        }
        [path] => path.clone(),
        _ => {
            modal_error(
                host,
                "Multiple compile_commands.json files found in environment.\n\
                 I don't know which one to load, so I'll leave it to you.",
            );
            return None;
        }
    };

    let result = client.query(["--load-compile-commands".to_string(), path.display().to_string()]);
    if !result.succeeded {
        let user_facing = matches!(
            result.classification(),
            Some(c) if c.severity == Severity::UserFacing
        );
        if !user_facing {
            modal_error(
                host,
                "rc failed to load the compilation database.\nRTags can't work without it.",
            );
        }
        report_failure(host, &result, "Failed to load the compilation database.");
        return None;
    }

    status(host, "The compilation database was loaded successfully.");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::RecordingHost;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn client() -> RcClient {
        RcClient::new("/nonexistent/rc", Duration::from_secs(1))
    }

    #[test]
    fn test_find_only_top_level_databases() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir_all(a.join("build")).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("build").join(COMPILE_COMMANDS_FILE), "[]").unwrap();
        fs::write(b.join(COMPILE_COMMANDS_FILE), "[]").unwrap();

        let found = find_compile_commands(&[a, b.clone()]);
        assert_eq!(found, vec![b.join(COMPILE_COMMANDS_FILE)]);
    }

    #[test]
    fn test_no_database_is_modal_error() {
        let dir = tempdir().unwrap();
        let host = RecordingHost {
            folders: vec![dir.path().to_path_buf()],
            ..Default::default()
        };

        assert!(load_compile_commands(&client(), &host).is_none());
        assert!(host.errors.borrow()[0].contains("There is no compile_commands.json"));
    }

    #[test]
    fn test_multiple_databases_is_modal_error() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        for folder in [&a, &b] {
            fs::create_dir_all(folder).unwrap();
            fs::write(folder.join(COMPILE_COMMANDS_FILE), "[]").unwrap();
        }
        let host = RecordingHost {
            folders: vec![a, b],
            ..Default::default()
        };

        assert!(load_compile_commands(&client(), &host).is_none());
        assert!(host.errors.borrow()[0].contains("Multiple compile_commands.json"));
    }

    #[test]
    fn test_rc_failure_is_modal_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(COMPILE_COMMANDS_FILE), "[]").unwrap();
        let host = RecordingHost {
            folders: vec![dir.path().to_path_buf()],
            ..Default::default()
        };

        assert!(load_compile_commands(&client(), &host).is_none());
        assert!(host.errors.borrow()[0].contains("failed to load the compilation database"));
        assert_eq!(
            host.statuses.borrow().last().unwrap(),
            "RTags: Failed to load the compilation database."
        );
    }
}
