//! Commands module: the user actions built on top of rc.
//!
//! Each action takes its collaborators explicitly: an
//! [`RcClient`](crate::rc::RcClient) for queries and a [`Host`] standing
//! in for the editor. The host never hands
//! out views or buffers; actions return structured data and report
//! progress through short status messages or, for failures the user has
//! to act on, a modal error.

pub mod find_references;
pub mod follow_location;
pub mod load_compile_commands;

use std::path::PathBuf;

use crate::navigation::NavigationAction;
use crate::output::ReferenceListing;
use crate::rc::{InvocationResult, Severity};

pub use find_references::{find_references, find_virtual_overrides};
pub use follow_location::follow_location;
pub use load_compile_commands::{find_compile_commands, load_compile_commands};

/// What the editor provides to actions.
pub trait Host {
    /// Short, non-blocking message (status bar).
    fn status_message(&self, message: &str);

    /// Blocking notification the user has to acknowledge.
    fn error_message(&self, message: &str);

    /// Root folders of the open project, as the editor opened them.
    fn project_folders(&self) -> Vec<PathBuf>;

    /// Present a reference listing with its highlighted spans.
    fn show_references(&self, listing: &ReferenceListing);

    /// Move the cursor or open a file.
    fn navigate(&self, action: &NavigationAction);
}

const ERROR_TITLE: &str = "[RTags error]";

fn status(host: &dyn Host, message: &str) {
    host.status_message(&format!("RTags: {}", message));
}

fn modal_error(host: &dyn Host, message: &str) {
    host.error_message(&format!("{}\n\n{}", ERROR_TITLE, message));
}

/// Surface a failed invocation. User-facing exit codes get a modal error
/// first; every failure ends with `fallback` in the status bar.
fn report_failure(host: &dyn Host, result: &InvocationResult, fallback: &str) {
    if let Some(classification) = result.classification() {
        if classification.severity == Severity::UserFacing {
            if let Some(message) = classification.message {
                modal_error(host, message);
            }
        }
    }
    status(host, fallback);
}
