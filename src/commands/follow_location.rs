//! Jump to the definition (or declaration) of the symbol under the cursor.

use tracing::{error, info};

use super::{report_failure, status, Host};
use crate::navigation::{CursorLocation, NavigationAction, Navigator};
use crate::output::parse_location;
use crate::rc::RcClient;

pub const FOLLOW_LOCATION_FLAGS: &str = "--no-context --follow-location {location}";

/// `cursor` is `None` when the editor had several cursors or a selection.
/// rc is asked at `cursor.query`; the jump history gets `cursor.position`.
pub fn follow_location(
    client: &RcClient,
    navigator: &mut Navigator,
    host: &dyn Host,
    cursor: Option<&CursorLocation>,
) -> Option<NavigationAction> {
    info!("follow location triggered");

    let Some(cursor) = cursor else {
        status(host, "Can't follow location for multiple cursors/selection.");
        return None;
    };

    let result = client.query_at(FOLLOW_LOCATION_FLAGS, &cursor.query);
    if !result.succeeded {
        report_failure(host, &result, "Failed to follow location of symbol under cursor.");
        return None;
    }

    let target = match parse_location(&result.stdout) {
        Ok(Some(target)) => target,
        Ok(None) => {
            info!("rc returned with an empty output, ignoring");
            return None;
        }
        Err(e) => {
            error!(error = %e, "unexpected follow-location output");
            status(host, &format!("Failed to follow location: {}", e));
            return None;
        }
    };

    let action = navigator.resolve(&cursor.position, &target);
    host.navigate(&action);
    Some(action)
}
