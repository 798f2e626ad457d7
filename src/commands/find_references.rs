//! List the references of the symbol under the cursor.

use tracing::{error, info};

use super::{report_failure, status, Host};
use crate::location::Location;
use crate::output::{parse_references, ReferenceListing, SymbolLookup};
use crate::rc::RcClient;

pub const REFERENCES_FLAGS: &str = "--references {location}";
pub const VIRTUAL_OVERRIDES_FLAGS: &str = "--references {location} --find-virtuals";

/// Find all references; with `highlight`, each occurrence gets a span.
pub fn find_references(
    client: &RcClient,
    host: &dyn Host,
    cursor: Option<&Location>,
    highlight: bool,
) -> Option<ReferenceListing> {
    info!("find references triggered");
    list_references(client, host, cursor, REFERENCES_FLAGS, highlight)
}

/// Find the overrides of the virtual method under the cursor. Never
/// highlighted: overrides are not spelled like the symbol that was queried.
pub fn find_virtual_overrides(
    client: &RcClient,
    host: &dyn Host,
    cursor: Option<&Location>,
) -> Option<ReferenceListing> {
    info!("find virtual overrides triggered");
    list_references(client, host, cursor, VIRTUAL_OVERRIDES_FLAGS, false)
}

fn list_references(
    client: &RcClient,
    host: &dyn Host,
    cursor: Option<&Location>,
    template: &str,
    highlight: bool,
) -> Option<ReferenceListing> {
    let Some(cursor) = cursor else {
        status(host, "Cannot find references for multiple cursors.");
        return None;
    };

    let client = client.clone().with_current_file(cursor.file());
    let result = client.query_at(template, cursor);
    if !result.succeeded {
        report_failure(host, &result, "Failed to find references of symbol under cursor.");
        return None;
    }

    let lookup: Option<&dyn SymbolLookup> = if highlight { Some(&client) } else { None };
    let listing = match parse_references(&result.stdout, lookup) {
        Ok(listing) => listing,
        Err(e) => {
            error!(error = %e, "failed to parse references");
            status(host, &format!("Failed to parse references: {}", e));
            return None;
        }
    };

    host.show_references(&listing);
    status(
        host,
        &format!(
            "Found {} references across {} files.",
            listing.result_count, listing.file_count
        ),
    );
    Some(listing)
}
