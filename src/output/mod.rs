//! Output module: turning rc's line-oriented text into typed results.
//!
//! Parsers are pure apart from the optional [`SymbolLookup`] used for
//! highlighting. Contract violations come back as
//! [`RtagsError::MalformedOutput`](crate::RtagsError::MalformedOutput) or
//! [`RtagsError::SymbolInfo`](crate::RtagsError::SymbolInfo).

pub mod location;
pub mod references;

pub use location::parse_location;
pub use references::{
    parse_references, parse_symbol_info, ColumnRange, ReferenceListing, ReferenceRecord,
    SymbolLookup,
};
