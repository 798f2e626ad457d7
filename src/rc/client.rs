//! Configured entry point for issuing rc queries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::call::{InvocationResult, RcCall};
use super::command::{format_flags, Invocation};
use crate::config::Config;
use crate::error::{Result, RtagsError};
use crate::location::Location;
use crate::output::{parse_symbol_info, ColumnRange, SymbolLookup};

/// Issues rc queries on behalf of one request.
///
/// Cheap to construct; nothing is kept between calls apart from the
/// settings it was built with.
#[derive(Debug, Clone)]
pub struct RcClient {
    program: String,
    call: RcCall,
    current_file: Option<PathBuf>,
}

impl RcClient {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            call: RcCall::new(timeout),
            current_file: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rc_binary.clone(), config.timeout())
    }

    /// Attach `--current-file=<path>` to every query.
    pub fn with_current_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_file = Some(path.into());
        self
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn invocation<I, S>(&self, user_flags: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(self.program.clone(), user_flags);
        match &self.current_file {
            Some(path) => invocation.with_current_file(path),
            None => invocation,
        }
    }

    /// Run one query and wait for it.
    pub fn query<I, S>(&self, user_flags: I) -> InvocationResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.call.run(self.invocation(user_flags))
    }

    /// Run a flag template such as `"--references {location}"`.
    pub fn query_at(&self, template: &str, location: &Location) -> InvocationResult {
        self.query([format_flags(template, location)])
    }
}

impl SymbolLookup for RcClient {
    fn symbol_range(&self, location: &str) -> Result<ColumnRange> {
        debug!(location, "looking up symbol info");
        let result = self.query([format!("--json --symbol-info {}", location)]);
        if !result.succeeded {
            return Err(RtagsError::SymbolInfo(format!(
                "rc --symbol-info failed for {}",
                location
            )));
        }
        parse_symbol_info(&result.stdout)
    }
}
