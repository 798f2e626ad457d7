//! Building rc command lines.

use std::fmt;
use std::path::Path;

/// RTags protocol version this client speaks.
pub const PROTOCOL_VERSION: u32 = 124;

/// Placeholder substituted by [`format_flags`].
pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// Flags passed on every call: plain output, absolute paths, and a version
/// check so rc refuses to talk to an incompatible rdm (exit code 37).
pub fn base_flags() -> Vec<String> {
    vec![
        "--no-color".to_string(),
        "--absolute-path".to_string(),
        format!("--verify-version={}", PROTOCOL_VERSION),
    ]
}

/// Fill `{location}` in a flag template, e.g. `"--references {location}"`.
pub fn format_flags(template: &str, location: impl fmt::Display) -> String {
    template.replace(LOCATION_PLACEHOLDER, &location.to_string())
}

/// One rc call: baseline flags, optional current-file context, user flags.
///
/// Built fresh for every request. Flags are not validated here; a bad flag
/// shows up as exit code 38 from rc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    base_flags: Vec<String>,
    context_flag: Option<String>,
    user_flags: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, user_flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            base_flags: base_flags(),
            context_flag: None,
            user_flags: user_flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Tell rdm which file the request originates from.
    pub fn with_current_file(mut self, path: &Path) -> Self {
        self.context_flag = Some(format!("--current-file={}", path.display()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The flat command line, single-space separated.
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(
            1 + self.base_flags.len() + self.user_flags.len() + 1,
        );
        parts.push(&self.program);
        parts.extend(self.base_flags.iter().map(String::as_str));
        if let Some(context) = &self.context_flag {
            parts.push(context);
        }
        parts.extend(self.user_flags.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Argument vector for the child process.
    ///
    /// Obtained by splitting [`Invocation::render`] on whitespace, so a flag
    /// value containing a space (a path like `/my src/a.cpp`) is torn into
    /// several arguments. Flag templates rely on this splitting to carry
    /// more than one flag per string.
    pub fn argv(&self) -> Vec<String> {
        self.render()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
