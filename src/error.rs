//! Error types for the rc client.
//!
//! Invocation failures (nonzero exit, timeout, missing binary) are not
//! errors: they travel inside [`InvocationResult`](crate::rc::InvocationResult).
//! This enum covers protocol violations found while parsing output, plus
//! configuration and I/O problems.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RtagsError {
    /// rc printed something that does not match the expected line format.
    #[error("malformed rc output: {0}")]
    MalformedOutput(String),

    /// The secondary `--symbol-info` lookup failed or returned nonsense.
    #[error("symbol info lookup failed: {0}")]
    SymbolInfo(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for RtagsError {
    fn from(err: toml::de::Error) -> Self {
        RtagsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RtagsError>;
