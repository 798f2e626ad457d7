//! Client configuration, read from a TOML file.
//!
//! ```toml
//! rc_binary = "/usr/local/bin/rc"
//! timeout_secs = 10
//! highlight_references = true
//!
//! [log]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, RtagsError};

/// Name of the query tool when nothing else is configured.
pub const DEFAULT_RC_BINARY: &str = "rc";

/// Seconds given to rc to finish talking to rdm.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Program spawned for every query.
    pub rc_binary: String,
    /// Deadline for a single rc invocation.
    pub timeout_secs: u64,
    /// Resolve symbol column ranges when listing references.
    pub highlight_references: bool,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rc_binary: DEFAULT_RC_BINARY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            highlight_references: true,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(RtagsError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.rc_binary.trim().is_empty() {
            return Err(RtagsError::Config("rc_binary must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(RtagsError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Logger settings, applied once at startup and again on reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"rtags=debug"`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
