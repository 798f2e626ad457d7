//! Logger setup.
//!
//! The subscriber is installed once, from an explicit [`LogConfig`]. The
//! returned [`LogHandle`] re-applies the level when settings change, so no
//! caller needs to touch global logger state directly.

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::config::LogConfig;
use crate::error::{Result, RtagsError};

const FALLBACK_LEVEL: &str = "warn";

/// Keeps the reloadable filter of the installed subscriber.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Swap the active filter for the level in `config`. A filter taken from
    /// `RUST_LOG` at startup stays in place.
    pub fn reload(&self, config: &LogConfig) -> Result<()> {
        if self.from_env {
            tracing::debug!(level = %config.level, "RUST_LOG is set, keeping its filter");
            return Ok(());
        }
        self.filter
            .reload(build_filter(&config.level))
            .map_err(|e| RtagsError::Logging(e.to_string()))?;
        tracing::debug!(level = %config.level, "log level reloaded");
        Ok(())
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LogConfig) -> Result<LogHandle> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => install(filter, true),
        Err(_) => install(build_filter(&config.level), false),
    }
}

fn install(filter: EnvFilter, from_env: bool) -> Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(filter);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| RtagsError::Logging(e.to_string()))?;

    Ok(LogHandle {
        filter: handle,
        from_env,
    })
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}
