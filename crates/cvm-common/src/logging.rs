//! Structured logging setup shared by native tests and the browser adapter

use crate::{Result, UiError};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cvm_graphs=trace")
    pub level: String,
    /// Whether to include timestamps. Must be off on `wasm32-unknown-unknown`,
    /// which has no system clock.
    pub include_timestamps: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to emit ANSI colour codes
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_timestamps: true,
            include_targets: true,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Settings suitable for a browser console: no clock, no colours.
    pub fn browser(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            include_timestamps: false,
            include_targets: true,
            ansi: false,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with a caller-provided writer
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_writer<W>(config: LoggingConfig, writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.ansi)
        .with_target(config.include_targets);

    let installed = if config.include_timestamps {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };

    installed.map_err(|e| UiError::with_source("Failed to install tracing subscriber", e))
}
