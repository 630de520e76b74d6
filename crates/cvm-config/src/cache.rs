//! Shared configuration with lock-free reads, swapped atomically on reconfigure.

use crate::schema::UiConfig;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Configuration cache using arc-swap for lock-free reads.
pub struct ConfigCache {
    config: ArcSwap<UiConfig>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: UiConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<UiConfig> {
        self.config.load_full()
    }

    /// Replaces the configuration, returning the previous one.
    pub fn update(&self, config: UiConfig) -> Arc<UiConfig> {
        self.config.swap(Arc::new(config))
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}
