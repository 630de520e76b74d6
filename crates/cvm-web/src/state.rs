//! The live configuration shared by every exported function.

use cvm_common::Result;
use cvm_config::{ConfigCache, ConfigLoader, UiConfig};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::info;

static CONFIG: Lazy<ConfigCache> = Lazy::new(ConfigCache::default);

/// Current configuration.
pub fn config() -> Arc<UiConfig> {
    CONFIG.get()
}

/// Replace the configuration with a parsed YAML or JSON document.
pub fn configure_from_str(text: &str) -> Result<Arc<UiConfig>> {
    let config = ConfigLoader::from_any_str(text)?;
    CONFIG.update(config);
    info!("Configuration replaced");
    Ok(CONFIG.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, since the cache is process-wide.
    #[test]
    fn test_configure_replaces_and_rejects() {
        assert_eq!(config().graph.surface_id, "graph");

        let updated = configure_from_str(r#"{"graph": {"surface_id": "history"}}"#).unwrap();
        assert_eq!(updated.graph.surface_id, "history");
        assert_eq!(config().graph.surface_id, "history");

        assert!(configure_from_str("graph:\n  width: 5\n").is_err());
        assert_eq!(config().graph.surface_id, "history");
    }
}
