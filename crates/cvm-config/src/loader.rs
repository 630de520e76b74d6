//! Configuration loading utilities

use crate::UiConfig;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl From<ConfigError> for cvm_common::UiError {
    fn from(err: ConfigError) -> Self {
        cvm_common::UiError::config(err.to_string())
    }
}

/// Configuration loader for the UI utilities
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<UiConfig, ConfigError> {
        Self::finish(serde_yaml::from_str(content)?)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> Result<UiConfig, ConfigError> {
        Self::finish(serde_json::from_str(content)?)
    }

    /// Parse a document whose format is not known up front.
    ///
    /// JSON is tried first since every JSON document is also YAML.
    pub fn from_any_str(content: &str) -> Result<UiConfig, ConfigError> {
        match serde_json::from_str::<UiConfig>(content) {
            Ok(config) => Self::finish(config),
            Err(_) => Self::from_yaml_str(content),
        }
    }

    fn finish(config: UiConfig) -> Result<UiConfig, ConfigError> {
        config.validate_all()?;
        debug!(
            surface = %config.graph.surface_id,
            width = config.graph.width,
            height = config.graph.height,
            "Configuration validated"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuoteEscaping;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ConfigLoader::from_yaml_str(
            r#"
csv:
  quote_escaping: first_only
graph:
  width: 1000
"#,
        )
        .unwrap();

        assert_eq!(config.csv.quote_escaping, QuoteEscaping::FirstOnly);
        assert_eq!(config.graph.width, 1000);
        assert_eq!(config.graph.height, 600);
        assert_eq!(config.tables.css_asc, "desc");
    }

    #[test]
    fn test_json_and_any_documents() {
        let json = r#"{"graph": {"margin": 50}}"#;
        assert_eq!(ConfigLoader::from_json_str(json).unwrap().graph.margin, 50);
        assert_eq!(ConfigLoader::from_any_str(json).unwrap().graph.margin, 50);

        let yaml = "graph:\n  margin: 40\n";
        assert_eq!(ConfigLoader::from_any_str(yaml).unwrap().graph.margin, 40);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            ConfigLoader::from_json_str("{\"graph\": "),
            Err(ConfigError::JsonError(_))
        ));
        assert!(matches!(
            ConfigLoader::from_any_str("graph: [unclosed"),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ConfigLoader::from_yaml_str("graph:\n  palette: [\"red\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = ConfigLoader::from_yaml_str("tables:\n  css_asc: asc\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = ConfigLoader::from_yaml_str("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
