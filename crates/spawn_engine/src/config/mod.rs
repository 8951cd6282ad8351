//! Configuration system
//!
//! Engine configuration is plain serde data loadable from TOML or RON
//! files through the [`Config`] trait.

use std::collections::HashMap;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Configuration for the pooling registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolingConfig {
    /// Free-list capacity reserved when a pool is first created
    pub initial_pool_capacity: usize,

    /// Instances to pre-construct per prototype at registration time,
    /// keyed by prototype name. Prewarmed instances sit in the free list
    /// until first spawned.
    pub prewarm: HashMap<String, usize>,
}

impl Default for PoolingConfig {
    fn default() -> Self {
        Self {
            initial_pool_capacity: 16,
            prewarm: HashMap::new(),
        }
    }
}

impl Config for PoolingConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolingConfig::default();
        assert_eq!(config.initial_pool_capacity, 16);
        assert!(config.prewarm.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PoolingConfig::default();
        config.prewarm.insert("bolt".to_string(), 32);

        let text = toml::to_string_pretty(&config).expect("serialize");
        let parsed: PoolingConfig = toml::from_str(&text).expect("parse");

        assert_eq!(parsed.initial_pool_capacity, 16);
        assert_eq!(parsed.prewarm.get("bolt"), Some(&32));
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let result = PoolingConfig::load_from_file("pooling.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
