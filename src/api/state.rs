//! Application state for the Liquidated Damages Engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Only immutable configuration is shared; every assessment is computed
/// independently.
#[derive(Clone, Default)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The engine version reported in assessments.
    pub fn engine_version(&self) -> &str {
        &self.config.metadata().version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineMetadata, FormatterConfig};

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_engine_version_comes_from_metadata() {
        let metadata = EngineMetadata {
            version: "2.1.0".to_string(),
            ..EngineMetadata::default()
        };
        let loader = ConfigLoader::from_parts(metadata, FormatterConfig::default()).unwrap();

        assert_eq!(AppState::new(loader).engine_version(), "2.1.0");
    }
}
