//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata, FormatterConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml     # Engine metadata
/// └── formatter.yaml  # LD sentence formatting
/// ```
///
/// # Example
///
/// ```no_run
/// use ld_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded engine: {} {}", loader.metadata().name, loader.metadata().version);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The formatter template has no `{amount}` placeholder
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ld_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), ld_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;

        let formatter_path = path.join("formatter.yaml");
        let formatter = Self::load_yaml::<FormatterConfig>(&formatter_path)?;
        Self::check_formatter(&formatter, &formatter_path.display().to_string())?;

        Ok(Self {
            config: EngineConfig::new(metadata, formatter),
        })
    }

    /// Builds a loader from already-constructed parts, without touching disk.
    pub fn from_parts(metadata: EngineMetadata, formatter: FormatterConfig) -> EngineResult<Self> {
        Self::check_formatter(&formatter, "<in-memory>")?;
        Ok(Self {
            config: EngineConfig::new(metadata, formatter),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_formatter(formatter: &FormatterConfig, path: &str) -> EngineResult<()> {
        if !formatter.template.contains("{amount}") {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "template must contain an {amount} placeholder".to_string(),
            });
        }
        if formatter.zero_phrase.trim().is_empty() {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "zero_phrase must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the formatter settings.
    pub fn formatter(&self) -> &FormatterConfig {
        self.config.formatter()
    }
}
