//! Configuration loading and management for the Liquidated Damages Engine.
//!
//! This module loads engine metadata and LD sentence formatting settings from
//! YAML files. The quarterly distribution constants are fixed by the method
//! and are not configurable.
//!
//! # Example
//!
//! ```no_run
//! use ld_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Clause: {}", config.formatter().clause_ref);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DigitGrouping, EngineConfig, EngineMetadata, FormatterConfig};
