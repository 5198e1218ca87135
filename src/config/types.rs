//! Configuration types for the Liquidated Damages Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the engine.
    pub name: String,
    /// The version reported alongside each assessment.
    pub version: String,
    /// The LD method in use (e.g., "quarterly_distribution").
    pub method: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "Quarterly LD Engine".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            method: "quarterly_distribution".to_string(),
        }
    }
}

/// How digits are grouped when rendering an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitGrouping {
    /// Lakh/crore grouping: the last three digits, then pairs (`12,34,567`).
    Indian,
    /// Thousands grouping (`1,234,567`).
    International,
}

/// Settings for rendering the LD sentence.
///
/// The `template` must contain an `{amount}` placeholder and may contain a
/// `{clause}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatterConfig {
    /// Locale tag, informational (e.g., "en-IN").
    pub locale: String,
    /// Digit grouping style.
    pub grouping: DigitGrouping,
    /// Text placed before the grouped amount (e.g., "Rs. ").
    #[serde(default)]
    pub currency_prefix: String,
    /// Text placed after the grouped amount (e.g., "/-").
    #[serde(default)]
    pub currency_suffix: String,
    /// Contract clause under which LD is levied.
    pub clause_ref: String,
    /// Sentence used when the amount is zero.
    pub zero_phrase: String,
    /// Sentence template used for a non-zero amount.
    pub template: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            locale: "en-IN".to_string(),
            grouping: DigitGrouping::Indian,
            currency_prefix: "Rs. ".to_string(),
            currency_suffix: "/-".to_string(),
            clause_ref: "2".to_string(),
            zero_phrase: "No liquidated damages are leviable as the work was completed within the stipulated time.".to_string(),
            template: "Liquidated damages of {amount} are leviable under Clause {clause} of the agreement for delay in completion of the work, and shall be recovered from the bill.".to_string(),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    formatter: FormatterConfig,
}

impl EngineConfig {
    /// Creates a new configuration.
    pub fn new(metadata: EngineMetadata, formatter: FormatterConfig) -> Self {
        Self {
            metadata,
            formatter,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the formatter settings.
    pub fn formatter(&self) -> &FormatterConfig {
        &self.formatter
    }
}
