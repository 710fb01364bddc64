//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration for the identifier collector
//!
//! Example configuration (YAML):
//! ```yaml
//! patterns:
//!   - '\b[a-zA-Z0-9]{32}\b'
//!   - '\b[a-zA-Z0-9]{8}\b'
//! negative_patterns:
//!   - '\b[1]{32}\b'
//! target_attribute: extracted_ids
//! exclude_attributes: [password]
//! ```

use bridge_core::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "IDCOLLECTOR";

/// Default nesting limit for attribute tree traversal
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Identifier collector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IdCollectorConfig {
    /// Inclusion pattern sources
    #[validate(length(min = 1))]
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Exclusion pattern sources, matched against whole identifiers
    #[serde(default)]
    pub negative_patterns: Vec<String>,

    /// Attribute receiving the joined identifiers
    #[validate(length(min = 1))]
    #[serde(default)]
    pub target_attribute: String,

    /// Top-level attributes that are never scanned
    #[serde(default)]
    pub exclude_attributes: Vec<String>,

    /// Drop identifiers equal to the record's own trace or span ID
    #[serde(default = "default_exclude_record_ids")]
    pub exclude_record_ids: bool,

    /// Maximum nesting depth scanned below the body and each top-level attribute
    #[validate(range(min = 1, max = 1024))]
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Environment source for `IDCOLLECTOR_*` overrides
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("patterns")
        .with_list_parse_key("negative_patterns")
        .with_list_parse_key("exclude_attributes")
}

fn default_exclude_record_ids() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for IdCollectorConfig {
    // Not a usable configuration: no patterns and no target attribute.
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            negative_patterns: Vec::new(),
            target_attribute: String::new(),
            exclude_attributes: Vec::new(),
            exclude_record_ids: default_exclude_record_ids(),
            max_depth: default_max_depth(),
        }
    }
}

impl IdCollectorConfig {
    /// Create a configuration with the required fields set
    pub fn new(patterns: Vec<String>, target_attribute: impl Into<String>) -> Self {
        Self {
            patterns,
            target_attribute: target_attribute.into(),
            ..Self::default()
        }
    }

    /// Set the exclusion pattern sources
    pub fn with_negative_patterns(mut self, negative_patterns: Vec<String>) -> Self {
        self.negative_patterns = negative_patterns;
        self
    }

    /// Set the attributes skipped during traversal
    pub fn with_exclude_attributes(mut self, exclude_attributes: Vec<String>) -> Self {
        self.exclude_attributes = exclude_attributes;
        self
    }

    /// Load configuration from file, with environment overrides
    ///
    /// `IDCOLLECTOR_TARGET_ATTRIBUTE=ids` overrides a scalar field; list
    /// fields take comma separated values, e.g. `IDCOLLECTOR_PATTERNS=a,b`.
    pub fn from_file(path: &Path) -> BridgeResult<Self> {
        Self::load(path, env_overrides())
    }

    fn load(path: &Path, environment: config::Environment) -> BridgeResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment)
            .build()
            .map_err(|e| {
                BridgeError::configuration_with_source("Failed to load configuration", e)
            })?;

        let collector_config: IdCollectorConfig = config.try_deserialize().map_err(|e| {
            BridgeError::configuration_with_source("Failed to deserialize configuration", e)
        })?;

        collector_config.validate_config()?;
        Ok(collector_config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(content: &str) -> BridgeResult<Self> {
        let config: IdCollectorConfig = serde_json::from_str(content).map_err(|e| {
            BridgeError::configuration_with_source("Failed to parse configuration", e)
        })?;

        config.validate_config()?;
        Ok(config)
    }

    /// Load configuration from a JSON value
    pub fn from_value(value: &serde_json::Value) -> BridgeResult<Self> {
        let config: IdCollectorConfig = serde_json::from_value(value.clone()).map_err(|e| {
            BridgeError::configuration_with_source("Failed to parse configuration", e)
        })?;

        config.validate_config()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate_config(&self) -> BridgeResult<()> {
        if self.patterns.is_empty() {
            return Err(BridgeError::configuration(
                "missing required field \"patterns\"",
            ));
        }

        if self.target_attribute.is_empty() {
            return Err(BridgeError::configuration(
                "missing required field \"target_attribute\"",
            ));
        }

        self.validate().map_err(|e| {
            BridgeError::validation_with_source("Configuration validation failed", e)
        })?;

        Ok(())
    }
}
