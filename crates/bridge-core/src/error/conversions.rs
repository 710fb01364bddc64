//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error conversions for the OpenTelemetry Data Lake Bridge
//!
//! This module provides error conversion implementations for common error types.

use super::types::BridgeError;

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::internal_with_source("IO error", err)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::serialization_with_source("JSON serialization error", err)
    }
}

impl From<config::ConfigError> for BridgeError {
    fn from(err: config::ConfigError) -> Self {
        BridgeError::configuration_with_source("Configuration error", err)
    }
}

impl From<validator::ValidationErrors> for BridgeError {
    fn from(err: validator::ValidationErrors) -> Self {
        BridgeError::validation_with_source("Validation error", err)
    }
}

impl From<regex::Error> for BridgeError {
    fn from(err: regex::Error) -> Self {
        BridgeError::configuration_with_source("Invalid regex pattern", err)
    }
}
