//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error handling for the OpenTelemetry Data Lake Bridge
//!
//! This module provides structured error types shared by every pipeline
//! stage of the bridge.

pub mod conversions;
pub mod types;

// Re-export commonly used types
pub use types::{BridgeError, BridgeResult};
