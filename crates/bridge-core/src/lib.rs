//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! OpenTelemetry Data Lake Bridge Core
//!
//! This crate provides the shared building blocks for bridge pipeline stages:
//! the log record and attribute tree model, the bridge error type and the
//! processor trait every stage implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{BridgeError, BridgeResult};
pub use traits::{ProcessorStats, TelemetryProcessor};
pub use types::{AttributeMap, AttributeValue, LogRecord, LogsBatch};

