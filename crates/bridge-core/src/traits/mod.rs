//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Core trait definitions for the OpenTelemetry Data Lake Bridge
//!
//! This module provides the foundational traits that pipeline stages implement.

pub mod processor;

// Re-export commonly used traits
pub use processor::*;
