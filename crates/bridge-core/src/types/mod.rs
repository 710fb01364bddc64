//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Core type definitions for the OpenTelemetry Data Lake Bridge
//!
//! This module provides the fundamental data structures for log records and
//! their nested attribute trees.

pub mod attributes;
pub mod logs;

// Re-export commonly used types
pub use attributes::*;
pub use logs::*;
