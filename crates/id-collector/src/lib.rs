//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Identifier collector for the OpenTelemetry Data Lake Bridge
//!
//! Finds identifier-like substrings anywhere in a log record's body and
//! nested attributes and writes the deduplicated, sorted set into a single
//! target attribute.

pub mod config;
pub mod extract;
pub mod patterns;
pub mod processor;
pub mod walker;

// Re-export commonly used types
pub use crate::config::IdCollectorConfig;
pub use extract::{extract, finalize, FinalizedIds, IdExtractor, ID_SEPARATOR};
pub use patterns::PatternSet;
pub use processor::{
    create_id_collector_processor, IdCollectorProcessor, IdCollectorStats,
    ID_COLLECTOR_PROCESSOR_NAME,
};
pub use walker::{IdentifierSet, TreeWalker};
