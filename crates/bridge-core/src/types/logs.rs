//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Log data structures for the OpenTelemetry Data Lake Bridge
//!
//! This module provides log-specific data structures including log records
//! and the batches that flow through processor pipelines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{AttributeMap, AttributeValue};

/// Individual log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Record identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Record timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    /// Log severity text
    #[serde(default)]
    pub severity_text: Option<String>,

    /// Log severity number
    #[serde(default)]
    pub severity_number: Option<u32>,

    /// Log body
    #[serde(default)]
    pub body: AttributeValue,

    /// Log attributes
    #[serde(default)]
    pub attributes: AttributeMap,

    /// Trace ID of the enclosing span, lower-case hex
    #[serde(default)]
    pub trace_id: Option<String>,

    /// Span ID of the enclosing span, lower-case hex
    #[serde(default)]
    pub span_id: Option<String>,
}

impl LogRecord {
    /// Create a new log record with the given body
    pub fn new(body: impl Into<AttributeValue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            severity_text: None,
            severity_number: None,
            body: body.into(),
            attributes: HashMap::new(),
            trace_id: None,
            span_id: None,
        }
    }

    /// Add attribute to the record
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace the record attributes
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the trace ID
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Set the span ID
    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }

    /// Set severity text and number
    pub fn with_severity(mut self, text: impl Into<String>, number: u32) -> Self {
        self.severity_text = Some(text.into());
        self.severity_number = Some(number);
        self
    }
}

/// Logs batch flowing through a processor pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsBatch {
    /// Batch ID
    pub id: Uuid,

    /// Batch timestamp
    pub timestamp: DateTime<Utc>,

    /// Source identifier
    pub source: String,

    /// Log records
    pub records: Vec<LogRecord>,

    /// Batch metadata
    pub metadata: HashMap<String, String>,
}

impl LogsBatch {
    /// Create a new logs batch
    pub fn new(source: impl Into<String>, records: Vec<LogRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            records,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the batch
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get batch size
    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// Check if batch is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
