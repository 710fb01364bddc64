//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Attribute tree traversal
//!
//! The walker visits the log body first and then every top-level attribute,
//! descending into maps and arrays and running the inclusion patterns over
//! each string scalar it reaches. Other scalars are skipped.

use bridge_core::{AttributeMap, AttributeValue};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::patterns::PatternSet;

/// Unique identifiers collected from one record, kept in lexicographic order
pub type IdentifierSet = BTreeSet<String>;

/// Recursive walker over one record's attribute tree
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'a> {
    patterns: &'a PatternSet,
    skip_attributes: &'a [String],
    max_depth: usize,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker using the given patterns
    pub fn new(patterns: &'a PatternSet) -> Self {
        Self {
            patterns,
            skip_attributes: &[],
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Top-level attribute keys that are not traversed
    pub fn skip_attributes(mut self, keys: &'a [String]) -> Self {
        self.skip_attributes = keys;
        self
    }

    /// Maximum nesting depth; the body and each top-level value are depth 1
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Collect every identifier reachable from the body and attributes
    pub fn collect(&self, body: &AttributeValue, attributes: &AttributeMap) -> IdentifierSet {
        let mut ids = IdentifierSet::new();
        self.collect_into(body, attributes, &mut ids);
        ids
    }

    /// Collect into an existing set
    pub fn collect_into(
        &self,
        body: &AttributeValue,
        attributes: &AttributeMap,
        ids: &mut IdentifierSet,
    ) {
        self.visit(body, 1, ids);

        for (key, value) in attributes {
            if self.skip_attributes.iter().any(|skip| skip == key) {
                continue;
            }
            self.visit(value, 1, ids);
        }
    }

    fn visit(&self, value: &AttributeValue, depth: usize, ids: &mut IdentifierSet) {
        if depth > self.max_depth {
            debug!(
                "Skipping {} value nested deeper than {} levels",
                value.type_name(),
                self.max_depth
            );
            return;
        }

        match value {
            AttributeValue::String(s) => self.patterns.find_all(s, |id| {
                if !ids.contains(id) {
                    ids.insert(id.to_string());
                }
            }),
            AttributeValue::Map(map) => {
                for nested in map.values() {
                    self.visit(nested, depth + 1, ids);
                }
            }
            AttributeValue::Array(values) => {
                for nested in values {
                    self.visit(nested, depth + 1, ids);
                }
            }
            AttributeValue::Bool(_)
            | AttributeValue::Int(_)
            | AttributeValue::Double(_)
            | AttributeValue::Bytes(_)
            | AttributeValue::Empty => {}
        }
    }
}
