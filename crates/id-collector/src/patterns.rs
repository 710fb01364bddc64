//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Compiled inclusion and exclusion patterns
//!
//! A [`PatternSet`] is built once per processor and shared read-only by every
//! record processed afterwards. Malformed pattern sources are reported and
//! dropped; they never fail construction.

use regex::Regex;
use tracing::{error, warn};

/// Compiled inclusion and exclusion matchers
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    inclusions: Vec<Regex>,
    exclusions: Vec<Regex>,
}

impl PatternSet {
    /// Compile the given inclusion and exclusion pattern sources
    pub fn new<I, E>(patterns: I, negative_patterns: E) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let inclusions = compile_all(patterns, "pattern", |source| Regex::new(source));
        let exclusions = compile_all(negative_patterns, "negative pattern", |source| {
            // Exclusions must match the whole identifier
            Regex::new(&format!(r"\A(?:{})\z", source))
        });

        Self {
            inclusions,
            exclusions,
        }
    }

    /// Inclusion matchers, in configuration order
    pub fn inclusions(&self) -> &[Regex] {
        &self.inclusions
    }

    /// Exclusion matchers, in configuration order
    pub fn exclusions(&self) -> &[Regex] {
        &self.exclusions
    }

    /// True when no inclusion pattern compiled
    pub fn is_empty(&self) -> bool {
        self.inclusions.is_empty()
    }

    /// Push every non-overlapping inclusion match in `value` into `sink`
    pub fn find_all<'a>(&self, value: &'a str, mut sink: impl FnMut(&'a str)) {
        for pattern in &self.inclusions {
            for found in pattern.find_iter(value) {
                sink(found.as_str());
            }
        }
    }

    /// True when any exclusion matcher matches the whole identifier
    pub fn is_excluded(&self, identifier: &str) -> bool {
        self.exclusions.iter().any(|re| re.is_match(identifier))
    }
}

fn compile_all<S, F>(sources: S, kind: &str, compile: F) -> Vec<Regex>
where
    S: IntoIterator,
    S::Item: AsRef<str>,
    F: Fn(&str) -> Result<Regex, regex::Error>,
{
    let mut compiled = Vec::new();
    let mut dropped = 0usize;

    for source in sources {
        let source = source.as_ref();
        match compile(source) {
            Ok(regex) => compiled.push(regex),
            Err(e) => {
                error!(pattern = %source, error = %e, "failed to compile {}", kind);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!(
            "Dropped {} invalid {}(s), {} remain active",
            dropped,
            kind,
            compiled.len()
        );
    }

    compiled
}
