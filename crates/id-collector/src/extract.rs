//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Identifier extraction for a single log record
//!
//! [`IdExtractor`] ties the pattern set and the tree walker together: it
//! collects identifiers from a record, drops the ones vetoed by exclusion
//! patterns and writes the sorted, comma-joined result into the target
//! attribute.

use bridge_core::{AttributeMap, AttributeValue, BridgeError, BridgeResult, LogRecord};
use tracing::{info, warn};

use crate::config::{IdCollectorConfig, DEFAULT_MAX_DEPTH};
use crate::patterns::PatternSet;
use crate::walker::{IdentifierSet, TreeWalker};

/// Separator placed between identifiers in the target attribute
pub const ID_SEPARATOR: &str = ",";

/// Identifiers rendered for the target attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedIds {
    /// Sorted identifiers joined by [`ID_SEPARATOR`]
    pub value: String,

    /// Number of identifiers in `value`
    pub count: usize,
}

/// Drop excluded identifiers and render the rest, or `None` when nothing is left
pub fn finalize(mut ids: IdentifierSet, patterns: &PatternSet) -> Option<FinalizedIds> {
    ids.retain(|id| !patterns.is_excluded(id));

    if ids.is_empty() {
        return None;
    }

    // BTreeSet iterates in lexicographic byte order
    Some(FinalizedIds {
        value: ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(ID_SEPARATOR),
        count: ids.len(),
    })
}

/// Extract identifiers from `body` and `attributes` into `target_attribute`
///
/// The target attribute itself is not scanned. Returns the number of
/// identifiers written; zero means the attributes were left untouched.
pub fn extract(
    body: &AttributeValue,
    attributes: &mut AttributeMap,
    patterns: &PatternSet,
    target_attribute: &str,
) -> usize {
    let skip = [target_attribute.to_string()];
    let ids = TreeWalker::new(patterns)
        .skip_attributes(&skip)
        .collect(body, attributes);
    write_target(ids, patterns, attributes, target_attribute)
}

fn write_target(
    ids: IdentifierSet,
    patterns: &PatternSet,
    attributes: &mut AttributeMap,
    target_attribute: &str,
) -> usize {
    match finalize(ids, patterns) {
        Some(finalized) => {
            attributes.insert(
                target_attribute.to_string(),
                AttributeValue::String(finalized.value),
            );
            finalized.count
        }
        None => 0,
    }
}

/// Configured identifier extraction, shared read-only across records
#[derive(Debug, Clone)]
pub struct IdExtractor {
    patterns: PatternSet,
    target_attribute: String,
    skip_attributes: Vec<String>,
    exclude_record_ids: bool,
    max_depth: usize,
}

impl IdExtractor {
    /// Create an extractor with default traversal options
    pub fn new(patterns: PatternSet, target_attribute: impl Into<String>) -> BridgeResult<Self> {
        let target_attribute = target_attribute.into();
        if target_attribute.is_empty() {
            return Err(BridgeError::configuration(
                "missing required field \"target_attribute\"",
            ));
        }

        if patterns.is_empty() {
            return Err(BridgeError::configuration(
                "no valid inclusion pattern could be compiled",
            ));
        }

        Ok(Self {
            patterns,
            skip_attributes: vec![target_attribute.clone()],
            target_attribute,
            exclude_record_ids: false,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Build an extractor from a validated configuration
    pub fn from_config(config: &IdCollectorConfig) -> BridgeResult<Self> {
        config.validate_config()?;

        let patterns = PatternSet::new(&config.patterns, &config.negative_patterns);
        if patterns.inclusions().len() < config.patterns.len() {
            warn!(
                "{} of {} inclusion patterns are active",
                patterns.inclusions().len(),
                config.patterns.len()
            );
        }

        let mut extractor = Self::new(patterns, config.target_attribute.clone())?;
        extractor
            .skip_attributes
            .extend(config.exclude_attributes.iter().cloned());
        extractor.exclude_record_ids = config.exclude_record_ids;
        extractor.max_depth = config.max_depth;

        info!(
            target_attribute = %extractor.target_attribute,
            inclusions = extractor.patterns.inclusions().len(),
            exclusions = extractor.patterns.exclusions().len(),
            "Created identifier extractor"
        );

        Ok(extractor)
    }

    /// The compiled patterns
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Name of the attribute receiving the identifiers
    pub fn target_attribute(&self) -> &str {
        &self.target_attribute
    }

    /// Collect the identifiers of a body and attribute map, before exclusion
    pub fn collect(&self, body: &AttributeValue, attributes: &AttributeMap) -> IdentifierSet {
        TreeWalker::new(&self.patterns)
            .skip_attributes(&self.skip_attributes)
            .max_depth(self.max_depth)
            .collect(body, attributes)
    }

    /// Extract into the target attribute of `attributes`
    pub fn extract(&self, body: &AttributeValue, attributes: &mut AttributeMap) -> usize {
        let ids = self.collect(body, attributes);
        write_target(ids, &self.patterns, attributes, &self.target_attribute)
    }

    /// Extract from a log record, honoring record-own ID exclusion
    pub fn extract_record(&self, record: &mut LogRecord) -> usize {
        let mut ids = self.collect(&record.body, &record.attributes);

        if self.exclude_record_ids {
            for own in [record.trace_id.as_deref(), record.span_id.as_deref()]
                .into_iter()
                .flatten()
            {
                ids.retain(|id| !id.eq_ignore_ascii_case(own));
            }
        }

        write_target(
            ids,
            &self.patterns,
            &mut record.attributes,
            &self.target_attribute,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::types::attributes_from_json;
    use serde_json::json;

    const ID32: &str = r"\b[a-zA-Z0-9]{32}\b";
    const ID8: &str = r"\b[a-zA-Z0-9]{8}\b";

    #[test]
    fn test_finalize_sorts_and_joins() {
        let patterns = PatternSet::new([ID32], Vec::<String>::new());
        let ids: IdentifierSet = ["b", "c", "a"].iter().map(|s| s.to_string()).collect();
        let finalized = finalize(ids, &patterns).unwrap();
        assert_eq!(finalized.value, "a,b,c");
        assert_eq!(finalized.count, 3);
    }

    #[test]
    fn test_finalize_empty_after_exclusion() {
        let patterns = PatternSet::new([ID32], [r"a+"]);
        let ids: IdentifierSet = ["a", "aaa"].iter().map(|s| s.to_string()).collect();
        assert_eq!(finalize(ids, &patterns), None);
    }

    #[test]
    fn test_extract_overwrites_existing_target() {
        let patterns = PatternSet::new([ID32], Vec::<String>::new());
        let mut attributes = attributes_from_json(json!({
            "a": "0".repeat(32),
            "extracted_ids": 7,
        }));

        let written = extract(&AttributeValue::Empty, &mut attributes, &patterns, "extracted_ids");
        assert_eq!(written, 1);
        assert_eq!(
            attributes.get("extracted_ids"),
            Some(&AttributeValue::from("0".repeat(32)))
        );
    }

    #[test]
    fn test_extract_ignores_id_in_existing_target() {
        let patterns = PatternSet::new([ID32], Vec::<String>::new());
        let mut attributes = attributes_from_json(json!({
            "a": "1".repeat(32),
            "ids": "9".repeat(32),
        }));

        let written = extract(&AttributeValue::Empty, &mut attributes, &patterns, "ids");
        assert_eq!(written, 1);
        assert_eq!(attributes.get("ids"), Some(&AttributeValue::from("1".repeat(32))));

        // agrees with the configured extractor
        let extractor =
            IdExtractor::new(PatternSet::new([ID32], Vec::<String>::new()), "ids").unwrap();
        let mut configured = attributes_from_json(json!({
            "a": "1".repeat(32),
            "ids": "9".repeat(32),
        }));
        extractor.extract(&AttributeValue::Empty, &mut configured);
        assert_eq!(configured, attributes);
    }

    #[test]
    fn test_extract_no_match_leaves_attributes_untouched() {
        let patterns = PatternSet::new([ID32], Vec::<String>::new());
        let mut attributes = attributes_from_json(json!({"a": "not an ID"}));
        let before = attributes.clone();

        let written = extract(&AttributeValue::from("some log"), &mut attributes, &patterns, "ids");
        assert_eq!(written, 0);
        assert_eq!(attributes, before);
    }

    #[test]
    fn test_extractor_requires_a_valid_pattern() {
        let patterns = PatternSet::new(["[unclosed"], Vec::<String>::new());
        let err = IdExtractor::new(patterns, "ids").unwrap_err();
        assert!(matches!(err, BridgeError::Configuration { .. }));
    }

    #[test]
    fn test_extractor_does_not_rescan_target() {
        let extractor =
            IdExtractor::new(PatternSet::new([ID32], Vec::<String>::new()), "ids").unwrap();
        let mut attributes = attributes_from_json(json!({
            "a": "1".repeat(32),
            "ids": "9".repeat(32),
        }));

        extractor.extract(&AttributeValue::Empty, &mut attributes);
        let first = attributes.clone();
        extractor.extract(&AttributeValue::Empty, &mut attributes);

        assert_eq!(attributes.get("ids"), Some(&AttributeValue::from("1".repeat(32))));
        assert_eq!(attributes, first);
    }

    #[test]
    fn test_extract_record_drops_own_trace_and_span_ids() {
        let config = IdCollectorConfig::new(vec![ID32.to_string(), ID8.to_string()], "ids");
        let extractor = IdExtractor::from_config(&config).unwrap();

        let mut record = LogRecord::new("some log")
            .with_trace_id("07aa8ca1835d3fd6b0c9e26828d50236")
            .with_span_id("682bb4b5")
            .with_attribute("actual_trace_id", "07AA8CA1835D3FD6B0C9E26828D50236")
            .with_attribute("actual_span_id", "682bb4b5")
            .with_attribute("other", "1".repeat(32));

        assert_eq!(extractor.extract_record(&mut record), 1);
        assert_eq!(
            record.attributes.get("ids"),
            Some(&AttributeValue::from("1".repeat(32)))
        );
    }
}
