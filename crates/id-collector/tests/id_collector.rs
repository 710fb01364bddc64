//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! End-to-end tests for the identifier collector processor
//!
//! Each case runs a single log record through a started processor and
//! compares the resulting attributes with the expected ones.

use bridge_core::types::attributes_from_json;
use bridge_core::{AttributeValue, LogRecord, LogsBatch, TelemetryProcessor};
use id_collector::{IdCollectorConfig, IdCollectorProcessor};
use serde_json::{json, Value};

const TRACE_ID: &str = "07aa8ca1835d3fd6b0c9e26828d50236";
const SPAN_ID: &str = "682bb4b582fcbb58";
const ID32: &str = r"\b[a-zA-Z0-9]{32}\b";
const ID8: &str = r"\b[a-zA-Z0-9]{8}\b";

struct LogTestCase {
    name: &'static str,
    body: &'static str,
    attributes: Value,
    expected: Value,
}

fn digits(d: char, n: usize) -> String {
    std::iter::repeat(d).take(n).collect()
}

fn create_test_record(body: &str, attributes: Value) -> LogRecord {
    LogRecord::new(body)
        .with_trace_id(TRACE_ID)
        .with_span_id(SPAN_ID)
        .with_attributes(attributes_from_json(attributes))
}

async fn started_processor(config: IdCollectorConfig) -> IdCollectorProcessor {
    let processor = IdCollectorProcessor::new(config).expect("valid config");
    processor.start().await.expect("processor starts");
    processor
}

async fn run_case(processor: &IdCollectorProcessor, case: LogTestCase) {
    let record = create_test_record(case.body, case.attributes);
    let batch = LogsBatch::new(case.name, vec![record]);

    let result = processor.process(batch).await.expect("process succeeds");
    assert_eq!(result.records.len(), 1, "{}", case.name);
    assert_eq!(
        result.records[0].attributes,
        attributes_from_json(case.expected),
        "{}",
        case.name
    );
}

#[tokio::test]
async fn test_finds_one_or_multiple_ids() {
    let zeros = digits('0', 32);
    let ones = digits('1', 32);
    let twos = digits('2', 32);
    let threes = digits('3', 32);
    let all = format!("{zeros},{ones},{twos},{threes}");

    let cases = vec![
        LogTestCase {
            name: "single and multiple matches",
            body: "some log 33333333333333333333333333333333 here",
            attributes: json!({
                "attr1": zeros,
                "attr2": "not an ID",
                "attr3": format!("{ones} {twos}"),
            }),
            expected: json!({
                "attr1": zeros,
                "attr2": "not an ID",
                "attr3": format!("{ones} {twos}"),
                "extracted_ids": all,
            }),
        },
        LogTestCase {
            name: "single and multiple matches with dupes",
            body: "some log 33333333333333333333333333333333 here",
            attributes: json!({
                "attr1": zeros,
                "attr2": "not an ID",
                "attr3": format!("{ones} {twos} {ones}"),
            }),
            expected: json!({
                "attr1": zeros,
                "attr2": "not an ID",
                "attr3": format!("{ones} {twos} {ones}"),
                "extracted_ids": all,
            }),
        },
        LogTestCase {
            name: "finds nested matches",
            body: "some log",
            attributes: json!({
                "attr1": zeros,
                "attr2": {"attr1": format!("{ones} {twos}")},
            }),
            expected: json!({
                "attr1": zeros,
                "attr2": {"attr1": format!("{ones} {twos}")},
                "extracted_ids": format!("{zeros},{ones},{twos}"),
            }),
        },
        LogTestCase {
            name: "finds array matches",
            body: "some log",
            attributes: json!({
                "attr1": zeros,
                "attr2": [{
                    "attr1": ones,
                    "attr2": format!("something something {twos} something"),
                }],
            }),
            expected: json!({
                "attr1": zeros,
                "attr2": [{
                    "attr1": ones,
                    "attr2": format!("something something {twos} something"),
                }],
                "extracted_ids": format!("{zeros},{ones},{twos}"),
            }),
        },
        LogTestCase {
            name: "excludes trace id",
            body: "some log",
            attributes: json!({
                "actual_trace_id": TRACE_ID,
                "actual_span_id": SPAN_ID,
                "attr2": [{"attr1": ones}],
            }),
            expected: json!({
                "actual_trace_id": TRACE_ID,
                "actual_span_id": SPAN_ID,
                "attr2": [{"attr1": ones}],
                "extracted_ids": ones,
            }),
        },
    ];

    let processor = started_processor(IdCollectorConfig::new(
        vec![ID32.to_string()],
        "extracted_ids",
    ))
    .await;

    for case in cases {
        run_case(&processor, case).await;
    }

    let stats = processor.detailed_stats().await;
    assert_eq!(stats.total_batches, 5);
    assert_eq!(stats.records_with_ids, 5);
    assert_eq!(stats.identifiers_written, 4 + 4 + 3 + 3 + 1);
}

#[tokio::test]
async fn test_finds_multiple_different_length_ids() {
    let processor = started_processor(IdCollectorConfig::new(
        vec![ID32.to_string(), ID8.to_string()],
        "extracted_ids",
    ))
    .await;

    let ones = digits('1', 32);
    run_case(
        &processor,
        LogTestCase {
            name: "finds nested matches",
            body: "some log",
            attributes: json!({
                "attr1": "00000000",
                "attr2": {"attr1": format!("{ones} 22222222")},
            }),
            expected: json!({
                "attr1": "00000000",
                "attr2": {"attr1": format!("{ones} 22222222")},
                "extracted_ids": format!("00000000,{ones},22222222"),
            }),
        },
    )
    .await;
}

#[tokio::test]
async fn test_does_not_match_longer_ids() {
    let processor = started_processor(IdCollectorConfig::new(
        vec![ID32.to_string()],
        "extracted_ids",
    ))
    .await;

    let thirty_three = digits('0', 33);
    run_case(
        &processor,
        LogTestCase {
            name: "33 characters",
            body: "some log",
            attributes: json!({"attr1": thirty_three}),
            expected: json!({"attr1": thirty_three}),
        },
    )
    .await;
}

#[tokio::test]
async fn test_excludes_negative_patterns() {
    let config = IdCollectorConfig::new(vec![ID32.to_string(), ID8.to_string()], "extracted_ids")
        .with_negative_patterns(vec![r"\b[1]{32}\b".to_string()]);
    let processor = started_processor(config).await;

    let ones = digits('1', 32);
    run_case(
        &processor,
        LogTestCase {
            name: "excludes negative pattern matches",
            body: "some log",
            attributes: json!({
                "attr1": "00000000",
                "attr2": {"attr1": format!("{ones} 22222222")},
            }),
            expected: json!({
                "attr1": "00000000",
                "attr2": {"attr1": format!("{ones} 22222222")},
                "extracted_ids": "00000000,22222222",
            }),
        },
    )
    .await;
}

#[tokio::test]
async fn test_negative_pattern_partial_match_keeps_identifier() {
    let config = IdCollectorConfig::new(vec![ID32.to_string()], "extracted_ids")
        .with_negative_patterns(vec!["1111".to_string()]);
    let processor = started_processor(config).await;

    let ones = digits('1', 32);
    run_case(
        &processor,
        LogTestCase {
            name: "partial exclusion match",
            body: "some log",
            attributes: json!({"attr1": ones}),
            expected: json!({"attr1": ones, "extracted_ids": ones}),
        },
    )
    .await;
}

#[tokio::test]
async fn test_excludes_attributes() {
    let config = IdCollectorConfig::new(vec![ID32.to_string()], "extracted_ids")
        .with_exclude_attributes(vec!["exclude_me".to_string()]);
    let processor = started_processor(config).await;

    let zeros = digits('0', 32);
    let ones = digits('1', 32);
    let twos = digits('2', 32);
    run_case(
        &processor,
        LogTestCase {
            name: "excludes excluded attributes",
            body: "some log",
            attributes: json!({
                "attr1": zeros,
                "attr2": {"attr1": ones},
                "exclude_me": twos,
            }),
            expected: json!({
                "attr1": zeros,
                "attr2": {"attr1": ones},
                "exclude_me": twos,
                "extracted_ids": format!("{zeros},{ones}"),
            }),
        },
    )
    .await;
}

#[tokio::test]
async fn test_no_match_leaves_record_unchanged() {
    let processor = started_processor(IdCollectorConfig::new(
        vec![ID32.to_string()],
        "extracted_ids",
    ))
    .await;

    let record = create_test_record("some log", json!({"attr1": "not an ID", "n": 3}));
    let batch = LogsBatch::new("unchanged", vec![record]);

    let result = processor.process(batch.clone()).await.unwrap();
    assert_eq!(result, batch);
}

#[tokio::test]
async fn test_record_ids_kept_when_self_exclusion_disabled() {
    let mut config = IdCollectorConfig::new(vec![ID32.to_string()], "extracted_ids");
    config.exclude_record_ids = false;
    let processor = started_processor(config).await;

    run_case(
        &processor,
        LogTestCase {
            name: "trace id kept",
            body: "some log",
            attributes: json!({"actual_trace_id": TRACE_ID}),
            expected: json!({"actual_trace_id": TRACE_ID, "extracted_ids": TRACE_ID}),
        },
    )
    .await;
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let processor = started_processor(IdCollectorConfig::new(
        vec![ID32.to_string(), ID8.to_string()],
        "extracted_ids",
    ))
    .await;

    let mut attributes = serde_json::Map::new();
    for (i, d) in ('a'..='z').rev().enumerate() {
        attributes.insert(format!("k{i}"), Value::String(digits(d, if i % 2 == 0 { 32 } else { 8 })));
    }
    let attributes = Value::Object(attributes);

    let mut outputs = Vec::new();
    for _ in 0..5 {
        let batch = LogsBatch::new("det", vec![create_test_record("some log", attributes.clone())]);
        let result = processor.process(batch).await.unwrap();
        outputs.push(result.records[0].attributes.get("extracted_ids").cloned());
    }

    let first = outputs[0].clone().expect("identifiers written");
    let joined = first.as_str().unwrap().to_string();
    let mut sorted: Vec<&str> = joined.split(',').collect();
    sorted.sort();
    assert_eq!(sorted.join(","), joined);
    assert_eq!(sorted.len(), 26);
    assert!(outputs.iter().all(|o| o.as_ref() == Some(&first)));
}

#[tokio::test]
async fn test_body_map_and_scalars_are_traversed() {
    let processor = started_processor(IdCollectorConfig::new(
        vec![ID32.to_string()],
        "extracted_ids",
    ))
    .await;

    let fours = digits('4', 32);
    let mut record = LogRecord::new(AttributeValue::from(json!({
        "message": format!("user {fours} logged in"),
        "count": 12,
        "flags": [true, 1.5, null],
    })));
    record.trace_id = None;

    let result = processor
        .process(LogsBatch::new("body", vec![record]))
        .await
        .unwrap();
    assert_eq!(
        result.records[0].attributes.get("extracted_ids"),
        Some(&AttributeValue::from(fours))
    );
}

#[tokio::test]
async fn test_concurrent_batches_share_processor() {
    let processor = std::sync::Arc::new(
        started_processor(IdCollectorConfig::new(vec![ID32.to_string()], "extracted_ids")).await,
    );

    let mut handles = Vec::new();
    for i in 0..8u8 {
        let processor = processor.clone();
        handles.push(tokio::spawn(async move {
            let id = digits(char::from(b'a' + i), 32);
            let batch = LogsBatch::new(
                "concurrent",
                vec![create_test_record("some log", json!({"attr": id}))],
            );
            let result = processor.process(batch).await.unwrap();
            (id, result.records[0].attributes.get("extracted_ids").cloned())
        }));
    }

    for handle in handles {
        let (id, written) = handle.await.unwrap();
        assert_eq!(written, Some(AttributeValue::from(id)));
    }

    let stats = processor.get_stats().await.unwrap();
    assert_eq!(stats.total_batches, 8);
    assert_eq!(stats.modified_records, 8);
}
