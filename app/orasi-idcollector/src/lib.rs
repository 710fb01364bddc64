//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! NDJSON host for the identifier collector
//!
//! Reads one JSON encoded log record per line, runs the records through an
//! [`IdCollectorProcessor`] in batches and writes them back out, one per line.
//! Lines that do not decode as a record are written through unchanged, in
//! their original position.

use bridge_core::{BridgeError, BridgeResult, LogRecord, LogsBatch, TelemetryProcessor};
use id_collector::IdCollectorProcessor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

/// Host name
pub const HOST_NAME: &str = "orasi-idcollector";

/// Host version information
pub const HOST_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of records per batch
pub const DEFAULT_BATCH_SIZE: usize = 512;

/// Summary of one stream run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Records read and written
    pub records: u64,

    /// Input lines that could not be decoded, written through unchanged
    pub skipped_lines: u64,

    /// Batches handed to the processor
    pub batches: u64,
}

/// Stream records from `reader` through `processor` into `writer`
pub async fn run_stream<R, W>(
    processor: &IdCollectorProcessor,
    reader: R,
    mut writer: W,
    batch_size: usize,
) -> BridgeResult<StreamSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if batch_size == 0 {
        return Err(BridgeError::configuration("batch size must be at least 1"));
    }

    let mut summary = StreamSummary::default();
    let mut pending = Vec::with_capacity(batch_size);
    let mut lines = reader.lines();
    let mut line_number = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<LogRecord>(&line) {
            Ok(record) => pending.push(record),
            Err(e) => {
                warn!("Passing line {} through undecoded: {}", line_number, e);
                if !pending.is_empty() {
                    let records = std::mem::take(&mut pending);
                    flush(processor, records, &mut writer, &mut summary).await?;
                }
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                summary.skipped_lines += 1;
                continue;
            }
        }

        if pending.len() >= batch_size {
            let records = std::mem::take(&mut pending);
            flush(processor, records, &mut writer, &mut summary).await?;
        }
    }

    if !pending.is_empty() {
        flush(processor, pending, &mut writer, &mut summary).await?;
    }

    writer.flush().await?;

    info!(
        "Processed {} records in {} batches ({} lines skipped)",
        summary.records, summary.batches, summary.skipped_lines
    );

    Ok(summary)
}

async fn flush<W>(
    processor: &IdCollectorProcessor,
    records: Vec<LogRecord>,
    writer: &mut W,
    summary: &mut StreamSummary,
) -> BridgeResult<()>
where
    W: AsyncWrite + Unpin,
{
    let batch = processor
        .process(LogsBatch::new(HOST_NAME, records))
        .await
        .map_err(|e| {
            error!(category = e.category(), "Batch processing failed: {}", e);
            e
        })?;

    for record in &batch.records {
        let mut encoded = serde_json::to_vec(record)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
    }

    summary.records += batch.records.len() as u64;
    summary.batches += 1;
    Ok(())
}
