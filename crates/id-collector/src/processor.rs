//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Identifier collector processor
//!
//! Pipeline stage that runs identifier extraction over every record of a
//! logs batch, in place, before the batch continues downstream.

use async_trait::async_trait;
use bridge_core::{
    BridgeError, BridgeResult, LogsBatch, ProcessorStats, TelemetryProcessor,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::IdCollectorConfig;
use crate::extract::IdExtractor;

/// Registered name of the identifier collector processor
pub const ID_COLLECTOR_PROCESSOR_NAME: &str = "id_collector";

/// Identifier collector statistics
#[derive(Debug, Clone, Default)]
pub struct IdCollectorStats {
    /// Total batches processed
    pub total_batches: u64,

    /// Total records processed
    pub total_records: u64,

    /// Records that received the target attribute
    pub records_with_ids: u64,

    /// Identifiers written across all records
    pub identifiers_written: u64,

    /// Cumulative processing time
    pub total_processing_time: Duration,

    /// Last processing timestamp
    pub last_process_time: Option<DateTime<Utc>>,
}

impl IdCollectorStats {
    fn avg_processing_time_ms(&self) -> f64 {
        if self.total_batches == 0 {
            return 0.0;
        }
        self.total_processing_time.as_secs_f64() * 1000.0 / self.total_batches as f64
    }
}

/// Processor writing the identifiers found in each record to a target attribute
pub struct IdCollectorProcessor {
    /// Processor configuration
    config: IdCollectorConfig,

    /// Compiled extraction state, shared read-only across calls
    extractor: Arc<IdExtractor>,

    /// Processor statistics
    stats: Arc<RwLock<IdCollectorStats>>,

    /// Running state
    running: Arc<RwLock<bool>>,
}

impl IdCollectorProcessor {
    /// Create a new identifier collector processor
    pub fn new(config: IdCollectorConfig) -> BridgeResult<Self> {
        let extractor = IdExtractor::from_config(&config)?;

        info!(
            "Creating id collector processor with {} patterns writing to '{}'",
            extractor.patterns().inclusions().len(),
            config.target_attribute
        );

        Ok(Self {
            config,
            extractor: Arc::new(extractor),
            stats: Arc::new(RwLock::new(IdCollectorStats::default())),
            running: Arc::new(RwLock::new(false)),
        })
    }

    /// Processor configuration
    pub fn config(&self) -> &IdCollectorConfig {
        &self.config
    }

    /// Shared extractor, for hosts that drive records themselves
    pub fn extractor(&self) -> Arc<IdExtractor> {
        Arc::clone(&self.extractor)
    }

    /// Start the processor
    pub async fn start(&self) -> BridgeResult<()> {
        let mut running = self.running.write().await;
        if *running {
            return Err(BridgeError::internal(
                "Id collector processor is already running",
            ));
        }

        *running = true;
        info!("Starting id collector processor");

        Ok(())
    }

    /// Stop the processor
    pub async fn stop(&self) -> BridgeResult<()> {
        let mut running = self.running.write().await;
        if !*running {
            return Err(BridgeError::internal("Id collector processor is not running"));
        }

        *running = false;
        info!("Stopping id collector processor");

        Ok(())
    }

    /// Detailed statistics
    pub async fn detailed_stats(&self) -> IdCollectorStats {
        self.stats.read().await.clone()
    }
}

#[async_trait]
impl TelemetryProcessor for IdCollectorProcessor {
    async fn process(&self, mut batch: LogsBatch) -> BridgeResult<LogsBatch> {
        if !*self.running.read().await {
            return Err(BridgeError::internal("Id collector processor is not running"));
        }

        let start_time = std::time::Instant::now();
        let mut records_with_ids = 0u64;
        let mut identifiers_written = 0u64;

        for record in batch.records.iter_mut() {
            let written = self.extractor.extract_record(record);
            if written > 0 {
                records_with_ids += 1;
                identifiers_written += written as u64;
            }
        }

        let processing_time = start_time.elapsed();

        {
            let mut stats = self.stats.write().await;
            stats.total_batches += 1;
            stats.total_records += batch.records.len() as u64;
            stats.records_with_ids += records_with_ids;
            stats.identifiers_written += identifiers_written;
            stats.total_processing_time += processing_time;
            stats.last_process_time = Some(Utc::now());
        }

        debug!(
            "Processed batch {}: {} records, {} with identifiers, {} identifiers in {:?}",
            batch.id,
            batch.records.len(),
            records_with_ids,
            identifiers_written,
            processing_time
        );

        Ok(batch)
    }

    fn name(&self) -> &str {
        ID_COLLECTOR_PROCESSOR_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    async fn health_check(&self) -> BridgeResult<bool> {
        Ok(*self.running.read().await)
    }

    async fn get_stats(&self) -> BridgeResult<ProcessorStats> {
        let stats = self.stats.read().await;

        Ok(ProcessorStats {
            total_batches: stats.total_batches,
            total_records: stats.total_records,
            modified_records: stats.records_with_ids,
            avg_processing_time_ms: stats.avg_processing_time_ms(),
            error_count: 0,
            last_process_time: stats.last_process_time,
        })
    }

    async fn shutdown(&self) -> BridgeResult<()> {
        if *self.running.read().await {
            self.stop().await?;
        }
        Ok(())
    }
}

/// Factory function to create an identifier collector from a JSON config
pub fn create_id_collector_processor(
    config: &serde_json::Value,
) -> BridgeResult<IdCollectorProcessor> {
    let config = IdCollectorConfig::from_value(config)?;
    IdCollectorProcessor::new(config)
}
