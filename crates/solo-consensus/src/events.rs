//! Structured production events
//!
//! Events are emitted through `tracing` as single-line JSON prefixed with
//! `EVENT_FLOW_JSON`, so log pipelines can follow block production.

use serde::{Deserialize, Serialize};
use shared_types::Block;

/// Event: Block committed to the ledger
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockProducedEvent {
    /// Correlation identifier for this production attempt
    pub correlation_id: String,

    /// RFC 3339 event time
    pub timestamp: String,

    /// Hex block hash
    pub block_hash: String,

    /// Block height
    pub block_height: u64,

    /// Transaction count (bookkeeping included)
    pub transaction_count: usize,

    /// Producer nonce carried in the header
    pub consensus_data: u64,

    /// Hex address of the next bookkeeper
    pub next_bookkeeper: String,

    /// Time spent assembling, signing and committing
    pub processing_time_ms: u64,
}

impl BlockProducedEvent {
    /// Build the event for a committed block.
    pub fn new(block: &Block, processing_time_ms: u64) -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now()
                .to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            block_hash: hex::encode(block.hash()),
            block_height: block.header.height,
            transaction_count: block.transactions.len(),
            consensus_data: block.header.consensus_data,
            next_bookkeeper: hex::encode(block.header.next_bookkeeper),
            processing_time_ms,
        }
    }

    /// Emit the event as an `EVENT_FLOW_JSON` log line.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => tracing::info!("EVENT_FLOW_JSON {}", json),
            Err(e) => tracing::warn!("[solo] Failed to encode BlockProduced event: {}", e),
        }
    }
}
