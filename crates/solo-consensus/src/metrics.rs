//! Metrics collection for solo block production

use parking_lot::RwLock;
use shared_types::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for solo block production
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total blocks committed
    pub blocks_produced: AtomicU64,

    /// Total transactions committed (bookkeeping included)
    pub transactions_included: AtomicU64,

    /// Ticks aborted before commit
    pub failed_ticks: AtomicU64,

    /// Commits followed by a failed eviction
    pub failed_evictions: AtomicU64,

    /// Height and hash of the last committed block
    last_block: RwLock<Option<(u64, Hash)>>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed block
    pub fn record_block_produced(&self, height: u64, hash: Hash, tx_count: usize) {
        self.blocks_produced.fetch_add(1, Ordering::Relaxed);
        self.transactions_included
            .fetch_add(tx_count as u64, Ordering::Relaxed);
        *self.last_block.write() = Some((height, hash));
    }

    /// Record an aborted tick
    pub fn record_failed_tick(&self) {
        self.failed_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed post-commit eviction
    pub fn record_failed_eviction(&self) {
        self.failed_evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get blocks produced
    pub fn get_blocks_produced(&self) -> u64 {
        self.blocks_produced.load(Ordering::Relaxed)
    }

    /// Get transactions included
    pub fn get_transactions_included(&self) -> u64 {
        self.transactions_included.load(Ordering::Relaxed)
    }

    /// Get failed ticks
    pub fn get_failed_ticks(&self) -> u64 {
        self.failed_ticks.load(Ordering::Relaxed)
    }

    /// Get failed evictions
    pub fn get_failed_evictions(&self) -> u64 {
        self.failed_evictions.load(Ordering::Relaxed)
    }

    /// Height and hash of the last committed block
    pub fn last_block(&self) -> Option<(u64, Hash)> {
        *self.last_block.read()
    }
}
