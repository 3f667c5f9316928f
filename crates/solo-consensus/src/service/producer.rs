//! Tick orchestration
//!
//! assemble → authorize + install → `LedgerStore::append` → `Mempool::evict`.
//! Everything before the append is side-effect free, so an abort leaves the
//! ledger and the mempool untouched.

use super::assembler::{AssembledBlock, BlockAssembler};
use super::authorizer::BlockAuthorizer;
use super::SoloDependencies;
use crate::error::{Result, SoloError};
use crate::events::BlockProducedEvent;
use crate::metrics::Metrics;
use crate::ports::{LedgerStore, Mempool};
use shared_types::Block;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs single production attempts
pub struct SoloProducer {
    assembler: BlockAssembler,
    authorizer: BlockAuthorizer,
    ledger: Arc<dyn LedgerStore>,
    mempool: Arc<dyn Mempool>,
    metrics: Arc<Metrics>,
}

impl SoloProducer {
    /// Create a producer over the given collaborators
    pub fn new(deps: &SoloDependencies) -> Self {
        Self {
            assembler: BlockAssembler::new(deps),
            authorizer: BlockAuthorizer::new(deps),
            ledger: Arc::clone(&deps.ledger),
            mempool: Arc::clone(&deps.mempool),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Production metrics
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Assemble and authorize the next block without committing it.
    pub async fn make_block(&self) -> Result<Block> {
        let AssembledBlock {
            mut block,
            bookkeepers,
        } = self.assembler.assemble().await?;

        let programs = self.authorizer.authorize(&block, &bookkeepers).await?;
        BlockAuthorizer::install(&mut block, programs);
        Ok(block)
    }

    /// One full production attempt. Returns the committed block.
    ///
    /// Eviction failures are logged and counted but do not fail the attempt.
    pub async fn generate_block(&self) -> Result<Block> {
        let started = Instant::now();
        let block = self.make_block().await?;
        let height = block.header.height;

        self.ledger
            .append(&block)
            .await
            .map_err(|e| SoloError::Commit {
                height,
                reason: e.to_string(),
            })?;

        let hash = block.hash();
        self.metrics
            .record_block_produced(height, hash, block.transactions.len());
        info!(
            "[solo] Block #{} committed | txs: {} | hash: {}",
            height,
            block.transactions.len(),
            hex::encode(&hash[..8])
        );

        if let Err(e) = self.mempool.evict(&block).await {
            self.metrics.record_failed_eviction();
            warn!("[solo] {}", SoloError::Eviction(e.to_string()));
        }

        BlockProducedEvent::new(&block, started.elapsed().as_millis() as u64).emit();
        Ok(block)
    }

    /// Scheduler entry point: one attempt, failures logged.
    pub async fn tick(&self) {
        if let Err(e) = self.generate_block().await {
            self.metrics.record_failed_tick();
            error!("[solo] Block production aborted: {}", e);
        }
    }
}
