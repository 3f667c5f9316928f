//! Solo Consensus Service
//!
//! Production scheduler: a single background task fires on a fixed interval
//! and runs one production attempt per tick. Attempts run inline on that
//! task and never overlap. Ticks that come due during a slow attempt collapse
//! into a single pending trigger; the rest are dropped, not queued.
//!
//! ```text
//! Idle ──start()──▶ Running ──halt()──▶ Stopped (terminal)
//! ```

mod assembler;
mod authorizer;
mod producer;

#[cfg(test)]
mod tests;

pub use assembler::{AssembledBlock, BlockAssembler};
pub use authorizer::BlockAuthorizer;
pub use producer::SoloProducer;

use crate::config::SoloConfig;
use crate::error::{Result, SoloError};
use crate::metrics::Metrics;
use crate::ports::{
    AuthorizationBuilder, ConsensusService, Keystore, LedgerStore, Mempool, ProducerState,
    ProducerStatus, RootComputer,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Collaborators of the solo producer
#[derive(Clone)]
pub struct SoloDependencies {
    /// Producer key material
    pub keystore: Arc<dyn Keystore>,
    /// Authoritative chain state
    pub ledger: Arc<dyn LedgerStore>,
    /// Pending transaction pool
    pub mempool: Arc<dyn Mempool>,
    /// Merkle root primitive
    pub roots: Arc<dyn RootComputer>,
    /// Contract and program construction
    pub authorization: Arc<dyn AuthorizationBuilder>,
}

enum Lifecycle {
    Idle,
    Running {
        shutdown_tx: watch::Sender<bool>,
        handle: JoinHandle<()>,
    },
    Stopped,
}

/// Periodic solo block producer
pub struct SoloService {
    producer: Arc<SoloProducer>,
    config: SoloConfig,
    lifecycle: Mutex<Lifecycle>,
}

impl SoloService {
    /// Create a new solo service
    pub fn new(config: SoloConfig, deps: SoloDependencies) -> Result<Self> {
        config.validate()?;
        info!("[solo] Initializing Solo Consensus Service");
        info!("  Block interval: {:?}", config.gen_block_time());

        Ok(Self {
            producer: Arc::new(SoloProducer::new(&deps)),
            config,
            lifecycle: Mutex::new(Lifecycle::Idle),
        })
    }

    /// Producer running the individual attempts
    pub fn producer(&self) -> Arc<SoloProducer> {
        Arc::clone(&self.producer)
    }

    /// Production metrics
    pub fn metrics(&self) -> Arc<Metrics> {
        self.producer.metrics()
    }

    /// Service configuration
    pub fn config(&self) -> &SoloConfig {
        &self.config
    }
}

async fn run_production_loop(
    producer: Arc<SoloProducer>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    // First attempt one full period after start
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("[solo] Production task started");
    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => producer.tick().await,
        }
    }
    info!(
        "[solo] Production task stopped. Total blocks produced: {}",
        producer.metrics().get_blocks_produced()
    );
}

#[async_trait]
impl ConsensusService for SoloService {
    async fn start(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running { .. } => return Err(SoloError::AlreadyRunning),
            Lifecycle::Stopped => return Err(SoloError::Stopped),
            Lifecycle::Idle => {}
        }

        info!("[solo] Starting block production");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_production_loop(
            Arc::clone(&self.producer),
            self.config.gen_block_time(),
            shutdown_rx,
        ));
        *lifecycle = Lifecycle::Running {
            shutdown_tx,
            handle,
        };
        Ok(())
    }

    async fn halt(&self) -> Result<()> {
        let previous = std::mem::replace(&mut *self.lifecycle.lock(), Lifecycle::Stopped);

        let Lifecycle::Running {
            shutdown_tx,
            handle,
        } = previous
        else {
            debug!("[solo] Halt requested while not running");
            return Ok(());
        };

        info!("[solo] Stopping block production");
        if shutdown_tx.send(true).is_err() {
            debug!("[solo] Production task already exited");
        }

        // Let an in-flight attempt finish before reporting the stop
        handle
            .await
            .map_err(|e| SoloError::InternalError(format!("production task failed: {e}")))?;
        Ok(())
    }

    fn status(&self) -> ProducerStatus {
        let state = match *self.lifecycle.lock() {
            Lifecycle::Idle => ProducerState::Idle,
            Lifecycle::Running { .. } => ProducerState::Running,
            Lifecycle::Stopped => ProducerState::Stopped,
        };
        let metrics = self.producer.metrics();
        let last_block = metrics.last_block();

        ProducerStatus {
            state,
            blocks_produced: metrics.get_blocks_produced(),
            transactions_included: metrics.get_transactions_included(),
            failed_ticks: metrics.get_failed_ticks(),
            failed_evictions: metrics.get_failed_evictions(),
            last_height: last_block.map(|(height, _)| height),
            last_block_hash: last_block.map(|(_, hash)| hash),
        }
    }
}
