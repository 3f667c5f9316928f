//! Inbound ports (driving side - API)

use crate::error::Result;
use async_trait::async_trait;
use shared_types::Hash;

/// Primary port: solo consensus lifecycle exposed to the host process
#[async_trait]
pub trait ConsensusService: Send + Sync {
    /// Begin periodic block production
    async fn start(&self) -> Result<()>;

    /// Stop production, letting an in-flight attempt finish.
    ///
    /// Idempotent: halting a stopped producer is a no-op.
    async fn halt(&self) -> Result<()>;

    /// Current production status
    fn status(&self) -> ProducerStatus;
}

/// Lifecycle state of the producer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProducerState {
    /// Created, never started
    Idle,
    /// Production task running
    Running,
    /// Halted (terminal)
    Stopped,
}

/// Production status
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProducerStatus {
    /// Lifecycle state
    pub state: ProducerState,

    /// Blocks committed this session
    pub blocks_produced: u64,

    /// Transactions committed this session (bookkeeping included)
    pub transactions_included: u64,

    /// Ticks aborted before commit
    pub failed_ticks: u64,

    /// Commits whose mempool eviction failed
    pub failed_evictions: u64,

    /// Height of the last committed block
    pub last_height: Option<u64>,

    /// Hash of the last committed block
    pub last_block_hash: Option<Hash>,
}
