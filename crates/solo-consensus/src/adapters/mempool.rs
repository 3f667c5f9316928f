//! In-memory transaction pool

use crate::error::{Result, SoloError};
use crate::ports::Mempool;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Block, Hash, Transaction};
use std::collections::HashSet;

/// Insertion-ordered pool of pending transactions.
#[derive(Default)]
pub struct InMemoryMempool {
    pending: RwLock<Vec<(Hash, Transaction)>>,
}

impl InMemoryMempool {
    /// Empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction. Duplicates and bookkeeping transactions are rejected.
    pub fn submit(&self, tx: Transaction) -> Result<Hash> {
        if tx.is_bookkeeping() {
            return Err(SoloError::Mempool(
                "bookkeeping transactions are producer-local".into(),
            ));
        }

        let hash = tx.hash();
        let mut pending = self.pending.write();
        if pending.iter().any(|(existing, _)| *existing == hash) {
            return Err(SoloError::Mempool(format!(
                "duplicate transaction {}",
                hex::encode(hash)
            )));
        }
        pending.push((hash, tx));
        Ok(hash)
    }

    /// Whether `hash` is pending
    pub fn contains(&self, hash: &Hash) -> bool {
        self.pending.read().iter().any(|(existing, _)| existing == hash)
    }

    /// Number of pending transactions
    pub fn len(&self) -> usize {
        self.pending.read().len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.pending.read().is_empty()
    }
}

#[async_trait]
impl Mempool for InMemoryMempool {
    async fn snapshot(&self) -> Vec<Transaction> {
        self.pending
            .read()
            .iter()
            .map(|(_, tx)| tx.clone())
            .collect()
    }

    async fn evict(&self, block: &Block) -> Result<()> {
        let included: HashSet<Hash> = block.transaction_hashes().into_iter().collect();
        self.pending
            .write()
            .retain(|(hash, _)| !included.contains(hash));
        Ok(())
    }
}
