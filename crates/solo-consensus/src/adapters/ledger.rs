//! In-memory ledger store

use crate::error::{Result, SoloError};
use crate::ports::LedgerStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::sha256d;
use shared_types::{Block, BlockHeader, Hash};

/// Ledger store kept entirely in memory.
///
/// Starts from a fixed genesis block at height 0. The block root chains the
/// previous block root with the new transaction root.
pub struct InMemoryLedger {
    blocks: RwLock<Vec<Block>>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    /// Ledger holding only the genesis block
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(vec![Self::genesis()]),
        }
    }

    /// Genesis block: height 0, zero parent, no transactions
    pub fn genesis() -> Block {
        Block {
            header: BlockHeader {
                version: crate::CONTEXT_VERSION,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Block at `height`, if committed
    pub fn block_at(&self, height: u64) -> Option<Block> {
        self.blocks.read().get(height as usize).cloned()
    }

    /// Current tip block
    pub fn tip(&self) -> Block {
        let blocks = self.blocks.read();
        blocks.last().cloned().unwrap_or_else(Self::genesis)
    }

    /// Number of blocks, genesis included
    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    /// Always false: the genesis block is never removed
    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }
}

fn chain_block_root(prev_root: &Hash, tx_root: &Hash) -> Hash {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(prev_root);
    data[32..].copy_from_slice(tx_root);
    sha256d(&data)
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn tip_hash(&self) -> Result<Hash> {
        Ok(self.tip().hash())
    }

    async fn tip_height(&self) -> Result<u64> {
        Ok(self.tip().header.height)
    }

    async fn block_root(&self, tx_root: Hash) -> Result<Hash> {
        Ok(chain_block_root(&self.tip().header.block_root, &tx_root))
    }

    async fn append(&self, block: &Block) -> Result<()> {
        let mut blocks = self.blocks.write();
        let tip = blocks
            .last()
            .ok_or_else(|| SoloError::Ledger("ledger has no genesis block".into()))?;

        let expected = tip.header.height + 1;
        if block.header.height != expected {
            return Err(SoloError::NonSequentialBlock {
                expected,
                actual: block.header.height,
            });
        }
        if block.header.prev_block_hash != tip.hash() {
            return Err(SoloError::ParentMismatch {
                height: block.header.height,
            });
        }
        if !block.is_authorized() {
            return Err(SoloError::Ledger(format!(
                "block {} carries no programs",
                block.header.height
            )));
        }

        blocks.push(block.clone());
        Ok(())
    }
}
