//! Block assembly
//!
//! Pulls a mempool snapshot, prepends the bookkeeping transaction, computes
//! the transaction and block roots and builds the unsigned block. Any
//! collaborator failure aborts assembly; nothing partial is returned.

use super::SoloDependencies;
use crate::domain::{
    build_header, build_transaction_sequence, create_bookkeeping_transaction, generate_nonce,
    unix_timestamp, ChainTip,
};
use crate::error::{Result, SoloError};
use crate::ports::{AuthorizationBuilder, Keystore, LedgerStore, Mempool, RootComputer};
use shared_types::{Block, Hash, PublicKey, Transaction};
use std::sync::Arc;
use tracing::debug;

/// Unsigned block plus the signer set that must authorize it
#[derive(Clone, Debug)]
pub struct AssembledBlock {
    /// Block without programs
    pub block: Block,
    /// Bookkeepers whose signatures authorize the block
    pub bookkeepers: Vec<PublicKey>,
}

/// Builds unsigned blocks from the mempool and ledger tip
pub struct BlockAssembler {
    keystore: Arc<dyn Keystore>,
    ledger: Arc<dyn LedgerStore>,
    mempool: Arc<dyn Mempool>,
    roots: Arc<dyn RootComputer>,
    authorization: Arc<dyn AuthorizationBuilder>,
}

impl BlockAssembler {
    /// Create an assembler over the given collaborators
    pub fn new(deps: &SoloDependencies) -> Self {
        Self {
            keystore: Arc::clone(&deps.keystore),
            ledger: Arc::clone(&deps.ledger),
            mempool: Arc::clone(&deps.mempool),
            roots: Arc::clone(&deps.roots),
            authorization: Arc::clone(&deps.authorization),
        }
    }

    /// Assemble the next unsigned block.
    pub async fn assemble(&self) -> Result<AssembledBlock> {
        // Step 1: Resolve the producer identity and the next bookkeeper
        let owner = self
            .keystore
            .default_identity()
            .await
            .map_err(|e| SoloError::IdentityResolution(e.to_string()))?;
        let bookkeepers = vec![owner];
        let next_bookkeeper = self
            .authorization
            .bookkeeper_address(&bookkeepers)
            .map_err(|e| SoloError::IdentityResolution(e.to_string()))?;

        // Step 2: Point-in-time view of the pool
        let snapshot = self.mempool.snapshot().await;

        // Step 3-4: Bookkeeping transaction first, snapshot order preserved
        let nonce = generate_nonce();
        let transactions =
            build_transaction_sequence(create_bookkeeping_transaction(nonce), snapshot);

        // Step 5: Transaction root over the exact sequence
        let hashes: Vec<Hash> = transactions.iter().map(Transaction::hash).collect();
        let transactions_root = self
            .roots
            .compute_root(&hashes)
            .map_err(|e| SoloError::RootComputation(e.to_string()))?;

        // Step 6: Extend the current tip
        let tip = ChainTip {
            height: self
                .ledger
                .tip_height()
                .await
                .map_err(|e| SoloError::StateQuery(e.to_string()))?,
            hash: self
                .ledger
                .tip_hash()
                .await
                .map_err(|e| SoloError::StateQuery(e.to_string()))?,
        };

        // Step 7: Bind the transaction root to ledger state
        let block_root = self
            .ledger
            .block_root(transactions_root)
            .await
            .map_err(|e| SoloError::StateQuery(e.to_string()))?;

        // Step 8-9: Header and unsigned block
        let header = build_header(
            tip,
            transactions_root,
            block_root,
            next_bookkeeper,
            nonce,
            unix_timestamp(),
        );

        debug!(
            "[solo] Assembled block #{} with {} transactions",
            header.height,
            transactions.len()
        );

        Ok(AssembledBlock {
            block: Block {
                header,
                transactions,
                programs: Vec::new(),
            },
            bookkeepers,
        })
    }
}
