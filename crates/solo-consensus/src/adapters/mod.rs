//! Collaborator adapters
//!
//! In-memory ledger, mempool and keystore plus the crypto-backed root and
//! authorization builders. Enough to run a standalone solo node.

mod crypto;
mod keystore;
mod ledger;
mod mempool;

pub use crypto::{ContractAuthorizationBuilder, MerkleRootComputer};
pub use keystore::LocalKeystore;
pub use ledger::InMemoryLedger;
pub use mempool::InMemoryMempool;

use crate::service::SoloDependencies;
use shared_crypto::Ed25519KeyPair;
use std::sync::Arc;

/// Concrete in-memory collaborators
#[derive(Clone)]
pub struct InMemoryCollaborators {
    /// Producer keys
    pub keystore: Arc<LocalKeystore>,
    /// Chain state
    pub ledger: Arc<InMemoryLedger>,
    /// Pending transactions
    pub mempool: Arc<InMemoryMempool>,
}

impl InMemoryCollaborators {
    /// Collaborators whose producer identity is `keypair`
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        Self {
            keystore: Arc::new(LocalKeystore::new(keypair)),
            ledger: Arc::new(InMemoryLedger::new()),
            mempool: Arc::new(InMemoryMempool::new()),
        }
    }

    /// Collaborators with a freshly generated identity
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate())
    }

    /// Wire the collaborators into service dependencies
    pub fn dependencies(&self) -> SoloDependencies {
        SoloDependencies {
            keystore: self.keystore.clone(),
            ledger: self.ledger.clone(),
            mempool: self.mempool.clone(),
            roots: Arc::new(MerkleRootComputer),
            authorization: Arc::new(ContractAuthorizationBuilder),
        }
    }
}
