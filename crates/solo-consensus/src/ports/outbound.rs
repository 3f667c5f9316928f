//! Outbound ports (driven side - SPI)
//!
//! Collaborators owned by the rest of the node. Implementations must be
//! thread-safe; the producer performs no locking of its own.

use crate::error::Result;
use async_trait::async_trait;
use shared_crypto::Contract;
use shared_types::{Address, Block, Hash, Program, PublicKey, Signature, Transaction};

/// Signing account resolved from the keystore.
///
/// Carries no secret material: signing goes back through [`Keystore::sign`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Account public key
    pub public_key: PublicKey,
    /// Program hash of the account's signature contract
    pub program_hash: Address,
}

/// Port: Producer key material and signing
#[async_trait]
pub trait Keystore: Send + Sync {
    /// Public key of the default (producer) identity
    async fn default_identity(&self) -> Result<PublicKey>;

    /// Signing account for `public_key`
    async fn signing_account(&self, public_key: &PublicKey) -> Result<Account>;

    /// Sign `data` with `account`'s key
    async fn sign(&self, data: &[u8], account: &Account) -> Result<Signature>;
}

/// Port: Authoritative chain state
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Hash of the current tip block
    async fn tip_hash(&self) -> Result<Hash>;

    /// Height of the current tip block
    async fn tip_height(&self) -> Result<u64>;

    /// Block root binding `tx_root` to the current ledger state
    async fn block_root(&self, tx_root: Hash) -> Result<Hash>;

    /// Durably append `block`.
    ///
    /// Must reject, without a partial write, a block whose height or
    /// previous hash does not extend the tip.
    async fn append(&self, block: &Block) -> Result<()>;
}

/// Port: Pending transaction pool
#[async_trait]
pub trait Mempool: Send + Sync {
    /// Point-in-time view of pending transactions, in pool order
    async fn snapshot(&self) -> Vec<Transaction>;

    /// Remove every transaction contained in a committed block
    async fn evict(&self, block: &Block) -> Result<()>;
}

/// Port: Merkle root primitive
pub trait RootComputer: Send + Sync {
    /// Root over `hashes`, in order
    fn compute_root(&self, hashes: &[Hash]) -> Result<Hash>;
}

/// A signature paired with the contract it satisfies.
#[derive(Clone, Debug)]
pub struct SignedContract {
    /// Verification contract
    pub contract: Contract,
    /// Key that produced `signature`
    pub signer: PublicKey,
    /// Signature over the block's signable bytes
    pub signature: Signature,
}

/// Port: Verification contracts and authorization programs
pub trait AuthorizationBuilder: Send + Sync {
    /// Address that must sign the block after this one
    fn bookkeeper_address(&self, bookkeepers: &[PublicKey]) -> Result<Address>;

    /// Redeem script for a single signer
    fn signature_contract(&self, signer: &PublicKey) -> Result<Contract>;

    /// Wrap signatures into programs.
    ///
    /// An empty result means the signatures did not satisfy the contracts.
    fn build_programs(&self, signed: Vec<SignedContract>) -> Result<Vec<Program>>;
}
