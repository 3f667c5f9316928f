//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Chain**: `Block`, `BlockHeader`
//! - **Transactions**: `Transaction`, `TransactionType`, `Payload`
//! - **Authorization**: `Program`

use crate::codec::{sha256d, write_var_bytes, write_var_uint, SignableData};
use serde::{Deserialize, Serialize};

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte hash (double SHA-256).
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 20-byte program hash identifying a verification contract.
pub type Address = [u8; 20];

/// The all-zero hash, used as the parent of the genesis block.
pub const ZERO_HASH: Hash = [0u8; 32];

// =============================================================================
// CLUSTER A: AUTHORIZATION
// =============================================================================

/// Proof of authorship attached to a block or transaction.
///
/// `code` is the redeem script of the verification contract, `parameter`
/// pushes the signatures that satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Program {
    /// Verification contract (redeem script).
    pub code: Vec<u8>,
    /// Script pushing the signatures.
    pub parameter: Vec<u8>,
}

// =============================================================================
// CLUSTER B: TRANSACTIONS
// =============================================================================

/// Transaction type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Producer bookkeeping transaction, created locally once per block.
    BookKeeping,
    /// Bookkeeper set change.
    BookKeeper,
    /// Asset registration.
    RegisterAsset,
    /// Asset transfer.
    TransferAsset,
    /// Arbitrary data record.
    Record,
    /// Contract deployment.
    DeployCode,
    /// Contract invocation.
    InvokeCode,
}

impl TransactionType {
    /// Wire discriminator byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::BookKeeping => 0x00,
            Self::BookKeeper => 0x02,
            Self::RegisterAsset => 0x40,
            Self::TransferAsset => 0x80,
            Self::Record => 0x81,
            Self::DeployCode => 0xd0,
            Self::InvokeCode => 0xd1,
        }
    }
}

/// Transaction payload.
///
/// Only the bookkeeping payload is interpreted; everything the mempool hands
/// over is carried as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Bookkeeping payload: producer entropy.
    BookKeeping {
        /// Fresh per-block nonce.
        nonce: u64,
    },
    /// Payload of any other transaction type.
    Opaque(Vec<u8>),
}

impl Payload {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::BookKeeping { nonce } => out.extend_from_slice(&nonce.to_le_bytes()),
            Self::Opaque(bytes) => write_var_bytes(out, bytes),
        }
    }
}

/// Transaction attribute (usage tag + data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxAttribute {
    /// Attribute usage tag.
    pub usage: u8,
    /// Attribute data.
    pub data: Vec<u8>,
}

/// Reference to an unspent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the referenced transaction.
    pub ref_tx_id: Hash,
    /// Output index inside the referenced transaction.
    pub ref_tx_output_index: u16,
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Asset identifier.
    pub asset_id: Hash,
    /// Amount in base units.
    pub value: i64,
    /// Recipient program hash.
    pub program_hash: Address,
}

/// A ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Type discriminator.
    pub tx_type: TransactionType,
    /// Payload format version.
    pub payload_version: u8,
    /// Type-specific payload.
    pub payload: Payload,
    /// Attributes.
    pub attributes: Vec<TxAttribute>,
    /// Spent outputs.
    pub inputs: Vec<TxInput>,
    /// Created outputs.
    pub outputs: Vec<TxOutput>,
    /// Authorization programs (not covered by the hash).
    pub programs: Vec<Program>,
}

impl Transaction {
    /// Content hash: double SHA-256 of the unsigned encoding.
    pub fn hash(&self) -> Hash {
        sha256d(&self.signable_bytes())
    }

    /// Whether this is the producer's bookkeeping transaction.
    pub fn is_bookkeeping(&self) -> bool {
        self.tx_type == TransactionType::BookKeeping
    }

    /// Nonce carried by a bookkeeping payload.
    pub fn bookkeeping_nonce(&self) -> Option<u64> {
        match self.payload {
            Payload::BookKeeping { nonce } => Some(nonce),
            Payload::Opaque(_) => None,
        }
    }
}

impl SignableData for Transaction {
    fn signable_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        out.push(self.tx_type.as_byte());
        out.push(self.payload_version);
        self.payload.encode(&mut out);

        write_var_uint(&mut out, self.attributes.len() as u64);
        for attr in &self.attributes {
            out.push(attr.usage);
            write_var_bytes(&mut out, &attr.data);
        }

        write_var_uint(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(&input.ref_tx_id);
            out.extend_from_slice(&input.ref_tx_output_index.to_le_bytes());
        }

        write_var_uint(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.asset_id);
            out.extend_from_slice(&output.value.to_le_bytes());
            out.extend_from_slice(&output.program_hash);
        }
        out
    }
}

// =============================================================================
// CLUSTER C: THE CHAIN
// =============================================================================

/// The header of a block containing metadata and root hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockHeader {
    /// Protocol version for this block.
    pub version: u32,
    /// Hash of the parent block (creates the chain linkage).
    pub prev_block_hash: Hash,
    /// Merkle root of the block's transaction hashes, in order.
    pub transactions_root: Hash,
    /// Root binding the transactions root to the ledger state.
    pub block_root: Hash,
    /// Unix timestamp (seconds) when the block was produced.
    pub timestamp: u64,
    /// Block height in the chain.
    pub height: u64,
    /// Producer-chosen nonce.
    pub consensus_data: u64,
    /// Program hash of the bookkeeper(s) that must sign the next block.
    pub next_bookkeeper: Address,
}

impl BlockHeader {
    /// Block hash: double SHA-256 of the unsigned header encoding.
    pub fn hash(&self) -> Hash {
        sha256d(&self.signable_bytes())
    }
}

impl SignableData for BlockHeader {
    fn signable_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + 32 * 3 + 8 * 3 + 20);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.prev_block_hash);
        out.extend_from_slice(&self.transactions_root);
        out.extend_from_slice(&self.block_root);
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.consensus_data.to_le_bytes());
        out.extend_from_slice(&self.next_bookkeeper);
        out
    }
}

/// A block: header, ordered transactions and authorization programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
    /// Transactions in block order.
    pub transactions: Vec<Transaction>,
    /// Proofs of authorship, one per required signer.
    pub programs: Vec<Program>,
}

impl Block {
    /// Block hash (the header hash).
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Hashes of the block's transactions, in block order.
    pub fn transaction_hashes(&self) -> Vec<Hash> {
        self.transactions.iter().map(Transaction::hash).collect()
    }

    /// Install authorization programs.
    pub fn set_programs(&mut self, programs: Vec<Program>) {
        self.programs = programs;
    }

    /// Whether any authorization program is attached.
    pub fn is_authorized(&self) -> bool {
        !self.programs.is_empty()
    }
}

impl SignableData for Block {
    fn signable_bytes(&self) -> Vec<u8> {
        self.header.signable_bytes()
    }
}
