//! # Shared Crypto - Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 / double SHA-256 | Content hashes, program hashes |
//! | `merkle` | Binary double-SHA-256 tree | Transaction roots |
//! | `signatures` | Ed25519 | Producer identity and block signing |
//! | `contract` | Signature / multisig scripts | Authorization programs |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **Key material**: `SigningKey` wipes itself on drop (ed25519-dalek
//!   `zeroize` feature); exported seeds are returned as `Zeroizing`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod errors;
pub mod hashing;
pub mod merkle;
pub mod signatures;

// Re-exports
pub use contract::{
    bookkeeper_address, create_multisig_contract, create_signature_contract, Contract,
    ContractContext, ContractKind,
};
pub use errors::CryptoError;
pub use hashing::{program_hash, sha256, sha256d};
pub use merkle::compute_merkle_root;
pub use signatures::{verify_signature, Ed25519KeyPair};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
