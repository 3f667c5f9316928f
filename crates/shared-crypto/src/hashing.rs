//! # SHA-256 Hashing
//!
//! Content hashes are double SHA-256; program hashes are the first 20 bytes
//! of the SHA-256 of a contract's redeem script.

use sha2::{Digest, Sha256};
use shared_types::{Address, Hash};

/// Compute SHA-256 hash of data.
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

pub use shared_types::codec::sha256d;

/// Hash two concatenated nodes: `sha256d(left || right)`.
#[inline]
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left);
    buf[32..].copy_from_slice(right);
    sha256d(&buf)
}

/// Program hash (address) of a redeem script.
pub fn program_hash(code: &[u8]) -> Address {
    let digest = sha256(code);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[..20]);
    address
}
