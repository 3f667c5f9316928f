//! # Merkle Root
//!
//! Binary tree over transaction hashes where each parent is
//! `sha256d(left || right)`. A level with an odd number of nodes pairs its
//! last node with itself. A single leaf is its own root.

use crate::errors::CryptoError;
use crate::hashing::hash_pair;
use shared_types::Hash;

/// Compute the Merkle root of an ordered list of hashes.
///
/// Returns [`CryptoError::EmptyMerkleInput`] for an empty list.
pub fn compute_merkle_root(hashes: &[Hash]) -> Result<Hash, CryptoError> {
    if hashes.is_empty() {
        return Err(CryptoError::EmptyMerkleInput);
    }

    let mut level = hashes.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                hash_pair(left, right)
            })
            .collect();
    }
    Ok(level[0])
}
