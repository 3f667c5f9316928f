//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Merkle root requested over no leaves
    #[error("Cannot compute a Merkle root over an empty hash list")]
    EmptyMerkleInput,

    /// Contract requested for an empty signer set
    #[error("Signer set is empty")]
    EmptySignerSet,

    /// Multisig threshold outside `1..=n`
    #[error("Invalid multisig threshold: {threshold} of {signers}")]
    InvalidThreshold {
        /// Required signatures
        threshold: usize,
        /// Number of keys in the contract
        signers: usize,
    },

    /// Signature offered by a key the contract does not contain
    #[error("Signer is not part of the contract")]
    SignerNotInContract,
}
