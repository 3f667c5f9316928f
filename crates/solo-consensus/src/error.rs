//! Error types for the solo block producer

use thiserror::Error;

/// Result type alias for solo production operations
pub type Result<T> = std::result::Result<T, SoloError>;

/// Errors that can occur during solo block production
#[derive(Debug, Error)]
pub enum SoloError {
    /// Signing identity or next-bookkeeper address could not be resolved
    #[error("Identity resolution failed: {0}")]
    IdentityResolution(String),

    /// Transaction root could not be computed
    #[error("Root computation failed: {0}")]
    RootComputation(String),

    /// Ledger state query (tip or block root) failed
    #[error("Ledger state query failed: {0}")]
    StateQuery(String),

    /// Signing or program construction failed
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Authorization returned no programs without reporting an error
    #[error("Authorization produced no programs")]
    EmptyAuthorization,

    /// Ledger store rejected the block
    #[error("Commit of block {height} failed: {reason}")]
    Commit {
        /// Height of the rejected block
        height: u64,
        /// Store-reported reason
        reason: String,
    },

    /// Mempool eviction failed after a successful commit
    #[error("Mempool eviction failed: {0}")]
    Eviction(String),

    /// Keystore error
    #[error("Keystore error: {0}")]
    Keystore(String),

    /// Ledger store error
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Block height does not follow the tip
    #[error("Non-sequential block: expected height {expected}, got {actual}")]
    NonSequentialBlock {
        /// Tip height + 1
        expected: u64,
        /// Height carried by the block
        actual: u64,
    },

    /// Block parent is not the current tip
    #[error("Parent mismatch at height {height}: block does not extend the tip")]
    ParentMismatch {
        /// Height carried by the block
        height: u64,
    },

    /// Mempool error
    #[error("Mempool error: {0}")]
    Mempool(String),

    /// Cryptographic primitive error
    #[error("Crypto error: {0}")]
    Crypto(#[from] shared_crypto::CryptoError),

    /// Producer is already running
    #[error("Production already running")]
    AlreadyRunning,

    /// Producer was halted and cannot be restarted
    #[error("Production stopped; a halted producer cannot be restarted")]
    Stopped,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}
