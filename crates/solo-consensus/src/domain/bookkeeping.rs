//! Bookkeeping transaction
//!
//! Every block starts with a locally created bookkeeping transaction. It
//! never enters the mempool, keeps the transaction list non-empty and carries
//! the producer's per-block entropy.

use shared_types::{Payload, Transaction, TransactionType};
use std::time::{SystemTime, UNIX_EPOCH};

/// Payload version of the bookkeeping transaction
pub const BOOKKEEPING_PAYLOAD_VERSION: u8 = 0;

/// Fresh producer nonce: wall-clock nanoseconds mixed with random bits.
pub fn generate_nonce() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    nanos ^ rand::random::<u64>()
}

/// Bookkeeping transaction carrying `nonce`, with no inputs or outputs.
pub fn create_bookkeeping_transaction(nonce: u64) -> Transaction {
    Transaction {
        tx_type: TransactionType::BookKeeping,
        payload_version: BOOKKEEPING_PAYLOAD_VERSION,
        payload: Payload::BookKeeping { nonce },
        attributes: Vec::new(),
        inputs: Vec::new(),
        outputs: Vec::new(),
        programs: Vec::new(),
    }
}
