//! Transaction sequencing and header construction

use shared_types::{Address, BlockHeader, Hash, Transaction};
use std::time::{SystemTime, UNIX_EPOCH};

/// Ledger tip the new block extends
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChainTip {
    /// Tip height
    pub height: u64,
    /// Tip block hash
    pub hash: Hash,
}

/// Block transaction order: bookkeeping first, then the snapshot as given.
pub fn build_transaction_sequence(
    bookkeeping: Transaction,
    snapshot: Vec<Transaction>,
) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(snapshot.len() + 1);
    transactions.push(bookkeeping);
    transactions.extend(snapshot);
    transactions
}

/// Current wall-clock time in seconds.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Header for the block extending `tip`.
pub fn build_header(
    tip: ChainTip,
    transactions_root: Hash,
    block_root: Hash,
    next_bookkeeper: Address,
    consensus_data: u64,
    timestamp: u64,
) -> BlockHeader {
    BlockHeader {
        version: crate::CONTEXT_VERSION,
        prev_block_hash: tip.hash,
        transactions_root,
        block_root,
        timestamp,
        height: tip.height + 1,
        consensus_data,
        next_bookkeeper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookkeeping::create_bookkeeping_transaction;
    use shared_types::{Payload, TransactionType};

    fn record(byte: u8) -> Transaction {
        Transaction {
            tx_type: TransactionType::Record,
            payload_version: 0,
            payload: Payload::Opaque(vec![byte]),
            attributes: vec![],
            inputs: vec![],
            outputs: vec![],
            programs: vec![],
        }
    }

    #[test]
    fn test_sequence_puts_bookkeeping_first() {
        let snapshot = vec![record(1), record(2), record(3)];
        let sequence = build_transaction_sequence(create_bookkeeping_transaction(5), snapshot.clone());

        assert_eq!(sequence.len(), 4);
        assert!(sequence[0].is_bookkeeping());
        assert_eq!(&sequence[1..], &snapshot[..]);
    }

    #[test]
    fn test_sequence_with_empty_snapshot() {
        let sequence = build_transaction_sequence(create_bookkeeping_transaction(5), vec![]);
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_header_extends_tip() {
        let tip = ChainTip {
            height: 41,
            hash: [4u8; 32],
        };
        let header = build_header(tip, [1u8; 32], [2u8; 32], [3u8; 20], 9, 1_700_000_000);

        assert_eq!(header.height, 42);
        assert_eq!(header.prev_block_hash, tip.hash);
        assert_eq!(header.version, crate::CONTEXT_VERSION);
        assert_eq!(header.transactions_root, [1u8; 32]);
        assert_eq!(header.block_root, [2u8; 32]);
        assert_eq!(header.next_bookkeeper, [3u8; 20]);
        assert_eq!(header.consensus_data, 9);
        assert_eq!(header.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        // 2023-11-14
        assert!(unix_timestamp() > 1_700_000_000);
    }
}
