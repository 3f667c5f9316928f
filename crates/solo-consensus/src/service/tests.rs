use super::*;
use crate::ports::{Account, SignedContract};
use shared_crypto::{
    bookkeeper_address, compute_merkle_root, create_signature_contract, verify_signature,
    Contract, ContractContext, Ed25519KeyPair,
};
use shared_types::{
    Address, Block, Hash, Payload, Program, PublicKey, Signature, SignableData, Transaction,
    TransactionType, ZERO_HASH,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

// Mock implementations for testing
struct MockKeystore {
    keypair: Ed25519KeyPair,
    fail_identity: AtomicBool,
    fail_sign: AtomicBool,
}

impl MockKeystore {
    fn new() -> Self {
        Self {
            keypair: Ed25519KeyPair::from_seed([7u8; 32]),
            fail_identity: AtomicBool::new(false),
            fail_sign: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Keystore for MockKeystore {
    async fn default_identity(&self) -> Result<PublicKey> {
        if self.fail_identity.load(Ordering::SeqCst) {
            return Err(SoloError::Keystore("wallet locked".into()));
        }
        Ok(self.keypair.public_key())
    }

    async fn signing_account(&self, public_key: &PublicKey) -> Result<Account> {
        Ok(Account {
            public_key: *public_key,
            program_hash: create_signature_contract(public_key).program_hash,
        })
    }

    async fn sign(&self, data: &[u8], _account: &Account) -> Result<Signature> {
        if self.fail_sign.load(Ordering::SeqCst) {
            return Err(SoloError::Keystore("signer unavailable".into()));
        }
        Ok(self.keypair.sign(data))
    }
}

struct MockLedger {
    blocks: parking_lot::Mutex<Vec<Block>>,
    fail_tip: AtomicBool,
    fail_block_root: AtomicBool,
    reject_append: AtomicBool,
    append_calls: AtomicU64,
}

impl MockLedger {
    fn new() -> Self {
        Self {
            blocks: parking_lot::Mutex::new(Vec::new()),
            fail_tip: AtomicBool::new(false),
            fail_block_root: AtomicBool::new(false),
            reject_append: AtomicBool::new(false),
            append_calls: AtomicU64::new(0),
        }
    }

    fn committed(&self) -> Vec<Block> {
        self.blocks.lock().clone()
    }
}

#[async_trait]
impl LedgerStore for MockLedger {
    async fn tip_hash(&self) -> Result<Hash> {
        if self.fail_tip.load(Ordering::SeqCst) {
            return Err(SoloError::Ledger("tip unavailable".into()));
        }
        Ok(self.blocks.lock().last().map_or(ZERO_HASH, Block::hash))
    }

    async fn tip_height(&self) -> Result<u64> {
        if self.fail_tip.load(Ordering::SeqCst) {
            return Err(SoloError::Ledger("tip unavailable".into()));
        }
        Ok(self.blocks.lock().len() as u64)
    }

    async fn block_root(&self, tx_root: Hash) -> Result<Hash> {
        if self.fail_block_root.load(Ordering::SeqCst) {
            return Err(SoloError::Ledger("state unavailable".into()));
        }
        Ok(tx_root)
    }

    async fn append(&self, block: &Block) -> Result<()> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_append.load(Ordering::SeqCst) {
            return Err(SoloError::Ledger("disk full".into()));
        }
        self.blocks.lock().push(block.clone());
        Ok(())
    }
}

struct MockMempool {
    pending: parking_lot::Mutex<Vec<Transaction>>,
    fail_evict: AtomicBool,
    evict_calls: AtomicU64,
}

impl MockMempool {
    fn new(pending: Vec<Transaction>) -> Self {
        Self {
            pending: parking_lot::Mutex::new(pending),
            fail_evict: AtomicBool::new(false),
            evict_calls: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl Mempool for MockMempool {
    async fn snapshot(&self) -> Vec<Transaction> {
        self.pending.lock().clone()
    }

    async fn evict(&self, block: &Block) -> Result<()> {
        self.evict_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_evict.load(Ordering::SeqCst) {
            return Err(SoloError::Mempool("pool poisoned".into()));
        }
        let included = block.transaction_hashes();
        self.pending
            .lock()
            .retain(|tx| !included.contains(&tx.hash()));
        Ok(())
    }
}

struct MockRoots {
    fail: AtomicBool,
}

impl RootComputer for MockRoots {
    fn compute_root(&self, hashes: &[Hash]) -> Result<Hash> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SoloError::InternalError("merkle backend down".into()));
        }
        Ok(compute_merkle_root(hashes)?)
    }
}

struct MockAuthorization {
    withhold_programs: AtomicBool,
}

impl AuthorizationBuilder for MockAuthorization {
    fn bookkeeper_address(&self, bookkeepers: &[PublicKey]) -> Result<Address> {
        Ok(bookkeeper_address(bookkeepers)?)
    }

    fn signature_contract(&self, signer: &PublicKey) -> Result<Contract> {
        Ok(create_signature_contract(signer))
    }

    fn build_programs(&self, signed: Vec<SignedContract>) -> Result<Vec<Program>> {
        if self.withhold_programs.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        let mut context = ContractContext::new();
        for entry in signed {
            context.add_signature(&entry.contract, &entry.signer, entry.signature)?;
        }
        Ok(context.programs())
    }
}

struct Harness {
    keystore: Arc<MockKeystore>,
    ledger: Arc<MockLedger>,
    mempool: Arc<MockMempool>,
    roots: Arc<MockRoots>,
    authorization: Arc<MockAuthorization>,
}

impl Harness {
    fn new(pending: Vec<Transaction>) -> Self {
        Self {
            keystore: Arc::new(MockKeystore::new()),
            ledger: Arc::new(MockLedger::new()),
            mempool: Arc::new(MockMempool::new(pending)),
            roots: Arc::new(MockRoots {
                fail: AtomicBool::new(false),
            }),
            authorization: Arc::new(MockAuthorization {
                withhold_programs: AtomicBool::new(false),
            }),
        }
    }

    fn deps(&self) -> SoloDependencies {
        SoloDependencies {
            keystore: self.keystore.clone(),
            ledger: self.ledger.clone(),
            mempool: self.mempool.clone(),
            roots: self.roots.clone(),
            authorization: self.authorization.clone(),
        }
    }

    fn producer(&self) -> SoloProducer {
        SoloProducer::new(&self.deps())
    }
}

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

// =============================================================================
// Assembly
// =============================================================================

#[tokio::test]
async fn test_block_layout_with_pending_transactions() {
    let pending = vec![record(1), record(2), record(3)];
    let harness = Harness::new(pending.clone());

    let block = harness.producer().generate_block().await.unwrap();

    assert_eq!(block.transactions.len(), 4);
    assert!(block.transactions[0].is_bookkeeping());
    assert_eq!(&block.transactions[1..], &pending[..]);
    assert_eq!(
        block.transactions[0].bookkeeping_nonce(),
        Some(block.header.consensus_data)
    );
    assert_eq!(
        block.header.transactions_root,
        compute_merkle_root(&block.transaction_hashes()).unwrap()
    );
    assert_eq!(block.header.version, crate::CONTEXT_VERSION);
}

#[tokio::test]
async fn test_empty_mempool_yields_bookkeeping_only() {
    let harness = Harness::new(vec![]);

    let block = harness.producer().generate_block().await.unwrap();

    assert_eq!(block.transactions.len(), 1);
    assert!(block.transactions[0].is_bookkeeping());
    assert_eq!(block.header.transactions_root, block.transactions[0].hash());
}

#[tokio::test]
async fn test_header_extends_tip() {
    let harness = Harness::new(vec![]);
    let producer = harness.producer();

    let first = producer.generate_block().await.unwrap();
    let second = producer.generate_block().await.unwrap();

    assert_eq!(first.header.height, 1);
    assert_eq!(first.header.prev_block_hash, ZERO_HASH);
    assert_eq!(second.header.height, 2);
    assert_eq!(second.header.prev_block_hash, first.hash());
    assert_ne!(first.header.consensus_data, second.header.consensus_data);
}

#[tokio::test]
async fn test_next_bookkeeper_is_producer_address() {
    let harness = Harness::new(vec![]);
    let owner = harness.keystore.keypair.public_key();

    let block = harness.producer().generate_block().await.unwrap();

    assert_eq!(
        block.header.next_bookkeeper,
        create_signature_contract(&owner).program_hash
    );
}

#[tokio::test]
async fn test_block_signature_verifies() {
    let harness = Harness::new(vec![record(9)]);
    let owner = harness.keystore.keypair.public_key();

    let block = harness.producer().make_block().await.unwrap();

    assert_eq!(block.programs.len(), 1);
    let program = &block.programs[0];
    assert_eq!(program.code, create_signature_contract(&owner).code);

    let signature: Signature = program.parameter[1..].try_into().unwrap();
    assert!(verify_signature(&owner, &block.signable_bytes(), &signature).is_ok());
}

#[tokio::test]
async fn test_make_block_has_no_side_effects() {
    let harness = Harness::new(vec![record(1)]);

    harness.producer().make_block().await.unwrap();

    assert_eq!(harness.ledger.append_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.mempool.evict_calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn test_identity_failure_aborts() {
    let harness = Harness::new(vec![record(1)]);
    harness.keystore.fail_identity.store(true, Ordering::SeqCst);

    let result = harness.producer().generate_block().await;

    assert!(matches!(result, Err(SoloError::IdentityResolution(_))));
    assert_eq!(harness.ledger.append_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_root_failure_aborts() {
    let harness = Harness::new(vec![record(1)]);
    harness.roots.fail.store(true, Ordering::SeqCst);

    let result = harness.producer().generate_block().await;

    assert!(matches!(result, Err(SoloError::RootComputation(_))));
    assert_eq!(harness.ledger.append_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_state_query_failures_abort() {
    let harness = Harness::new(vec![]);
    harness.ledger.fail_block_root.store(true, Ordering::SeqCst);
    let result = harness.producer().generate_block().await;
    assert!(matches!(result, Err(SoloError::StateQuery(_))));

    let harness = Harness::new(vec![]);
    harness.ledger.fail_tip.store(true, Ordering::SeqCst);
    let result = harness.producer().generate_block().await;
    assert!(matches!(result, Err(SoloError::StateQuery(_))));
    assert_eq!(harness.ledger.append_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_signing_failure_aborts() {
    let harness = Harness::new(vec![]);
    harness.keystore.fail_sign.store(true, Ordering::SeqCst);

    let result = harness.producer().generate_block().await;

    assert!(matches!(result, Err(SoloError::Authorization(_))));
    assert_eq!(harness.ledger.append_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_programs_never_committed() {
    let harness = Harness::new(vec![record(1)]);
    harness
        .authorization
        .withhold_programs
        .store(true, Ordering::SeqCst);

    let result = harness.producer().generate_block().await;

    assert!(matches!(result, Err(SoloError::EmptyAuthorization)));
    assert_eq!(harness.ledger.append_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.mempool.evict_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_append_skips_eviction() {
    let harness = Harness::new(vec![record(1)]);
    harness.ledger.reject_append.store(true, Ordering::SeqCst);
    let producer = harness.producer();

    let result = producer.generate_block().await;

    assert!(matches!(result, Err(SoloError::Commit { height: 1, .. })));
    assert_eq!(harness.mempool.evict_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.mempool.snapshot().await.len(), 1);
    assert_eq!(producer.metrics().get_blocks_produced(), 0);
}

#[tokio::test]
async fn test_eviction_failure_keeps_commit() {
    let harness = Harness::new(vec![record(1)]);
    harness.mempool.fail_evict.store(true, Ordering::SeqCst);
    let producer = harness.producer();

    let block = producer.generate_block().await.unwrap();

    assert_eq!(harness.ledger.committed(), vec![block]);
    assert_eq!(producer.metrics().get_blocks_produced(), 1);
    assert_eq!(producer.metrics().get_failed_evictions(), 1);
}

#[tokio::test]
async fn test_commit_evicts_included_transactions() {
    let harness = Harness::new(vec![record(1), record(2)]);

    harness.producer().generate_block().await.unwrap();

    assert_eq!(harness.mempool.evict_calls.load(Ordering::SeqCst), 1);
    assert!(harness.mempool.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_tick_counts_failures() {
    let harness = Harness::new(vec![]);
    harness.roots.fail.store(true, Ordering::SeqCst);
    let producer = harness.producer();

    producer.tick().await;
    producer.tick().await;

    assert_eq!(producer.metrics().get_failed_ticks(), 2);
    assert_eq!(producer.metrics().get_blocks_produced(), 0);

    // Next tick recovers without intervention
    harness.roots.fail.store(false, Ordering::SeqCst);
    producer.tick().await;
    assert_eq!(producer.metrics().get_blocks_produced(), 1);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_service_rejects_zero_interval() {
    let harness = Harness::new(vec![]);
    let result = SoloService::new(SoloConfig::with_gen_block_time_secs(0), harness.deps());
    assert!(matches!(result, Err(SoloError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_service_lifecycle_transitions() {
    let harness = Harness::new(vec![]);
    let service = SoloService::new(SoloConfig::default(), harness.deps()).unwrap();
    assert_eq!(service.status().state, ProducerState::Idle);

    service.start().await.unwrap();
    assert_eq!(service.status().state, ProducerState::Running);
    assert!(matches!(service.start().await, Err(SoloError::AlreadyRunning)));

    service.halt().await.unwrap();
    assert_eq!(service.status().state, ProducerState::Stopped);
    service.halt().await.unwrap();
    assert!(matches!(service.start().await, Err(SoloError::Stopped)));
}

#[tokio::test]
async fn test_halt_before_start() {
    let harness = Harness::new(vec![]);
    let service = SoloService::new(SoloConfig::default(), harness.deps()).unwrap();

    service.halt().await.unwrap();

    assert_eq!(service.status().state, ProducerState::Stopped);
    assert!(matches!(service.start().await, Err(SoloError::Stopped)));
}

#[tokio::test(start_paused = true)]
async fn test_status_reports_last_block() {
    let harness = Harness::new(vec![record(1)]);
    let service = SoloService::new(SoloConfig::with_gen_block_time_secs(2), harness.deps()).unwrap();

    service.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    service.halt().await.unwrap();

    let status = service.status();
    let committed = harness.ledger.committed();
    assert_eq!(committed.len(), 1);
    assert_eq!(status.blocks_produced, 1);
    assert_eq!(status.transactions_included, 2);
    assert_eq!(status.last_height, Some(1));
    assert_eq!(status.last_block_hash, Some(committed[0].hash()));
}
