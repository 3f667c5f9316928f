//! # Verification Contracts
//!
//! A contract is a redeem script that a [`Program`] must satisfy. Two shapes
//! exist:
//!
//! - **Signature**: `PUSH32 <pubkey> CHECKSIG`, one signature required.
//! - **MultiSig**: `PUSH<m> (PUSH32 <pubkey>)* PUSH<n> CHECKMULTISIG`, keys
//!   sorted, `m` signatures required.
//!
//! The contract's program hash is the address of whoever controls it. The
//! bookkeeper address for a signer set uses the `n - (n - 1) / 3` threshold.

use crate::errors::CryptoError;
use crate::hashing::program_hash;
use shared_types::{Address, Program, PublicKey, Signature};

const OP_PUSHBYTES32: u8 = 0x20;
const OP_PUSHBYTES64: u8 = 0x40;
const OP_PUSH1: u8 = 0x51;
const OP_CHECKSIG: u8 = 0xAC;
const OP_CHECKMULTISIG: u8 = 0xAE;

/// Contract shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    /// Single key, single signature.
    Signature,
    /// `threshold` of the contract's keys must sign.
    MultiSig {
        /// Required signatures.
        threshold: usize,
    },
}

/// A verification contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    /// Contract shape.
    pub kind: ContractKind,
    /// Redeem script.
    pub code: Vec<u8>,
    /// Keys referenced by the script, in script order.
    pub public_keys: Vec<PublicKey>,
    /// Address of the contract.
    pub program_hash: Address,
}

impl Contract {
    /// Number of signatures needed to satisfy the contract.
    pub fn threshold(&self) -> usize {
        match self.kind {
            ContractKind::Signature => 1,
            ContractKind::MultiSig { threshold } => threshold,
        }
    }
}

fn push_int(code: &mut Vec<u8>, value: usize) {
    if (1..=16).contains(&value) {
        code.push(OP_PUSH1 + (value as u8 - 1));
    } else {
        let bytes = (value as u64).to_le_bytes();
        let len = bytes.iter().rposition(|b| *b != 0).map_or(1, |i| i + 1);
        code.push(len as u8);
        code.extend_from_slice(&bytes[..len]);
    }
}

/// Single-signature contract for `public_key`.
pub fn create_signature_contract(public_key: &PublicKey) -> Contract {
    let mut code = Vec::with_capacity(34);
    code.push(OP_PUSHBYTES32);
    code.extend_from_slice(public_key);
    code.push(OP_CHECKSIG);

    Contract {
        kind: ContractKind::Signature,
        program_hash: program_hash(&code),
        code,
        public_keys: vec![*public_key],
    }
}

/// `threshold`-of-n multisig contract. Keys are sorted before encoding so
/// the same set always yields the same address.
pub fn create_multisig_contract(
    threshold: usize,
    public_keys: &[PublicKey],
) -> Result<Contract, CryptoError> {
    if public_keys.is_empty() {
        return Err(CryptoError::EmptySignerSet);
    }
    if threshold == 0 || threshold > public_keys.len() {
        return Err(CryptoError::InvalidThreshold {
            threshold,
            signers: public_keys.len(),
        });
    }

    let mut keys = public_keys.to_vec();
    keys.sort_unstable();

    let mut code = Vec::with_capacity(3 + keys.len() * 33);
    push_int(&mut code, threshold);
    for key in &keys {
        code.push(OP_PUSHBYTES32);
        code.extend_from_slice(key);
    }
    push_int(&mut code, keys.len());
    code.push(OP_CHECKMULTISIG);

    Ok(Contract {
        kind: ContractKind::MultiSig { threshold },
        program_hash: program_hash(&code),
        code,
        public_keys: keys,
    })
}

/// Address that must sign the next block for the given bookkeeper set.
pub fn bookkeeper_address(bookkeepers: &[PublicKey]) -> Result<Address, CryptoError> {
    match bookkeepers {
        [] => Err(CryptoError::EmptySignerSet),
        [single] => Ok(create_signature_contract(single).program_hash),
        keys => {
            let n = keys.len();
            let threshold = n - (n - 1) / 3;
            Ok(create_multisig_contract(threshold, keys)?.program_hash)
        }
    }
}

#[derive(Debug)]
struct ContextEntry {
    contract: Contract,
    signatures: Vec<Option<Signature>>,
}

impl ContextEntry {
    fn new(contract: Contract) -> Self {
        let slots = contract.public_keys.len();
        Self {
            contract,
            signatures: vec![None; slots],
        }
    }

    fn signature_count(&self) -> usize {
        self.signatures.iter().flatten().count()
    }

    fn parameter(&self) -> Vec<u8> {
        let mut parameter = Vec::with_capacity(self.contract.threshold() * 65);
        for signature in self.signatures.iter().flatten().take(self.contract.threshold()) {
            parameter.push(OP_PUSHBYTES64);
            parameter.extend_from_slice(signature);
        }
        parameter
    }
}

/// Collects signatures per contract until every contract is satisfied.
#[derive(Debug, Default)]
pub struct ContractContext {
    entries: Vec<ContextEntry>,
}

impl ContractContext {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signer`'s signature for `contract`.
    pub fn add_signature(
        &mut self,
        contract: &Contract,
        signer: &PublicKey,
        signature: Signature,
    ) -> Result<(), CryptoError> {
        let slot = contract
            .public_keys
            .iter()
            .position(|key| key == signer)
            .ok_or(CryptoError::SignerNotInContract)?;

        let position = match self
            .entries
            .iter()
            .position(|entry| entry.contract.program_hash == contract.program_hash)
        {
            Some(position) => position,
            None => {
                self.entries.push(ContextEntry::new(contract.clone()));
                self.entries.len() - 1
            }
        };
        self.entries[position].signatures[slot] = Some(signature);
        Ok(())
    }

    /// Every contract holds at least its threshold of signatures.
    pub fn is_completed(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .iter()
                .all(|entry| entry.signature_count() >= entry.contract.threshold())
    }

    /// One program per contract, or nothing while the context is incomplete.
    pub fn programs(&self) -> Vec<Program> {
        if !self.is_completed() {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|entry| Program {
                code: entry.contract.code.clone(),
                parameter: entry.parameter(),
            })
            .collect()
    }
}
