//! Merkle roots and contract-based authorization

use crate::error::Result;
use crate::ports::{AuthorizationBuilder, RootComputer, SignedContract};
use shared_crypto::{
    bookkeeper_address, compute_merkle_root, create_signature_contract, Contract, ContractContext,
};
use shared_types::{Address, Hash, Program, PublicKey};

/// Binary double-SHA-256 Merkle root
#[derive(Clone, Copy, Debug, Default)]
pub struct MerkleRootComputer;

impl RootComputer for MerkleRootComputer {
    fn compute_root(&self, hashes: &[Hash]) -> Result<Hash> {
        Ok(compute_merkle_root(hashes)?)
    }
}

/// Builds programs through a [`ContractContext`].
///
/// Yields no programs until every contract has met its threshold.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContractAuthorizationBuilder;

impl AuthorizationBuilder for ContractAuthorizationBuilder {
    fn bookkeeper_address(&self, bookkeepers: &[PublicKey]) -> Result<Address> {
        Ok(bookkeeper_address(bookkeepers)?)
    }

    fn signature_contract(&self, signer: &PublicKey) -> Result<Contract> {
        Ok(create_signature_contract(signer))
    }

    fn build_programs(&self, signed: Vec<SignedContract>) -> Result<Vec<Program>> {
        let mut context = ContractContext::new();
        for entry in signed {
            context.add_signature(&entry.contract, &entry.signer, entry.signature)?;
        }
        Ok(context.programs())
    }
}
