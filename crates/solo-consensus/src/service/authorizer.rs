//! Block authorization
//!
//! Signs the block's signable bytes once per required signer and wraps the
//! signatures into programs. The signer set is generic; solo mode always
//! passes exactly one key.

use super::SoloDependencies;
use crate::error::{Result, SoloError};
use crate::ports::{AuthorizationBuilder, Keystore, SignedContract};
use shared_types::{Block, Program, PublicKey, SignableData};
use std::sync::Arc;
use tracing::debug;

/// Produces and installs authorization programs
pub struct BlockAuthorizer {
    keystore: Arc<dyn Keystore>,
    authorization: Arc<dyn AuthorizationBuilder>,
}

impl BlockAuthorizer {
    /// Create an authorizer over the given collaborators
    pub fn new(deps: &SoloDependencies) -> Self {
        Self {
            keystore: Arc::clone(&deps.keystore),
            authorization: Arc::clone(&deps.authorization),
        }
    }

    /// Programs proving that `signers` authored `block`.
    ///
    /// An empty program set is an error even when the builder reported none.
    pub async fn authorize(&self, block: &Block, signers: &[PublicKey]) -> Result<Vec<Program>> {
        let data = block.signable_bytes();
        let mut signed = Vec::with_capacity(signers.len());

        for signer in signers {
            let account = self
                .keystore
                .signing_account(signer)
                .await
                .map_err(|e| SoloError::Authorization(format!("signing account: {e}")))?;

            let signature = self
                .keystore
                .sign(&data, &account)
                .await
                .map_err(|e| SoloError::Authorization(format!("sign: {e}")))?;

            let contract = self
                .authorization
                .signature_contract(signer)
                .map_err(|e| SoloError::Authorization(format!("signature contract: {e}")))?;

            signed.push(SignedContract {
                contract,
                signer: *signer,
                signature,
            });
        }

        let programs = self
            .authorization
            .build_programs(signed)
            .map_err(|e| SoloError::Authorization(format!("build programs: {e}")))?;

        if programs.is_empty() {
            return Err(SoloError::EmptyAuthorization);
        }

        debug!(
            "[solo] Authorized block #{} with {} program(s)",
            block.header.height,
            programs.len()
        );
        Ok(programs)
    }

    /// Attach `programs` to `block`.
    pub fn install(block: &mut Block, programs: Vec<Program>) {
        block.set_programs(programs);
    }
}
