//! Local Ed25519 keystore

use crate::error::{Result, SoloError};
use crate::ports::{Account, Keystore};
use async_trait::async_trait;
use shared_crypto::{create_signature_contract, Ed25519KeyPair};
use shared_types::{PublicKey, Signature};
use std::collections::HashMap;

/// Keystore holding Ed25519 keys in process memory.
///
/// The first key is the default (producer) identity.
#[derive(Debug)]
pub struct LocalKeystore {
    default_identity: PublicKey,
    keys: HashMap<PublicKey, Ed25519KeyPair>,
}

impl LocalKeystore {
    /// Keystore whose default identity is `keypair`
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        let default_identity = keypair.public_key();
        let mut keys = HashMap::new();
        keys.insert(default_identity, keypair);
        Self {
            default_identity,
            keys,
        }
    }

    /// Keystore with a freshly generated identity
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate())
    }

    /// Add a non-default signing key
    pub fn insert(&mut self, keypair: Ed25519KeyPair) -> PublicKey {
        let public_key = keypair.public_key();
        self.keys.insert(public_key, keypair);
        public_key
    }

    /// Public key of the default identity
    pub fn identity(&self) -> PublicKey {
        self.default_identity
    }

    fn keypair(&self, public_key: &PublicKey) -> Result<&Ed25519KeyPair> {
        self.keys.get(public_key).ok_or_else(|| {
            SoloError::Keystore(format!("no key for {}", hex::encode(public_key)))
        })
    }
}

#[async_trait]
impl Keystore for LocalKeystore {
    async fn default_identity(&self) -> Result<PublicKey> {
        Ok(self.default_identity)
    }

    async fn signing_account(&self, public_key: &PublicKey) -> Result<Account> {
        self.keypair(public_key)?;
        Ok(Account {
            public_key: *public_key,
            program_hash: create_signature_contract(public_key).program_hash,
        })
    }

    async fn sign(&self, data: &[u8], account: &Account) -> Result<Signature> {
        Ok(self.keypair(&account.public_key)?.sign(data))
    }
}
