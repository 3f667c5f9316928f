//! # Solo Node
//!
//! Runs a single-authority chain in one process.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Resolve the producer identity (`SOLO_KEY_SEED` or a fresh key)
//! 4. Start block production
//! 5. Halt on Ctrl+C, letting an in-flight block finish

use anyhow::{bail, Context, Result};
use shared_crypto::Ed25519KeyPair;
use solo_consensus::adapters::InMemoryCollaborators;
use solo_consensus::{ConsensusService, SoloConfig, SoloService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Hex-encoded 32-byte ed25519 seed for the producer identity
const KEY_SEED_ENV: &str = "SOLO_KEY_SEED";

fn load_identity() -> Result<Ed25519KeyPair> {
    let Ok(seed_hex) = std::env::var(KEY_SEED_ENV) else {
        warn!("{KEY_SEED_ENV} not set, generating an ephemeral producer key");
        return Ok(Ed25519KeyPair::generate());
    };

    let bytes = hex::decode(seed_hex.trim())
        .with_context(|| format!("{KEY_SEED_ENV} is not valid hex"))?;
    let Ok(seed) = <[u8; 32]>::try_from(bytes.as_slice()) else {
        bail!(
            "{KEY_SEED_ENV} must be 32 bytes (64 hex chars), got {}",
            bytes.len()
        );
    };
    info!("Loaded producer key from environment");
    Ok(Ed25519KeyPair::from_seed(seed))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    // Load configuration
    let config = SoloConfig::from_env().context("invalid solo configuration")?;
    let keypair = load_identity()?;
    info!("Producer identity: {}", hex::encode(keypair.public_key()));

    let collaborators = InMemoryCollaborators::new(keypair);
    let service = SoloService::new(config, collaborators.dependencies())
        .context("failed to create solo service")?;
    service.start().await?;

    // Keep the node running
    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    // Graceful shutdown
    service.halt().await?;
    let status = service.status();
    info!(
        "Shutdown complete. Height: {} | blocks produced: {} | pending txs: {}",
        collaborators.ledger.len().saturating_sub(1),
        status.blocks_produced,
        collaborators.mempool.len()
    );

    Ok(())
}
