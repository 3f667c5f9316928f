//! # Solo Consensus - Single-Authority Block Production
//!
//! **Bounded Context:** Block Production (solo mode)
//! **Architecture Compliance:** Hexagonal + EDA + TDD
//!
//! ## Purpose
//!
//! One trusted producer periodically turns pending transactions into signed
//! blocks and appends them to the ledger. There is no voting, no peer
//! communication and no fork choice: every block is final on commit.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - In-memory ledger, mempool, keystore              │
//! │  - Merkle roots and contract-based authorization    │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: ConsensusService                        │
//! │  - Outbound: Keystore, LedgerStore, Mempool,        │
//! │    RootComputer, AuthorizationBuilder               │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Service                                            │
//! │  - Scheduler (fixed interval, skipped ticks)        │
//! │  - BlockAssembler, BlockAuthorizer, SoloProducer    │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - Bookkeeping transaction, header construction     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Sequential heights**: a committed block sits at tip height + 1 and
//!    names the tip as its parent
//! 2. **Bookkeeping first**: every block starts with exactly one locally
//!    created bookkeeping transaction
//! 3. **Authorized commits**: no block reaches the ledger without programs
//! 4. **No overlap**: at most one production attempt runs at a time
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use solo_consensus::adapters::InMemoryCollaborators;
//! use solo_consensus::{ConsensusService, SoloConfig, SoloService};
//!
//! let collaborators = InMemoryCollaborators::generate();
//! let service = SoloService::new(SoloConfig::default(), collaborators.dependencies())?;
//! service.start().await?;
//! // ...
//! service.halt().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Collaborator implementations
pub mod adapters;
/// Pure production logic
pub mod domain;
/// Structured production events
pub mod events;
pub mod ports;
pub mod service;

mod config;
mod error;
mod metrics;

pub use config::{SoloConfig, GEN_BLOCK_TIME_ENV};
pub use error::{Result, SoloError};
pub use metrics::Metrics;

pub use ports::{
    Account, AuthorizationBuilder, ConsensusService, Keystore, LedgerStore, Mempool,
    ProducerState, ProducerStatus, RootComputer, SignedContract,
};

pub use events::BlockProducedEvent;

pub use service::{
    AssembledBlock, BlockAssembler, BlockAuthorizer, SoloDependencies, SoloProducer, SoloService,
};

use std::time::Duration;

/// Header version written into every produced block
pub const CONTEXT_VERSION: u32 = 0;

/// Default interval between production attempts
pub const DEFAULT_GEN_BLOCK_TIME: Duration = Duration::from_secs(6);
