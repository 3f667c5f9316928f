//! # Shared Types Crate
//!
//! This crate contains the ledger entities exchanged between the solo block
//! producer and its collaborators (ledger store, mempool, keystore).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Blocks, headers, transactions and programs
//!   are defined once here.
//! - **Canonical Encoding**: Hashes and signatures are always computed over
//!   the unsigned encoding produced by [`codec`], never over a serde format.

pub mod codec;
pub mod entities;

pub use codec::SignableData;
pub use entities::*;
