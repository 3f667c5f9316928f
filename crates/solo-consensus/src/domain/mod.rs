//! Domain layer - pure block construction logic
//!
//! Nothing here performs I/O; the service layer gathers collaborator data
//! and feeds it through these functions.
//!
//! - [`bookkeeping`]: per-block bookkeeping transaction and its nonce
//! - [`header`]: transaction sequencing and header construction

pub mod bookkeeping;
pub mod header;

pub use bookkeeping::{
    create_bookkeeping_transaction, generate_nonce, BOOKKEEPING_PAYLOAD_VERSION,
};
pub use header::{build_header, build_transaction_sequence, unix_timestamp, ChainTip};
