//! # Canonical Encoding
//!
//! Byte layout used for hashing and signing ledger entities. Integers are
//! little-endian, variable-length fields carry a compact length prefix:
//!
//! | Length            | Prefix                 |
//! |-------------------|------------------------|
//! | `< 0xFD`          | 1 byte                 |
//! | `<= u16::MAX`     | `0xFD` + 2 bytes       |
//! | `<= u32::MAX`     | `0xFE` + 4 bytes       |
//! | otherwise         | `0xFF` + 8 bytes       |

use crate::entities::Hash;
use sha2::{Digest, Sha256};

/// Data that can be signed: exposes the bytes a signature commits to.
pub trait SignableData {
    /// Unsigned encoding (authorization programs excluded).
    fn signable_bytes(&self) -> Vec<u8>;
}

/// Append a compact variable-length unsigned integer.
pub fn write_var_uint(out: &mut Vec<u8>, value: u64) {
    if value < 0xFD {
        out.push(value as u8);
    } else if value <= u16::MAX as u64 {
        out.push(0xFD);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= u32::MAX as u64 {
        out.push(0xFE);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xFF);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Append a length-prefixed byte string.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_var_uint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// Double SHA-256, the content hash of every ledger entity.
pub fn sha256d(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}
