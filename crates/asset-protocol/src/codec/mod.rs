//! # Message Codec
//!
//! Fixed-layout binary encodings for the envelope and the two message
//! kinds. Decoding is total: every malformed input maps to a
//! [`CodecError`](crate::domain::CodecError), never a panic.

pub mod envelope;
pub mod issuance;
pub mod send;

pub use envelope::*;
pub use issuance::*;
pub use send::*;

/// Reads a big-endian u64 at `offset`. Callers check the body length first.
pub(crate) fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_be_bytes(buf)
}

/// Reads a big-endian u32 at `offset`. Callers check the body length first.
pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(buf)
}
