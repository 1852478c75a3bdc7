//! # Message Envelope
//!
//! Every protocol message embedded in a host-chain transaction is
//!
//! ```text
//! ┌──────────────┬──────────────────┬─────────────────────┐
//! │ prefix (8 B) │ type id (u32 BE) │ body (layout-fixed) │
//! └──────────────┴──────────────────┴─────────────────────┘
//! ```
//!
//! and the whole envelope must fit in [`MAX_ENVELOPE_SIZE`] bytes.

use crate::domain::CodecError;

/// Prefix marking host-chain data as a protocol message.
pub const DEFAULT_PREFIX: &[u8] = b"CNTRPRTY";

/// Width of the big-endian message type id.
pub const TYPE_ID_LEN: usize = 4;

/// Largest envelope a data output can carry.
pub const MAX_ENVELOPE_SIZE: usize = 80;

/// Message kinds handled by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Send,
    Issuance,
}

impl MessageType {
    pub const fn id(self) -> u32 {
        match self {
            MessageType::Send => 0,
            MessageType::Issuance => 20,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(MessageType::Send),
            20 => Some(MessageType::Issuance),
            _ => None,
        }
    }
}

/// Wraps `body` into an envelope, enforcing `max_size`.
pub fn encode_envelope(
    prefix: &[u8],
    message_type: MessageType,
    body: &[u8],
    max_size: usize,
) -> Result<Vec<u8>, CodecError> {
    let size = prefix.len() + TYPE_ID_LEN + body.len();
    if size > max_size {
        return Err(CodecError::PayloadTooLarge {
            size,
            max: max_size,
        });
    }

    let mut data = Vec::with_capacity(size);
    data.extend_from_slice(prefix);
    data.extend_from_slice(&message_type.id().to_be_bytes());
    data.extend_from_slice(body);
    Ok(data)
}

/// Splits an envelope into its raw type id and body.
///
/// The type id is returned raw so that callers can tell an unknown message
/// kind apart from data that is not a protocol message at all.
pub fn decode_envelope<'a>(prefix: &[u8], data: &'a [u8]) -> Result<(u32, &'a [u8]), CodecError> {
    let rest = data.strip_prefix(prefix).ok_or(CodecError::MissingPrefix)?;
    if rest.len() < TYPE_ID_LEN {
        return Err(CodecError::TruncatedEnvelope { len: data.len() });
    }
    let (id_bytes, body) = rest.split_at(TYPE_ID_LEN);
    let mut id = [0u8; TYPE_ID_LEN];
    id.copy_from_slice(id_bytes);
    Ok((u32::from_be_bytes(id), body))
}
