//! # Send Layouts
//!
//! ```text
//! short (16 B): asset_id u64 | quantity u64
//! long  (24 B): asset_id u64 | quantity u64 | published_balance u64
//! ```

use crate::domain::CodecError;

use super::read_u64;

pub const SHORT_SEND_LEN: usize = 8 + 8;
pub const LONG_SEND_LEN: usize = 8 + 8 + 8;

/// Decoded send body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendMessage {
    pub asset_id: u64,
    pub quantity: u64,
    /// Source balance asserted by the client, present in the long layout.
    pub published_balance: Option<u64>,
}

impl SendMessage {
    pub fn decode(body: &[u8]) -> Result<Self, CodecError> {
        let published_balance = match body.len() {
            SHORT_SEND_LEN => None,
            LONG_SEND_LEN => Some(read_u64(body, 16)),
            actual => {
                return Err(CodecError::LengthMismatch {
                    expected: SHORT_SEND_LEN,
                    actual,
                })
            }
        };
        Ok(Self {
            asset_id: read_u64(body, 0),
            quantity: read_u64(body, 8),
            published_balance,
        })
    }

    /// Encodes the long layout when a published balance is present.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(LONG_SEND_LEN);
        body.extend_from_slice(&self.asset_id.to_be_bytes());
        body.extend_from_slice(&self.quantity.to_be_bytes());
        if let Some(balance) = self.published_balance {
            body.extend_from_slice(&balance.to_be_bytes());
        }
        body
    }
}
