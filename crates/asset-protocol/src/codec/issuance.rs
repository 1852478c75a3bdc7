//! # Issuance Layouts
//!
//! ```text
//! short (17 B): asset_id u64 | quantity u64 | divisible u8
//! long  (68 B): asset_id u64 | quantity u64 | divisible u8 | card_image u8
//!               | card_series u32 | card_number f32 | description pascal[42]
//! ```
//!
//! All integers are big-endian. The description slot holds a length byte
//! followed by up to 41 content bytes, zero padded.

use crate::domain::{round_card_number, CodecError};

use super::{read_u32, read_u64};

pub const SHORT_ISSUANCE_LEN: usize = 8 + 8 + 1;
pub const LONG_ISSUANCE_LEN: usize = 8 + 8 + 1 + 1 + 4 + 4 + DESCRIPTION_SLOT_LEN;

/// Total width of the pascal-string description slot.
pub const DESCRIPTION_SLOT_LEN: usize = 42;

/// Longest description that fits the slot.
pub const MAX_DESCRIPTION_LEN: usize = DESCRIPTION_SLOT_LEN - 1;

/// Wire layout of an issuance body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceLayout {
    Short,
    Long,
}

/// Decoded issuance body.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuanceMessage {
    pub asset_id: u64,
    pub quantity: u64,
    pub divisible: bool,
    pub card_image: bool,
    pub card_series: u32,
    pub card_number: f64,
    pub description: String,
}

impl IssuanceMessage {
    /// Decodes an issuance body.
    ///
    /// The long layout is used only when `long_layout_active` and the body is
    /// exactly [`LONG_ISSUANCE_LEN`] bytes; anything else must be a short
    /// body. Card fields of a short body decode as zero and the description
    /// as empty.
    pub fn decode(body: &[u8], long_layout_active: bool) -> Result<Self, CodecError> {
        if long_layout_active && body.len() == LONG_ISSUANCE_LEN {
            return Ok(Self::decode_long(body));
        }
        if body.len() != SHORT_ISSUANCE_LEN {
            return Err(CodecError::LengthMismatch {
                expected: SHORT_ISSUANCE_LEN,
                actual: body.len(),
            });
        }
        Ok(Self {
            asset_id: read_u64(body, 0),
            quantity: read_u64(body, 8),
            divisible: body[16] != 0,
            card_image: false,
            card_series: 0,
            card_number: 0.0,
            description: String::new(),
        })
    }

    fn decode_long(body: &[u8]) -> Self {
        let card_number = f32::from_bits(read_u32(body, 22));
        let slot = &body[26..26 + DESCRIPTION_SLOT_LEN];
        let len = usize::from(slot[0]).min(MAX_DESCRIPTION_LEN);
        let description = std::str::from_utf8(&slot[1..1 + len])
            .map(str::to_owned)
            .unwrap_or_default();

        Self {
            asset_id: read_u64(body, 0),
            quantity: read_u64(body, 8),
            divisible: body[16] != 0,
            card_image: body[17] != 0,
            card_series: read_u32(body, 18),
            card_number: round_card_number(f64::from(card_number)),
            description,
        }
    }

    /// Encodes this message with `layout`.
    ///
    /// The short layout drops card fields and description; callers decide
    /// whether that is acceptable before choosing it.
    pub fn encode(&self, layout: IssuanceLayout) -> Result<Vec<u8>, CodecError> {
        let mut body = Vec::with_capacity(LONG_ISSUANCE_LEN);
        body.extend_from_slice(&self.asset_id.to_be_bytes());
        body.extend_from_slice(&self.quantity.to_be_bytes());
        body.push(u8::from(self.divisible));
        if layout == IssuanceLayout::Short {
            return Ok(body);
        }

        let description = self.description.as_bytes();
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(CodecError::DescriptionTooLong {
                len: description.len(),
                max: MAX_DESCRIPTION_LEN,
            });
        }

        body.push(u8::from(self.card_image));
        body.extend_from_slice(&self.card_series.to_be_bytes());
        body.extend_from_slice(&(self.card_number as f32).to_be_bytes());
        // Length fits in a byte: checked against MAX_DESCRIPTION_LEN above.
        body.push(description.len() as u8);
        body.extend_from_slice(description);
        body.resize(LONG_ISSUANCE_LEN, 0);
        Ok(body)
    }
}
