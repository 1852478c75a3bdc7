//! # Value Objects
//!
//! Protocol constants and the typed boundary for client-supplied numbers.

use serde::{Deserialize, Serialize};

/// Base units per whole protocol-currency token.
pub const UNIT: u64 = 100_000_000;

/// Largest quantity the ledger can represent (signed 64-bit ceiling).
///
/// Bounds the total supply of any asset, send quantities and card series.
pub const MAX_INT: u64 = i64::MAX as u64;

/// Host-chain currency. Moves through native outputs, never through messages.
pub const BTC: &str = "BTC";

/// Protocol currency. Pays issuance fees.
pub const XCP: &str = "XCP";

/// Asset names that can never be issued.
pub const RESERVED_ASSETS: [&str; 2] = [BTC, XCP];

/// Description that turns a reissuance into a lock.
pub const LOCK_DESCRIPTION: &str = "lock";

/// Decimal places kept when widening a wire `f32` card number.
pub const CARD_NUMBER_PRECISION: i32 = 6;

/// Returns true when `asset` is one of the two base currencies.
pub fn is_reserved_asset(asset: &str) -> bool {
    RESERVED_ASSETS.contains(&asset)
}

/// Returns true when `description` requests a lock (case-insensitive).
pub fn is_lock_description(description: &str) -> bool {
    description.eq_ignore_ascii_case(LOCK_DESCRIPTION)
}

/// Rounds a card number to [`CARD_NUMBER_PRECISION`] decimal places.
///
/// Exact ties go to the even neighbour. An f32 such as `1.0 / 128.0`
/// widens exactly, so ties do occur on the wire.
pub fn round_card_number(value: f64) -> f64 {
    let scale = 10f64.powi(CARD_NUMBER_PRECISION);
    let scaled = value * scale;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / scale
}

/// A loosely typed number handed in by a client.
///
/// Clients built on dynamic languages routinely send `15` where `15.0` was
/// meant (and the other way around). The validators see exactly which
/// representation arrived so that integer-only fields can reject floats and
/// float fields can accept integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClientNumber {
    Integer(i128),
    Float(f64),
}

impl ClientNumber {
    /// The integer value, if the number arrived as an integer.
    pub fn as_integer(self) -> Option<i128> {
        match self {
            ClientNumber::Integer(value) => Some(value),
            ClientNumber::Float(_) => None,
        }
    }

    /// Coerces to floating form. Integers convert exactly for every value
    /// below 2^53, which covers every card number the wire can carry.
    pub fn to_float(self) -> f64 {
        match self {
            ClientNumber::Integer(value) => value as f64,
            ClientNumber::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            ClientNumber::Integer(value) => value == 0,
            ClientNumber::Float(value) => value == 0.0,
        }
    }
}

impl From<u64> for ClientNumber {
    fn from(value: u64) -> Self {
        ClientNumber::Integer(i128::from(value))
    }
}

impl From<u32> for ClientNumber {
    fn from(value: u32) -> Self {
        ClientNumber::Integer(i128::from(value))
    }
}

impl From<i64> for ClientNumber {
    fn from(value: i64) -> Self {
        ClientNumber::Integer(i128::from(value))
    }
}

impl From<f64> for ClientNumber {
    fn from(value: f64) -> Self {
        ClientNumber::Float(value)
    }
}
