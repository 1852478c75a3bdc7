//! # Domain Errors
//!
//! Error types for the protocol engine.
//!
//! Message-level problems on the parse path are never errors; they end up in
//! the record status. The types here cover codec failures, ledger faults and
//! the compose path, where every problem is returned to the caller.

use shared_types::Address;
use thiserror::Error;

use super::problems::{IssuanceProblem, SendProblem};

/// Failures while encoding or decoding a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Body length does not match the layout being decoded.
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Data does not start with the protocol prefix.
    #[error("Missing protocol prefix")]
    MissingPrefix,

    /// Data ends inside the message type id.
    #[error("Truncated envelope: {len} bytes")]
    TruncatedEnvelope { len: usize },

    /// Description does not fit the pascal-string slot.
    #[error("Description is {len} bytes, max {max}")]
    DescriptionTooLong { len: usize, max: usize },

    /// Encoded envelope exceeds the data-output budget.
    #[error("Payload is {size} bytes, max {max}")]
    PayloadTooLarge { size: usize, max: usize },
}

/// Failures reported by a ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A debit would take the balance below zero.
    #[error("Insufficient funds: {address} holds {available} {asset}, required {required}")]
    InsufficientFunds {
        address: Address,
        asset: String,
        required: u64,
        available: u64,
    },

    /// A credit would overflow the balance.
    #[error("Balance overflow: {address} {asset}")]
    BalanceOverflow { address: Address, asset: String },

    /// Backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Failures of the asset id/name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Unknown asset id: {0}")]
    UnknownAsset(u64),

    #[error("Unknown asset name: {0}")]
    UnknownName(String),

    #[error("Asset {name} already registered with id {id}")]
    AlreadyRegistered { name: String, id: u64 },
}

/// Failures while building an outgoing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("Invalid issuance: {}", join(.0))]
    Issuance(Vec<IssuanceProblem>),

    #[error("Invalid send: {}", join(.0))]
    Send(Vec<SendProblem>),

    /// A validated value does not fit its wire field.
    #[error("Field {field} out of range for wire encoding")]
    FieldOutOfRange { field: &'static str },

    /// The active layout cannot carry a requested field.
    #[error("Layout cannot carry field {field}")]
    UnsupportedField { field: &'static str },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Infrastructure faults on the parse path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

fn join<P: std::fmt::Display>(problems: &[P]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
