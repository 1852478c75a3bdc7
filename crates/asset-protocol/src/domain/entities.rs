//! # Domain Entities
//!
//! Ledger records, their status, and the request/response shapes of the
//! compose path.
//!
//! Records are append-only: one is written for every parsed transaction,
//! valid or not, and none is ever updated.

use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockHeight, TxHash};
use std::fmt;

use super::value_objects::ClientNumber;

/// Outcome of a parsed message, stored on its record.
///
/// Rendered as `"valid"` or `"invalid: <reason>[; <reason>...]"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Status {
    Valid,
    Invalid(String),
}

impl Status {
    /// Status reported when the message body could not be decoded.
    pub fn could_not_unpack() -> Self {
        Status::Invalid("could not unpack".to_string())
    }

    /// Joins independent problems into one status, or `Valid` if none.
    pub fn from_problems<P: fmt::Display>(problems: &[P]) -> Self {
        if problems.is_empty() {
            return Status::Valid;
        }
        let reasons: Vec<String> = problems.iter().map(ToString::to_string).collect();
        Status::Invalid(reasons.join("; "))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Status::Valid)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Valid => f.write_str("valid"),
            Status::Invalid(reason) => write!(f, "invalid: {}", reason),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.to_string()
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.strip_prefix("invalid: ") {
            Some(reason) => Status::Invalid(reason.to_string()),
            None if value == "valid" => Status::Valid,
            None => Status::Invalid(value),
        }
    }
}

/// One row of the issuance history.
///
/// Payload fields are `None` only when the message could not be unpacked.
/// Field order matches the `issuances` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuanceRecord {
    pub tx_index: u64,
    pub tx_hash: TxHash,
    pub block_index: BlockHeight,
    pub asset: Option<String>,
    pub quantity: Option<u64>,
    pub divisible: Option<bool>,
    pub source: Address,
    pub issuer: Address,
    pub transfer: bool,
    pub card_image: Option<bool>,
    pub card_series: Option<u64>,
    pub card_number: Option<f64>,
    pub description: Option<String>,
    pub fee_paid: u64,
    pub locked: bool,
    pub status: Status,
}

/// One row of the send history. Field order matches the `sends` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRecord {
    pub tx_index: u64,
    pub tx_hash: TxHash,
    pub block_index: BlockHeight,
    pub source: Address,
    pub destination: Option<Address>,
    pub asset: Option<String>,
    pub quantity: Option<u64>,
    pub status: Status,
}

/// Any record the processor appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "table")]
pub enum LedgerRecord {
    #[serde(rename = "issuances")]
    Issuance(IssuanceRecord),
    #[serde(rename = "sends")]
    Send(SendRecord),
}

impl LedgerRecord {
    pub fn tx_index(&self) -> u64 {
        match self {
            LedgerRecord::Issuance(record) => record.tx_index,
            LedgerRecord::Send(record) => record.tx_index,
        }
    }

    pub fn status(&self) -> &Status {
        match self {
            LedgerRecord::Issuance(record) => &record.status,
            LedgerRecord::Send(record) => &record.status,
        }
    }
}

/// Result of handing one transaction to the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Issuance(IssuanceRecord),
    Send(SendRecord),
    /// Data without the protocol prefix, or with an unknown message type.
    Unrecognized,
}

/// Client request to build an issuance message.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuanceRequest {
    pub source: Address,
    pub transfer_destination: Option<Address>,
    pub asset: String,
    pub quantity: ClientNumber,
    pub divisible: bool,
    pub card_image: bool,
    pub card_series: Option<ClientNumber>,
    pub card_number: Option<ClientNumber>,
    pub description: String,
}

impl IssuanceRequest {
    /// A plain issuance with no card fields, description or transfer.
    pub fn new(source: Address, asset: impl Into<String>, quantity: u64, divisible: bool) -> Self {
        Self {
            source,
            transfer_destination: None,
            asset: asset.into(),
            quantity: ClientNumber::from(quantity),
            divisible,
            card_image: false,
            card_series: None,
            card_number: None,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_transfer(mut self, destination: Address) -> Self {
        self.transfer_destination = Some(destination);
        self
    }

    pub fn with_card(mut self, series: ClientNumber, number: ClientNumber) -> Self {
        self.card_image = true;
        self.card_series = Some(series);
        self.card_number = Some(number);
        self
    }
}

/// Client request to build a send message.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub source: Address,
    pub destination: Address,
    pub asset: String,
    pub quantity: ClientNumber,
    /// Balance the client believes the source holds; encoded when present.
    pub published_balance: Option<u64>,
}

impl SendRequest {
    pub fn new(source: Address, destination: Address, asset: impl Into<String>, quantity: u64) -> Self {
        Self {
            source,
            destination,
            asset: asset.into(),
            quantity: ClientNumber::from(quantity),
            published_balance: None,
        }
    }

    pub fn with_published_balance(mut self, balance: u64) -> Self {
        self.published_balance = Some(balance);
        self
    }
}

/// What the transaction builder needs to broadcast a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedTransaction {
    pub source: Address,
    /// Outputs as `(address, amount)`; `None` means the dust default.
    pub outputs: Vec<(Address, Option<u64>)>,
    /// Envelope bytes, or `None` for a plain host-chain transfer.
    pub data: Option<Vec<u8>>,
}
