//! # Core Domain Entities
//!
//! Host-chain entities consumed by the protocol engine.
//!
//! ## Clusters
//!
//! - **Chain**: `Hash`, `TxHash`, `BlockHeight`, `TransactionRecord`
//! - **Identity**: `Address`
//! - **Network**: `Network`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A 32-byte hash.
pub type Hash = [u8; 32];

/// Height of a block in the host chain.
pub type BlockHeight = u64;

/// Transaction hash, rendered and serialized as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TxHash(#[serde(with = "hex::serde")] pub Hash);

impl TxHash {
    pub fn new(bytes: Hash) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are enough to tell hashes apart in logs.
        write!(f, "TxHash({}..)", hex::encode(&self.0[..8]))
    }
}

impl From<Hash> for TxHash {
    fn from(bytes: Hash) -> Self {
        Self(bytes)
    }
}

impl FromStr for TxHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// A transaction as extracted by the host-chain scanner.
///
/// Transactions are handed to the engine one at a time, in the order they
/// were confirmed: ascending `tx_index` within a block, blocks by height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Global, strictly increasing position of the transaction.
    pub tx_index: u64,
    /// Host-chain transaction hash.
    pub tx_hash: TxHash,
    /// Height of the block that confirmed the transaction.
    pub block_index: BlockHeight,
    /// Address that funded the transaction.
    pub source: Address,
    /// First non-data output, if any.
    pub destination: Option<Address>,
    /// Embedded protocol data (prefix, message type and body).
    pub data: Vec<u8>,
}

// =============================================================================
// CLUSTER B: IDENTITY
// =============================================================================

/// A host-chain address in its canonical textual form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Self(address)
    }
}

// =============================================================================
// CLUSTER C: NETWORK
// =============================================================================

/// Which host network the engine is following.
///
/// Test networks always run the newest protocol rules regardless of height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn is_test_network(self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Unrecognized network name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}
