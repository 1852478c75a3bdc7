//! # Protocol Configuration
//!
//! Network selection and envelope framing for the protocol service.

use std::env;

use serde::{Deserialize, Serialize};
use shared_types::Network;

use crate::codec::{DEFAULT_PREFIX, MAX_ENVELOPE_SIZE};

/// Protocol service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Network whose consensus schedule applies.
    pub network: Network,

    /// Bytes every protocol message starts with.
    pub prefix: Vec<u8>,

    /// Largest envelope compose may produce.
    pub max_payload_size: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            prefix: DEFAULT_PREFIX.to_vec(),
            max_payload_size: MAX_ENVELOPE_SIZE,
        }
    }
}

impl ProtocolConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AP_NETWORK`: `mainnet` or `testnet` (default: mainnet)
    /// - `AP_PREFIX`: ASCII message prefix (default: CNTRPRTY)
    ///
    /// Unparseable or empty values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            network: env::var("AP_NETWORK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.network),

            prefix: env::var("AP_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .map(String::into_bytes)
                .unwrap_or(defaults.prefix),

            max_payload_size: defaults.max_payload_size,
        }
    }

    /// Config for a test network with the default framing.
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            ..Self::default()
        }
    }
}
