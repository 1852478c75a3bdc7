//! # In-Memory Asset Registry
//!
//! Bidirectional id/name map. The two base currencies are always present
//! under their fixed ids.

use std::collections::HashMap;

use crate::domain::{AssetError, BTC, XCP};
use crate::ports::AssetRegistry;

/// Fixed id of the host-chain currency.
pub const BTC_ID: u64 = 0;

/// Fixed id of the protocol currency.
pub const XCP_ID: u64 = 1;

#[derive(Debug, Clone)]
pub struct InMemoryAssetRegistry {
    by_id: HashMap<u64, String>,
    by_name: HashMap<String, u64>,
}

impl InMemoryAssetRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        };
        registry.insert(BTC_ID, BTC);
        registry.insert(XCP_ID, XCP);
        registry
    }

    /// Maps `name` to `id`. Both sides must be unused.
    pub fn register(&mut self, id: u64, name: &str) -> Result<(), AssetError> {
        if let Some(existing) = self.by_name.get(name) {
            return Err(AssetError::AlreadyRegistered {
                name: name.to_string(),
                id: *existing,
            });
        }
        if let Some(existing) = self.by_id.get(&id) {
            return Err(AssetError::AlreadyRegistered {
                name: existing.clone(),
                id,
            });
        }
        self.insert(id, name);
        Ok(())
    }

    /// Builder form of [`register`](Self::register) for fixtures.
    pub fn with_asset(mut self, id: u64, name: &str) -> Result<Self, AssetError> {
        self.register(id, name)?;
        Ok(self)
    }

    fn insert(&mut self, id: u64, name: &str) {
        self.by_id.insert(id, name.to_string());
        self.by_name.insert(name.to_string(), id);
    }
}

impl Default for InMemoryAssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn asset_id(&self, name: &str) -> Result<u64, AssetError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::UnknownName(name.to_string()))
    }

    fn asset_name(&self, id: u64) -> Result<String, AssetError> {
        self.by_id
            .get(&id)
            .cloned()
            .ok_or(AssetError::UnknownAsset(id))
    }
}
