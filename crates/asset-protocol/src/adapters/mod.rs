//! # Adapters Layer
//!
//! In-memory implementations of the outbound ports.

pub mod asset_registry;
pub mod chain_context;
pub mod memory_ledger;

pub use asset_registry::{InMemoryAssetRegistry, BTC_ID, XCP_ID};
pub use chain_context::FixedChainContext;
pub use memory_ledger::{InMemoryLedger, JournalAction, JournalEntry};
