//! # Asset Protocol
//!
//! Message codec and consensus validation for a token-issuance protocol
//! embedded in host-chain transactions.
//!
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! Decodes fixed-layout issuance and send messages, decides whether each is
//! valid against the current ledger state, applies the resulting balance
//! changes and appends one record per transaction. Every node must reach
//! byte-identical decisions, so all height-dependent behaviour is read from
//! a single rule table.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Balances never go negative | `AssetLedger::debit`, `validate_send` |
//! | Total supply per asset ≤ `MAX_INT` | `validate_issuance` step 7 |
//! | Locked assets stay locked | `validate_issuance`, `AssetProtocolService` |
//! | `divisible`/`card_image` fixed by first issuance | `validate_issuance` step 5 |
//! | One record per parsed transaction | `AssetProtocolService::parse_*` |
//!
//! ## Message Flow
//!
//! ```text
//! TransactionRecord ──envelope──→ issuance / send body
//!        │                               │ decode (codec)
//!        │                               ↓
//!        │                     validate (validation) ←── RuleVariant (domain::rules)
//!        │                               │
//!        └──────────────→ apply + append (application) ──→ AssetLedger
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! asset-protocol/
//! ├── domain/       # Records, constants, rule table, problems, errors
//! ├── codec/        # Envelope and message layouts
//! ├── validation/   # Issuance and send rule sets
//! ├── ports/        # AssetProtocolApi (inbound), ledger/registry/chain (outbound)
//! ├── adapters/     # In-memory ledger, registry, fixed chain context
//! ├── application/  # AssetProtocolService
//! └── config.rs     # ProtocolConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;
pub mod validation;

// Re-exports
pub use adapters::{FixedChainContext, InMemoryAssetRegistry, InMemoryLedger, BTC_ID, XCP_ID};
pub use application::AssetProtocolService;
pub use config::ProtocolConfig;
pub use domain::{
    rule_variant, AssetError, ClientNumber, CodecError, ComposeError, ComposedTransaction,
    IssuanceProblem, IssuanceRecord, IssuanceRequest, LedgerError, LedgerRecord, ParseOutcome,
    ProtocolError, RuleVariant, SendProblem, SendRecord, SendRequest, Status, MAX_INT, UNIT,
};
pub use ports::{AssetLedger, AssetProtocolApi, AssetRegistry, ChainContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
