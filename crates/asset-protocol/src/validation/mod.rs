//! # Validators
//!
//! Consensus rule sets per message kind. Validators read the ledger but
//! never write it; the processor applies their outcome.

pub mod issuance;
pub mod send;

pub use issuance::{validate_issuance, IssuanceDraft, IssuanceValidation};
pub use send::{validate_send, SendDraft};
