//! # Ports Layer
//!
//! Hexagonal architecture ports (interfaces) for the protocol engine.
//!
//! - **Driving Ports (Inbound)**: parse and compose entry points consumed by
//!   the host-chain scanner and the transaction builder.
//! - **Driven Ports (Outbound)**: ledger store, asset registry and chain
//!   context implemented by adapters.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
