//! # Shared Types Crate
//!
//! Primitives shared across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the host-chain transaction record and the
//!   identifiers it carries are defined once, here.
//! - **Opaque host-chain data**: addresses are carried as the host chain
//!   renders them; this crate never parses or validates key material.

pub mod entities;

pub use entities::*;
