//! # Application Module
//!
//! The service that drives the domain through the outbound ports.

pub mod service;

pub use service::AssetProtocolService;
