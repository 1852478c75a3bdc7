//! # Integration Flows
//!
//! Scenarios that span many transactions against a single ledger.

mod flows;
