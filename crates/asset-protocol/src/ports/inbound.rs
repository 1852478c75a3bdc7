//! # Inbound Ports (Driving Ports)
//!
//! Public API of the protocol engine.

use shared_types::TransactionRecord;

use crate::domain::{
    ComposeError, ComposedTransaction, IssuanceRecord, IssuanceRequest, ParseOutcome,
    ProtocolError, SendRecord, SendRequest,
};

/// Entry points for the host-chain scanner and the transaction builder.
///
/// Parse operations take `&mut self`: transactions must be applied one at a
/// time, in confirmation order, and the borrow checker enforces that no two
/// overlap.
pub trait AssetProtocolApi {
    /// Routes a transaction by its envelope and parses it.
    ///
    /// Returns [`ParseOutcome::Unrecognized`] for data that is not a
    /// protocol message; nothing is written in that case.
    fn parse_transaction(&mut self, tx: &TransactionRecord) -> Result<ParseOutcome, ProtocolError>;

    /// Parses an issuance body and appends exactly one issuance record.
    fn parse_issuance(
        &mut self,
        tx: &TransactionRecord,
        body: &[u8],
    ) -> Result<IssuanceRecord, ProtocolError>;

    /// Parses a send body and appends exactly one send record.
    fn parse_send(&mut self, tx: &TransactionRecord, body: &[u8]) -> Result<SendRecord, ProtocolError>;

    /// Builds an issuance message. Fails on any validation problem.
    fn compose_issuance(&self, request: &IssuanceRequest) -> Result<ComposedTransaction, ComposeError>;

    /// Builds a send message. Fails on any validation problem.
    fn compose_send(&self, request: &SendRequest) -> Result<ComposedTransaction, ComposeError>;
}
