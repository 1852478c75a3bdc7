//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the protocol engine.

use shared_types::{Address, BlockHeight, Network, TxHash};

use crate::domain::{AssetError, IssuanceRecord, LedgerError, LedgerRecord};

/// Balances and message history.
///
/// `append` is the only way records are written; `credit`, `debit` and
/// `transfer` are the only way balances change. Calls are synchronous and
/// never interleave for one transaction.
pub trait AssetLedger {
    /// Valid issuance records for `asset`, oldest first (`tx_index` ascending).
    fn valid_issuances(&self, asset: &str) -> Result<Vec<IssuanceRecord>, LedgerError>;

    /// Current balance of `address` in `asset`; zero when never credited.
    fn balance(&self, address: &Address, asset: &str) -> Result<u64, LedgerError>;

    /// Adds `quantity` to a balance.
    fn credit(
        &mut self,
        block_index: BlockHeight,
        address: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) -> Result<(), LedgerError>;

    /// Removes `quantity` from a balance.
    ///
    /// Fails with [`LedgerError::InsufficientFunds`] without touching the
    /// balance when it holds less than `quantity`.
    fn debit(
        &mut self,
        block_index: BlockHeight,
        address: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) -> Result<(), LedgerError>;

    /// Moves `quantity` between two balances: both legs apply or neither.
    ///
    /// The default debits first and restores the source if the credit
    /// fails. Stores with native transactions should override it.
    fn transfer(
        &mut self,
        block_index: BlockHeight,
        from: &Address,
        to: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) -> Result<(), LedgerError> {
        self.debit(block_index, from, asset, quantity, event)?;
        if let Err(err) = self.credit(block_index, to, asset, quantity, event) {
            self.credit(block_index, from, asset, quantity, event)?;
            return Err(err);
        }
        Ok(())
    }

    /// Fails exactly when [`append`](Self::append) would refuse `record`.
    ///
    /// The processor calls this before the first balance change of a
    /// transaction, so a refused record leaves balances untouched.
    fn check_append(&self, record: &LedgerRecord) -> Result<(), LedgerError>;

    /// Appends a record. Records are never updated or removed.
    fn append(&mut self, record: LedgerRecord) -> Result<(), LedgerError>;
}

/// Mapping between numeric asset ids and display names.
pub trait AssetRegistry {
    fn asset_id(&self, name: &str) -> Result<u64, AssetError>;

    /// Fails with [`AssetError::UnknownAsset`] for unmapped ids.
    fn asset_name(&self, id: u64) -> Result<String, AssetError>;
}

/// Host-chain view used when composing new messages.
pub trait ChainContext {
    /// Height of the last confirmed block.
    fn current_height(&self) -> BlockHeight;

    fn network(&self) -> Network;
}
