//! # In-Memory Ledger
//!
//! Reference [`AssetLedger`] used by tests and by embedders without a
//! persistent store. Every balance change is journaled.

use std::collections::BTreeMap;

use shared_types::{Address, BlockHeight, TxHash};
use tracing::trace;

use crate::domain::{IssuanceRecord, LedgerError, LedgerRecord, SendRecord};
use crate::ports::AssetLedger;

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalAction {
    Credit,
    Debit,
}

/// One applied balance change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub block_index: BlockHeight,
    pub address: Address,
    pub asset: String,
    pub quantity: u64,
    pub action: JournalAction,
    pub event: TxHash,
}

/// Ledger state held in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<(Address, String), u64>,
    issuances: Vec<IssuanceRecord>,
    sends: Vec<SendRecord>,
    journal: Vec<JournalEntry>,
    last_tx_index: Option<u64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a balance without journaling it (genesis state, fixtures).
    pub fn with_balance(mut self, address: Address, asset: &str, quantity: u64) -> Self {
        self.balances.insert((address, asset.to_string()), quantity);
        self
    }

    /// All issuance records in append order.
    pub fn issuances(&self) -> &[IssuanceRecord] {
        &self.issuances
    }

    /// All send records in append order.
    pub fn sends(&self) -> &[SendRecord] {
        &self.sends
    }

    /// All applied balance changes in order.
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Sum of all balances held in `asset`.
    pub fn supply(&self, asset: &str) -> u128 {
        self.balances
            .iter()
            .filter(|((_, held), _)| held == asset)
            .map(|(_, quantity)| u128::from(*quantity))
            .sum()
    }

    fn record(
        &mut self,
        action: JournalAction,
        block_index: BlockHeight,
        address: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) {
        trace!(?action, %address, asset, quantity, %event, "Balance changed");
        self.journal.push(JournalEntry {
            block_index,
            address: address.clone(),
            asset: asset.to_string(),
            quantity,
            action,
            event,
        });
    }

    fn checked_credit(&self, address: &Address, asset: &str, quantity: u64) -> Result<u64, LedgerError> {
        let current = self.balance(address, asset)?;
        current
            .checked_add(quantity)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                address: address.clone(),
                asset: asset.to_string(),
            })
    }

    fn checked_debit(&self, address: &Address, asset: &str, quantity: u64) -> Result<u64, LedgerError> {
        let available = self.balance(address, asset)?;
        available
            .checked_sub(quantity)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                address: address.clone(),
                asset: asset.to_string(),
                required: quantity,
                available,
            })
    }
}

impl AssetLedger for InMemoryLedger {
    fn valid_issuances(&self, asset: &str) -> Result<Vec<IssuanceRecord>, LedgerError> {
        Ok(self
            .issuances
            .iter()
            .filter(|record| record.status.is_valid() && record.asset.as_deref() == Some(asset))
            .cloned()
            .collect())
    }

    fn balance(&self, address: &Address, asset: &str) -> Result<u64, LedgerError> {
        Ok(self
            .balances
            .get(&(address.clone(), asset.to_string()))
            .copied()
            .unwrap_or(0))
    }

    fn credit(
        &mut self,
        block_index: BlockHeight,
        address: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) -> Result<(), LedgerError> {
        let updated = self.checked_credit(address, asset, quantity)?;
        self.balances
            .insert((address.clone(), asset.to_string()), updated);
        self.record(JournalAction::Credit, block_index, address, asset, quantity, event);
        Ok(())
    }

    fn debit(
        &mut self,
        block_index: BlockHeight,
        address: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) -> Result<(), LedgerError> {
        let updated = self.checked_debit(address, asset, quantity)?;
        self.balances
            .insert((address.clone(), asset.to_string()), updated);
        self.record(JournalAction::Debit, block_index, address, asset, quantity, event);
        Ok(())
    }

    fn transfer(
        &mut self,
        block_index: BlockHeight,
        from: &Address,
        to: &Address,
        asset: &str,
        quantity: u64,
        event: TxHash,
    ) -> Result<(), LedgerError> {
        // Check both legs before applying either.
        self.checked_debit(from, asset, quantity)?;
        if from != to {
            self.checked_credit(to, asset, quantity)?;
        }
        self.debit(block_index, from, asset, quantity, event)?;
        self.credit(block_index, to, asset, quantity, event)
    }

    fn check_append(&self, record: &LedgerRecord) -> Result<(), LedgerError> {
        let tx_index = record.tx_index();
        if self.last_tx_index.is_some_and(|last| tx_index <= last) {
            return Err(LedgerError::Storage(format!(
                "record for tx {} appended out of order",
                tx_index
            )));
        }
        Ok(())
    }

    fn append(&mut self, record: LedgerRecord) -> Result<(), LedgerError> {
        self.check_append(&record)?;
        self.last_tx_index = Some(record.tx_index());
        match record {
            LedgerRecord::Issuance(record) => self.issuances.push(record),
            LedgerRecord::Send(record) => self.sends.push(record),
        }
        Ok(())
    }
}
