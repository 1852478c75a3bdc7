//! # Send Validator
//!
//! Consensus rules for moving an issued asset (or the protocol currency)
//! between addresses. Host-chain currency moves through native outputs and
//! is refused here.

use shared_types::Address;

use crate::domain::{ClientNumber, LedgerError, SendProblem, BTC};
use crate::ports::AssetLedger;

/// Send fields as they reach the validator.
#[derive(Debug, Clone, Copy)]
pub struct SendDraft<'a> {
    pub source: &'a Address,
    pub destination: Option<&'a Address>,
    pub asset: &'a str,
    pub quantity: ClientNumber,
    pub published_balance: Option<u64>,
}

/// Collects the problems of a send; empty means valid.
///
/// A valid send is always covered by the source balance, so applying it
/// can never fail a debit.
pub fn validate_send<L: AssetLedger + ?Sized>(
    ledger: &L,
    draft: &SendDraft<'_>,
) -> Result<Vec<SendProblem>, LedgerError> {
    let mut problems = Vec::new();

    let host_currency = draft.asset == BTC;
    if host_currency {
        problems.push(SendProblem::HostCurrency);
    }

    let Some(quantity) = draft.quantity.as_integer() else {
        problems.push(SendProblem::QuantityNotInteger);
        return Ok(problems);
    };
    if quantity < 0 {
        problems.push(SendProblem::NegativeQuantity);
    }

    if draft.destination.is_none() {
        problems.push(SendProblem::MissingDestination);
    }

    if host_currency {
        return Ok(problems);
    }

    let balance = ledger.balance(draft.source, draft.asset)?;
    if draft
        .published_balance
        .is_some_and(|published| published != balance)
    {
        problems.push(SendProblem::IncorrectPublishedBalance);
    }
    if quantity > i128::from(balance) {
        problems.push(SendProblem::InsufficientFunds);
    }

    Ok(problems)
}
