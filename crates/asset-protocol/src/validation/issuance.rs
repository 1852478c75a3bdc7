//! # Issuance Validator
//!
//! Consensus rules for issuance messages: first issuance, reissuance,
//! locking and ownership transfer.
//!
//! The same function serves the parse path, where problems become the
//! record status, and the compose path, where they are returned as an
//! error. Problems are collected rather than short-circuited, except when a
//! field has the wrong type and later checks cannot run.
//!
//! ## Check order
//!
//! 1. Reserved asset names
//! 2. Type normalization of quantity and card fields
//! 3. Sign checks
//! 4. Card-field policy of the active [`RuleVariant`]
//! 5. Reissuance checks against the latest valid issuance, or existence
//!    checks for a first issuance
//! 6. Fee and fee funds
//! 7. Total supply overflow
//! 8. Transfer combined with quantity

use shared_types::Address;

use crate::domain::{
    is_lock_description, is_reserved_asset, CardFieldPolicy, ClientNumber, IssuanceProblem,
    IssuanceRecord, LedgerError, RuleVariant, MAX_INT, XCP,
};
use crate::ports::AssetLedger;

/// Issuance fields as they reach the validator.
#[derive(Debug, Clone, Copy)]
pub struct IssuanceDraft<'a> {
    pub source: &'a Address,
    /// Transfer destination; its presence makes the message a transfer.
    pub destination: Option<&'a Address>,
    pub asset: &'a str,
    pub quantity: ClientNumber,
    pub divisible: bool,
    pub card_image: bool,
    pub card_series: Option<ClientNumber>,
    pub card_number: Option<ClientNumber>,
    pub description: &'a str,
}

/// Normalized fields and collected problems.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuanceValidation {
    /// Quantity as an integer; zero when it was not one.
    pub quantity: i128,
    /// Card series after policy and clamping to [`MAX_INT`].
    pub card_series: u64,
    /// Card number after coercion and policy.
    pub card_number: f64,
    /// Fee owed in protocol-currency base units.
    pub fee: u64,
    pub problems: Vec<IssuanceProblem>,
    /// Valid issuances of the asset, oldest first.
    pub prior: Vec<IssuanceRecord>,
}

impl IssuanceValidation {
    fn rejected(problems: Vec<IssuanceProblem>) -> Self {
        Self {
            quantity: 0,
            card_series: 0,
            card_number: 0.0,
            fee: 0,
            problems,
            prior: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn is_reissuance(&self) -> bool {
        !self.prior.is_empty()
    }

    /// Whether any earlier valid issuance locked the asset.
    pub fn asset_locked(&self) -> bool {
        self.prior.iter().any(|record| record.locked)
    }

    pub fn has_problem(&self, problem: IssuanceProblem) -> bool {
        self.problems.contains(&problem)
    }
}

/// Validates an issuance against the ledger under `variant`.
///
/// Only ledger failures are errors; every rule violation is a problem.
pub fn validate_issuance<L: AssetLedger + ?Sized>(
    ledger: &L,
    variant: &RuleVariant,
    draft: &IssuanceDraft<'_>,
) -> Result<IssuanceValidation, LedgerError> {
    let mut problems = Vec::new();

    if is_reserved_asset(draft.asset) {
        problems.push(IssuanceProblem::ReservedAsset);
    }

    let Some(quantity) = draft.quantity.as_integer() else {
        problems.push(IssuanceProblem::QuantityNotInteger);
        return Ok(IssuanceValidation::rejected(problems));
    };
    let mut card_series = match draft.card_series.unwrap_or(ClientNumber::Integer(0)) {
        ClientNumber::Integer(series) => series,
        ClientNumber::Float(series) if series == 0.0 => 0,
        ClientNumber::Float(_) => {
            problems.push(IssuanceProblem::CardSeriesNotInteger);
            return Ok(IssuanceValidation::rejected(problems));
        }
    };
    let mut card_number = draft.card_number.map_or(0.0, ClientNumber::to_float);

    if quantity < 0 {
        problems.push(IssuanceProblem::NegativeQuantity);
    }
    if card_number < 0.0 {
        problems.push(IssuanceProblem::NegativeCardNumber);
    }
    if card_series < 0 {
        problems.push(IssuanceProblem::NegativeCardSeries);
    }

    if !draft.card_image {
        match variant.card_fields {
            CardFieldPolicy::Ignored => {}
            CardFieldPolicy::Rejected => {
                if card_series != 0 {
                    problems.push(IssuanceProblem::CardSeriesWithoutCardImage);
                }
                if card_number != 0.0 {
                    problems.push(IssuanceProblem::CardNumberWithoutCardImage);
                }
            }
            CardFieldPolicy::ForcedZero => {
                card_series = 0;
                card_number = 0.0;
            }
        }
    }

    let prior = ledger.valid_issuances(draft.asset)?;
    let reissuance = !prior.is_empty();
    match prior.last() {
        Some(last) => {
            if last.issuer != *draft.source {
                problems.push(IssuanceProblem::IssuedByAnotherAddress);
            }
            if last.divisible.unwrap_or(false) != draft.divisible {
                problems.push(IssuanceProblem::DivisibilityChanged);
            }
            if last.card_image.unwrap_or(false) != draft.card_image {
                problems.push(IssuanceProblem::CardImageChanged);
            }
            let last_series = i128::from(last.card_series.unwrap_or(0));
            if last_series > card_series && (card_series != 0 || !variant.resets_card_series()) {
                problems.push(IssuanceProblem::CardSeriesDecreased);
            }
            if last.card_number.unwrap_or(0.0) > card_number {
                problems.push(IssuanceProblem::CardNumberDecreased);
            }
            if quantity != 0 && prior.iter().any(|record| record.locked) {
                problems.push(IssuanceProblem::LockedAsset);
            }
        }
        None => {
            if is_lock_description(draft.description) {
                problems.push(IssuanceProblem::LockNonExistent);
            }
            if draft.destination.is_some() {
                problems.push(IssuanceProblem::TransferNonExistent);
            }
        }
    }

    let mut fee = 0;
    let fee_owed = (quantity != 0 || variant.fee_on_zero_quantity)
        && (!reissuance || variant.fee_on_reissuance);
    if fee_owed {
        fee = variant.issuance_fee;
        if fee > 0 && ledger.balance(draft.source, XCP)? < fee {
            problems.push(IssuanceProblem::InsufficientFunds);
        }
    }

    let max = i128::from(MAX_INT);
    card_series = card_series.min(max);
    let total: i128 = prior
        .iter()
        .map(|record| i128::from(record.quantity.unwrap_or(0)))
        .sum();
    if total + quantity > max {
        problems.push(IssuanceProblem::TotalQuantityOverflow);
    }

    if draft.destination.is_some() && quantity != 0 {
        problems.push(IssuanceProblem::IssueAndTransfer);
    }

    Ok(IssuanceValidation {
        quantity,
        // Clamped to [0, MAX_INT], so the cast is lossless.
        card_series: card_series.max(0) as u64,
        card_number,
        fee,
        problems,
        prior,
    })
}
