//! # Validation Problems
//!
//! Problems are collected, not raised. On the parse path they are joined
//! into the record status; on the compose path they are returned inside a
//! [`ComposeError`](super::errors::ComposeError). The display strings are
//! part of the persisted ledger state and must not change.

use serde::Serialize;
use thiserror::Error;

/// Reasons an issuance message is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum IssuanceProblem {
    #[error("cannot issue BTC or XCP")]
    ReservedAsset,

    #[error("quantity must be in satoshis")]
    QuantityNotInteger,

    #[error("card_series must be epoch integer")]
    CardSeriesNotInteger,

    #[error("negative quantity")]
    NegativeQuantity,

    #[error("negative call price")]
    NegativeCardNumber,

    #[error("negative call date")]
    NegativeCardSeries,

    #[error("call date for non‐card_image asset")]
    CardSeriesWithoutCardImage,

    #[error("call price for non‐card_image asset")]
    CardNumberWithoutCardImage,

    #[error("issued by another address")]
    IssuedByAnotherAddress,

    #[error("cannot change divisibility")]
    DivisibilityChanged,

    #[error("cannot change callability")]
    CardImageChanged,

    #[error("cannot advance call date")]
    CardSeriesDecreased,

    #[error("cannot reduce call price")]
    CardNumberDecreased,

    #[error("locked asset and non‐zero quantity")]
    LockedAsset,

    #[error("cannot lock a non‐existent asset")]
    LockNonExistent,

    #[error("cannot transfer a non‐existent asset")]
    TransferNonExistent,

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("total quantity overflow")]
    TotalQuantityOverflow,

    #[error("cannot issue and transfer simultaneously")]
    IssueAndTransfer,
}

/// Reasons a send message is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum SendProblem {
    #[error("cannot send bitcoins")]
    HostCurrency,

    #[error("quantity must be in satoshis")]
    QuantityNotInteger,

    #[error("negative quantity")]
    NegativeQuantity,

    #[error("no destination")]
    MissingDestination,

    #[error("incorrect published balance")]
    IncorrectPublishedBalance,

    #[error("insufficient funds")]
    InsufficientFunds,
}
