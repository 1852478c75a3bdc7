//! # Protocol Version Policy
//!
//! Every height-dependent rule of the protocol lives in [`RULE_TABLE`]. The
//! processor selects one [`RuleVariant`] per transaction and the codec and
//! validators read flags from it; nothing else compares raw heights.
//!
//! ## Mainnet schedule (inclusive lower bounds)
//!
//! | height ≥ | fee | long issuance layout | card fields w/o card_image | fee on zero qty | fee on reissuance |
//! |----------|-----|----------------------|----------------------------|-----------------|-------------------|
//! | 0        | 0          | no  | ignored  | no  | yes |
//! | 281237   | 5          | no  | ignored  | no  | yes |
//! | 283272   | 5          | yes | ignored  | no  | yes |
//! | 286000   | 5 UNIT     | yes | ignored  | no  | yes |
//! | 291700   | 0.5 UNIT   | yes | ignored  | no  | yes |
//! | 310000   | 0.5 UNIT   | yes | rejected | no  | no  |
//! | 312500   | 0.5 UNIT   | yes | zeroed   | no  | no  |
//! | 315000   | 0.5 UNIT   | yes | zeroed   | yes | no  |
//!
//! Test networks run [`TEST_NETWORK_RULES`]: the last row, except that
//! reissuances still owe the fee.

use serde::Serialize;
use shared_types::{BlockHeight, Network};

use super::value_objects::UNIT;

/// How card fields are treated on an issuance without `card_image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardFieldPolicy {
    /// Values are stored as supplied and never checked.
    Ignored,
    /// Non-zero values are a validation problem.
    Rejected,
    /// Values are replaced by zero before any other check.
    ForcedZero,
}

/// Fee, layout and flag interpretation active from `activation_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleVariant {
    /// First mainnet height at which this row applies.
    pub activation_height: BlockHeight,
    /// Fee (in protocol-currency base units) for a fee-bearing issuance.
    pub issuance_fee: u64,
    /// Whether a 68-byte issuance body is decoded with the long layout.
    pub long_issuance_layout: bool,
    /// Treatment of card fields when `card_image` is unset.
    pub card_fields: CardFieldPolicy,
    /// Whether an issuance with zero quantity still owes the fee.
    pub fee_on_zero_quantity: bool,
    /// Whether reissuances owe the fee, or only first issuances.
    pub fee_on_reissuance: bool,
}

impl RuleVariant {
    /// Whether a zero card series may replace a larger previous one.
    ///
    /// Holds exactly when card fields are zeroed on assets without a card
    /// image, since those reissuances can no longer carry the old value.
    pub fn resets_card_series(&self) -> bool {
        self.card_fields == CardFieldPolicy::ForcedZero
    }
}

/// Ordered consensus schedule, oldest first.
pub const RULE_TABLE: [RuleVariant; 8] = [
    RuleVariant {
        activation_height: 0,
        issuance_fee: 0,
        long_issuance_layout: false,
        card_fields: CardFieldPolicy::Ignored,
        fee_on_zero_quantity: false,
        fee_on_reissuance: true,
    },
    RuleVariant {
        activation_height: 281_237,
        issuance_fee: 5,
        long_issuance_layout: false,
        card_fields: CardFieldPolicy::Ignored,
        fee_on_zero_quantity: false,
        fee_on_reissuance: true,
    },
    RuleVariant {
        activation_height: 283_272,
        issuance_fee: 5,
        long_issuance_layout: true,
        card_fields: CardFieldPolicy::Ignored,
        fee_on_zero_quantity: false,
        fee_on_reissuance: true,
    },
    RuleVariant {
        activation_height: 286_000,
        issuance_fee: 5 * UNIT,
        long_issuance_layout: true,
        card_fields: CardFieldPolicy::Ignored,
        fee_on_zero_quantity: false,
        fee_on_reissuance: true,
    },
    RuleVariant {
        activation_height: 291_700,
        issuance_fee: UNIT / 2,
        long_issuance_layout: true,
        card_fields: CardFieldPolicy::Ignored,
        fee_on_zero_quantity: false,
        fee_on_reissuance: true,
    },
    RuleVariant {
        activation_height: 310_000,
        issuance_fee: UNIT / 2,
        long_issuance_layout: true,
        card_fields: CardFieldPolicy::Rejected,
        fee_on_zero_quantity: false,
        fee_on_reissuance: false,
    },
    RuleVariant {
        activation_height: 312_500,
        issuance_fee: UNIT / 2,
        long_issuance_layout: true,
        card_fields: CardFieldPolicy::ForcedZero,
        fee_on_zero_quantity: false,
        fee_on_reissuance: false,
    },
    RuleVariant {
        activation_height: 315_000,
        issuance_fee: UNIT / 2,
        long_issuance_layout: true,
        card_fields: CardFieldPolicy::ForcedZero,
        fee_on_zero_quantity: true,
        fee_on_reissuance: false,
    },
];

/// Rules on every test network, independent of height.
pub const TEST_NETWORK_RULES: RuleVariant = RuleVariant {
    activation_height: 0,
    issuance_fee: UNIT / 2,
    long_issuance_layout: true,
    card_fields: CardFieldPolicy::ForcedZero,
    fee_on_zero_quantity: true,
    fee_on_reissuance: true,
};

/// Selects the rule variant active at `height` on `network`.
pub fn rule_variant(height: BlockHeight, network: Network) -> &'static RuleVariant {
    if network.is_test_network() {
        return &TEST_NETWORK_RULES;
    }
    RULE_TABLE
        .iter()
        .rev()
        .find(|variant| height >= variant.activation_height)
        .unwrap_or(&RULE_TABLE[0])
}
