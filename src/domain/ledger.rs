// ============================================================================
// Account Ledger
// Two-asset balances with reservation (escrow) accounting
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to;

/// The two assets of the session's trading pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Quote,
    Base,
}

/// Free balances derived from totals minus reservations, rounded for
/// display (2 dp for the quote asset, 6 dp for the base asset).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Available {
    pub quote: Decimal,
    pub base: Decimal,
}

/// Per-session ledger.
///
/// Invariant: `0 <= reserved <= total` for each asset. Every mutating
/// method preserves it; callers outside the engine only get read access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    quote: Decimal,
    quote_reserved: Decimal,
    base: Decimal,
    base_reserved: Decimal,
}

impl Balances {
    /// Fresh ledger: the given quote balance, nothing else.
    pub fn new(initial_quote: Decimal) -> Self {
        Self {
            quote: initial_quote.max(Decimal::ZERO),
            quote_reserved: Decimal::ZERO,
            base: Decimal::ZERO,
            base_reserved: Decimal::ZERO,
        }
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    pub fn quote_total(&self) -> Decimal {
        self.quote
    }

    pub fn quote_reserved(&self) -> Decimal {
        self.quote_reserved
    }

    pub fn base_total(&self) -> Decimal {
        self.base
    }

    pub fn base_reserved(&self) -> Decimal {
        self.base_reserved
    }

    /// Free balances, floored at zero and rounded for display.
    pub fn available(&self) -> Available {
        Available {
            quote: round_to((self.quote - self.quote_reserved).max(Decimal::ZERO), 2),
            base: round_to((self.base - self.base_reserved).max(Decimal::ZERO), 6),
        }
    }

    /// Exact (unrounded) free quote balance, used for reservation checks.
    pub fn free_quote(&self) -> Decimal {
        self.quote - self.quote_reserved
    }

    /// Exact (unrounded) free base balance, used for reservation checks.
    pub fn free_base(&self) -> Decimal {
        self.base - self.base_reserved
    }

    /// Whether the reservation invariant holds for both assets.
    pub fn invariants_hold(&self) -> bool {
        self.quote_reserved >= Decimal::ZERO
            && self.quote_reserved <= self.quote
            && self.base_reserved >= Decimal::ZERO
            && self.base_reserved <= self.base
    }

    // ========================================================================
    // Mutations (engine-internal)
    // ========================================================================

    /// Reserve quote for a buy order. Fails without mutating when the
    /// amount exceeds the free balance.
    pub(crate) fn try_reserve_quote(&mut self, amount: Decimal) -> bool {
        if amount > self.free_quote() {
            return false;
        }
        self.quote_reserved += amount;
        true
    }

    /// Reserve base for a sell order. Fails without mutating when the
    /// amount exceeds the free balance.
    pub(crate) fn try_reserve_base(&mut self, amount: Decimal) -> bool {
        if amount > self.free_base() {
            return false;
        }
        self.base_reserved += amount;
        true
    }

    /// Release a quote reservation (cancellation of a buy order).
    pub(crate) fn release_quote(&mut self, amount: Decimal) {
        self.quote_reserved = (self.quote_reserved - amount).max(Decimal::ZERO);
    }

    /// Release a base reservation (cancellation of a sell order).
    pub(crate) fn release_base(&mut self, amount: Decimal) {
        self.base_reserved = (self.base_reserved - amount).max(Decimal::ZERO);
    }

    /// Settle a buy fill: the reserved cost leaves the quote side and the
    /// filled quantity arrives on the base side.
    pub(crate) fn settle_buy(&mut self, cost: Decimal, quantity: Decimal) {
        self.quote_reserved = (self.quote_reserved - cost).max(Decimal::ZERO);
        self.quote -= cost;
        self.base += quantity;
    }

    /// Settle a sell fill: the reserved quantity leaves the base side and
    /// the proceeds arrive on the quote side.
    pub(crate) fn settle_sell(&mut self, quantity: Decimal, proceeds: Decimal) {
        self.base_reserved = (self.base_reserved - quantity).max(Decimal::ZERO);
        self.base -= quantity;
        self.quote += proceeds;
    }
}
