use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::SuspendScope;
use crate::value_objects::{CurrencyCode, Price};

/// Shared liquidity pool over an ordered currency pair.
///
/// The pool is the single source of truth for its current reserves; history
/// rows are derived from it, never the other way around. Invariants:
/// `amount_a`, `amount_b` and `lp_tokens` are non-negative, and the pool is
/// empty (`lp_tokens == 0`) exactly when both reserves are zero.
///
/// A pool stores its pair in one fixed order; callers asking for the
/// opposite order carry an explicit `reversed` flag through every formula
/// instead of re-deriving orientation from the symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub id: Uuid,
    pub currency_a: CurrencyCode,
    pub currency_b: CurrencyCode,
    pub amount_a: Decimal,
    pub amount_b: Decimal,
    pub lp_tokens: Decimal,
    /// Display ordering; lower ranks list first.
    pub rank: i32,
    pub suspend_swap: bool,
    pub suspend_providing: bool,
    pub created_at: DateTime<Utc>,
}

impl Pool {
    #[must_use]
    pub fn new(currency_a: CurrencyCode, currency_b: CurrencyCode, rank: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            currency_a,
            currency_b,
            amount_a: Decimal::ZERO,
            amount_b: Decimal::ZERO,
            lp_tokens: Decimal::ZERO,
            rank,
            suspend_swap: false,
            suspend_providing: false,
            created_at: Utc::now(),
        }
    }

    /// Whether the currency sits on either side of the pair.
    pub fn contains(&self, currency: &CurrencyCode) -> bool {
        self.currency_a == *currency || self.currency_b == *currency
    }

    /// Whether this pool holds the given pair in its stored order.
    pub fn is_pair(&self, currency_a: &CurrencyCode, currency_b: &CurrencyCode) -> bool {
        self.currency_a == *currency_a && self.currency_b == *currency_b
    }

    /// No outstanding LP tokens; by the pool invariant this also means both
    /// reserves are zero.
    pub fn is_empty(&self) -> bool {
        self.lp_tokens.is_zero()
    }

    /// Reserve-ratio spot price.
    ///
    /// `reversed == false` prices currency A in units of currency B
    /// (`amount_b / amount_a`); `reversed == true` is the opposite
    /// orientation. `None` when the divisor reserve is zero.
    pub fn spot_price(&self, reversed: bool) -> Option<Price> {
        if reversed {
            Price::from_reserves(self.amount_a, self.amount_b)
        } else {
            Price::from_reserves(self.amount_b, self.amount_a)
        }
    }

    /// Constant-product invariant `k = amount_a * amount_b`.
    pub fn constant_product(&self) -> Decimal {
        self.amount_a * self.amount_b
    }

    /// Reserves ordered so the first element is the swap-input ("own") side.
    pub fn oriented_reserves(&self, reversed: bool) -> (Decimal, Decimal) {
        if reversed {
            (self.amount_b, self.amount_a)
        } else {
            (self.amount_a, self.amount_b)
        }
    }

    /// Input/output currencies for a swap in the given orientation.
    pub fn oriented_currencies(&self, reversed: bool) -> (CurrencyCode, CurrencyCode) {
        if reversed {
            (self.currency_b.clone(), self.currency_a.clone())
        } else {
            (self.currency_a.clone(), self.currency_b.clone())
        }
    }

    /// Adds a paired deposit and its minted LP tokens.
    pub fn deposit(&mut self, amount_a: Decimal, amount_b: Decimal, minted_lp: Decimal) {
        self.amount_a += amount_a;
        self.amount_b += amount_b;
        self.lp_tokens += minted_lp;
    }

    /// Removes a proportional withdrawal and its burned LP tokens.
    pub fn withdraw(&mut self, amount_a: Decimal, amount_b: Decimal, burned_lp: Decimal) {
        self.amount_a -= amount_a;
        self.amount_b -= amount_b;
        self.lp_tokens -= burned_lp;
    }

    /// Replaces the reserves with a swap's final amounts. LP supply is
    /// untouched; the provider fee share accrues through the reserves.
    pub fn apply_swap(&mut self, final_amount_a: Decimal, final_amount_b: Decimal) {
        self.amount_a = final_amount_a;
        self.amount_b = final_amount_b;
    }

    /// Raises the suspension flag(s); idempotent.
    pub fn suspend(&mut self, scope: SuspendScope) {
        match scope {
            SuspendScope::Swap => self.suspend_swap = true,
            SuspendScope::Providing => self.suspend_providing = true,
            SuspendScope::Both => {
                self.suspend_swap = true;
                self.suspend_providing = true;
            }
        }
    }
}
