use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instantaneous price, quoted as units of one currency per unit of another.
///
/// A price is only ever produced from a non-zero divisor reserve; callers
/// that may face an empty pool receive an `Option<Price>` instead of a
/// negative sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Reserve-ratio price `numerator / denominator`; `None` when the
    /// denominator reserve is zero.
    pub fn from_reserves(numerator: Decimal, denominator: Decimal) -> Option<Self> {
        if denominator.is_zero() {
            None
        } else {
            Some(Self::new(numerator / denominator))
        }
    }

    /// The opposite orientation, `None` for a zero price.
    pub fn invert(&self) -> Option<Self> {
        if self.value.is_zero() {
            None
        } else {
            Some(Self::new(Decimal::ONE / self.value))
        }
    }
}
