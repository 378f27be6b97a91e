use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Fractional share in `[0, 1]`, e.g. a provider's slice of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn new(fraction: Decimal) -> Self {
        Self(fraction)
    }

    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn to_bps(&self) -> u32 {
        (self.0 * Decimal::from(10000)).to_u32().unwrap_or(0)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}
