use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Swap fee configuration, passed explicitly into every quote and commit.
///
/// `total_rate` is the full fraction taken off the swap input; `provider_rate`
/// is the slice of it that stays in the pool and accrues to LP holders. The
/// remainder (`protocol_rate`) is extracted as exchange revenue and must not
/// inflate the constant product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeConfig {
    total_rate: Decimal,
    provider_rate: Decimal,
}

impl FeeConfig {
    /// Validates `0 <= provider_rate <= total_rate <= 1`.
    pub fn new(total_rate: Decimal, provider_rate: Decimal) -> Result<Self, EngineError> {
        let valid = provider_rate >= Decimal::ZERO
            && provider_rate <= total_rate
            && total_rate <= Decimal::ONE;
        if valid {
            Ok(Self {
                total_rate,
                provider_rate,
            })
        } else {
            Err(EngineError::InvalidFeeConfig {
                total_rate,
                provider_rate,
            })
        }
    }

    pub fn zero() -> Self {
        Self {
            total_rate: Decimal::ZERO,
            provider_rate: Decimal::ZERO,
        }
    }

    pub fn total_rate(&self) -> Decimal {
        self.total_rate
    }

    pub fn provider_rate(&self) -> Decimal {
        self.provider_rate
    }

    /// The protocol-retained slice, `total_rate - provider_rate`.
    pub fn protocol_rate(&self) -> Decimal {
        self.total_rate - self.provider_rate
    }
}
