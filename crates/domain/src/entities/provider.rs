use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Pool;
use crate::value_objects::Percentage;

/// One (user, pool) liquidity position.
///
/// Only the LP-token balance is stored; the A/B entitlement and the share
/// are always derived from the pool's current state. The row is created on
/// first deposit and never deleted, even at zero tokens, because history
/// rows anchor to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub user_id: Uuid,
    pub pool_id: Uuid,
    pub lp_tokens: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Provider {
    #[must_use]
    pub fn new(user_id: Uuid, pool_id: Uuid) -> Self {
        Self {
            user_id,
            pool_id,
            lp_tokens: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Current share of the pool; zero when the pool has no outstanding
    /// tokens.
    pub fn share(&self, pool: &Pool) -> Percentage {
        if pool.lp_tokens.is_zero() {
            Percentage::new(Decimal::ZERO)
        } else {
            Percentage::new(self.lp_tokens / pool.lp_tokens)
        }
    }

    /// The A-side amount this position is currently entitled to.
    pub fn amount_a(&self, pool: &Pool) -> Decimal {
        self.share(pool).as_decimal() * pool.amount_a
    }

    /// The B-side amount this position is currently entitled to.
    pub fn amount_b(&self, pool: &Pool) -> Decimal {
        self.share(pool).as_decimal() * pool.amount_b
    }

    pub fn has_liquidity(&self) -> bool {
        self.lp_tokens > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::CurrencyCode;
    use rust_decimal_macros::dec;

    #[test]
    fn entitlement_is_derived_from_share() {
        let mut pool = Pool::new(CurrencyCode::new("ETH"), CurrencyCode::new("USDT"), 1);
        pool.deposit(dec!(500), dec!(1000), dec!(100));

        let mut provider = Provider::new(Uuid::new_v4(), pool.id);
        provider.lp_tokens = dec!(10);

        assert_eq!(provider.share(&pool).as_decimal(), dec!(0.1));
        assert_eq!(provider.amount_a(&pool), dec!(50));
        assert_eq!(provider.amount_b(&pool), dec!(100));
    }

    #[test]
    fn zero_supply_means_zero_share() {
        let pool = Pool::new(CurrencyCode::new("ETH"), CurrencyCode::new("USDT"), 1);
        let provider = Provider::new(Uuid::new_v4(), pool.id);
        assert_eq!(provider.share(&pool).as_decimal(), Decimal::ZERO);
        assert_eq!(provider.amount_a(&pool), Decimal::ZERO);
        assert!(!provider.has_liquidity());
    }
}
