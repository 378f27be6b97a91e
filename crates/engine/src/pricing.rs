//! Price resolution across the pool graph.

use rust_decimal::Decimal;
use std::sync::Arc;

use swap_domain::entities::Pool;
use swap_domain::enums::BaseCurrency;
use swap_domain::error::EngineError;
use swap_domain::value_objects::{CurrencyCode, Price};

use crate::collaborators::PriceOracle;
use crate::registry::PoolRegistry;

/// Computes the price of any currency in IRT, USDT, or BTC by walking the
/// pools of the requested base currency.
///
/// Resolution is single-hop by design: only pools with the base currency on
/// one side are consulted, and an asset with no direct base-currency pool
/// falls back to the oracle rather than chaining through an intermediate
/// pool. The first pool yielding a strictly positive price wins: a
/// deterministic creation-order tie-break, not an economically optimal one.
#[derive(Clone)]
pub struct PriceResolver {
    registry: Arc<PoolRegistry>,
    oracle: Arc<dyn PriceOracle>,
}

impl PriceResolver {
    #[must_use]
    pub fn new(registry: Arc<PoolRegistry>, oracle: Arc<dyn PriceOracle>) -> Self {
        Self { registry, oracle }
    }

    /// Price of one unit of `currency` in `base`.
    ///
    /// Identity prices at exactly 1 without consulting any pool. Pools with
    /// a zero reserve on either side yield no usable price and are skipped.
    pub async fn price(
        &self,
        currency: &CurrencyCode,
        base: BaseCurrency,
    ) -> Result<Price, EngineError> {
        if *currency == base.code() {
            return Ok(Price::new(Decimal::ONE));
        }

        for shared in self.registry.filter_by_currency(&base.code()).await {
            let pool = shared.read().await;
            // Orient so the result is units of base per unit of currency:
            // when the currency sits on side A the base is side B, and the
            // plain B/A ratio already points the right way.
            let candidate = if pool.currency_a == *currency {
                pool.spot_price(false)
            } else if pool.currency_b == *currency {
                pool.spot_price(true)
            } else {
                None
            };
            if let Some(price) = candidate {
                if price.value > Decimal::ZERO {
                    return Ok(price);
                }
            }
        }

        let unit = self
            .oracle
            .value_in_base(currency, Decimal::ONE, base)
            .await?;
        Ok(Price::new(unit))
    }

    /// Total value locked in a pool.
    ///
    /// `base == None` values everything in currency B using the pool's own
    /// spot price; a base currency values each side through [`Self::price`].
    /// `amounts` overrides the reserves to value a historical state; prices
    /// still come from the current pool graph.
    pub async fn pool_tvl(
        &self,
        pool: &Pool,
        base: Option<BaseCurrency>,
        amounts: Option<(Decimal, Decimal)>,
    ) -> Result<Decimal, EngineError> {
        let (amount_a, amount_b) = amounts.unwrap_or((pool.amount_a, pool.amount_b));
        match base {
            None => match pool.spot_price(false) {
                Some(price) => Ok(price.value * amount_a + amount_b),
                None if amount_a.is_zero() => Ok(amount_b),
                None => Err(EngineError::InsufficientLiquidity),
            },
            Some(base) => {
                let price_a = self.price(&pool.currency_a, base).await?;
                let price_b = self.price(&pool.currency_b, base).await?;
                Ok(price_a.value * amount_a + price_b.value * amount_b)
            }
        }
    }

    /// A currency's reserves summed across every pool, optionally valued in
    /// a base currency.
    pub async fn currency_tvl(
        &self,
        currency: &CurrencyCode,
        base: Option<BaseCurrency>,
    ) -> Result<Decimal, EngineError> {
        let mut total = Decimal::ZERO;
        for shared in self.registry.filter_by_currency(currency).await {
            let pool = shared.read().await;
            total += if pool.currency_a == *currency {
                pool.amount_a
            } else {
                pool.amount_b
            };
        }
        match base {
            None => Ok(total),
            Some(base) => {
                let price = self.price(currency, base).await?;
                Ok(total * price.value)
            }
        }
    }
}
