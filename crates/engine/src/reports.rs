//! Pool, currency, and market-wide report assembly.
//!
//! Everything here is an offline read over the registry and the history
//! stores; nothing on the commit path depends on it.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use swap_domain::entities::Pool;
use swap_domain::enums::BaseCurrency;
use swap_domain::error::EngineError;
use swap_domain::value_objects::{CurrencyCode, Price};

use crate::history::{FeeTotals, HistoryRecorder};
use crate::pricing::PriceResolver;
use crate::registry::PoolRegistry;

/// Dashboard view of one pool.
#[derive(Debug, Clone, Serialize)]
pub struct PoolOverview {
    pub pool: Pool,
    pub price: Option<Price>,
    /// TVL in currency B; `None` for a priceless pool with A-side reserves.
    pub tvl: Option<Decimal>,
    pub tvl_irt: Decimal,
    pub tvl_usdt: Decimal,
    pub tvl_btc: Decimal,
    pub fees_irt: FeeTotals,
    pub volume_24h_irt: Decimal,
    pub volume_7d_irt: Decimal,
}

/// A currency's footprint across every pool holding it.
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyOverview {
    pub currency: CurrencyCode,
    /// Reserves summed across pools, in the currency itself.
    pub tvl: Decimal,
    pub tvl_irt: Decimal,
    pub volume_24h_irt: Decimal,
    /// Price movement vs. the oldest swap of the last 24 hours.
    pub price_change_24h: Decimal,
    pub total_fees: Decimal,
    pub total_fees_irt: Decimal,
    pub price_irt: Price,
    pub pairs: Vec<PoolPair>,
}

/// Pair listing entry for a currency overview.
#[derive(Debug, Clone, Serialize)]
pub struct PoolPair {
    pub pool_id: Uuid,
    pub currency_a: CurrencyCode,
    pub currency_b: CurrencyCode,
}

/// Exchange-wide headline numbers.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub tvl_irt: Decimal,
    /// Change vs. the TVL reconstructed at each pool's oldest provider
    /// transaction of the last 24 hours.
    pub tvl_change_24h: Decimal,
    pub total_fees_irt: Decimal,
    pub volume_24h_irt: Decimal,
    /// Day-over-day volume change: (-24h, now) vs. (-48h, -24h).
    pub volume_change_48h_24h: Decimal,
}

/// Assembles reports from the live registry and the history stores.
#[derive(Clone)]
pub struct ReportService {
    registry: Arc<PoolRegistry>,
    resolver: Arc<PriceResolver>,
    recorder: Arc<HistoryRecorder>,
}

impl ReportService {
    #[must_use]
    pub fn new(
        registry: Arc<PoolRegistry>,
        resolver: Arc<PriceResolver>,
        recorder: Arc<HistoryRecorder>,
    ) -> Self {
        Self {
            registry,
            resolver,
            recorder,
        }
    }

    pub async fn pool_overview(&self, pool_id: Uuid) -> Result<PoolOverview, EngineError> {
        let shared = self
            .registry
            .find(pool_id)
            .await
            .ok_or(EngineError::PoolNotFound)?;
        let pool = shared.read().await.clone();
        let now = Utc::now();

        let tvl = self.resolver.pool_tvl(&pool, None, None).await.ok();
        let tvl_irt = self
            .resolver
            .pool_tvl(&pool, Some(BaseCurrency::Irt), None)
            .await?;
        let tvl_usdt = self
            .resolver
            .pool_tvl(&pool, Some(BaseCurrency::Usdt), None)
            .await?;
        let tvl_btc = self
            .resolver
            .pool_tvl(&pool, Some(BaseCurrency::Btc), None)
            .await?;
        let fees_irt = self
            .recorder
            .pool_fee_totals(&pool, Some(BaseCurrency::Irt))
            .await?;
        let volume_24h_irt = self
            .recorder
            .volume_in_irt(Some(pool_id), now - Duration::days(1), now)
            .await;
        let volume_7d_irt = self
            .recorder
            .volume_in_irt(Some(pool_id), now - Duration::days(7), now)
            .await;

        Ok(PoolOverview {
            price: pool.spot_price(false),
            pool,
            tvl,
            tvl_irt,
            tvl_usdt,
            tvl_btc,
            fees_irt,
            volume_24h_irt,
            volume_7d_irt,
        })
    }

    /// Price movement of `currency` against IRT over the last 24 hours,
    /// measured from the oldest in-window swap's after-price.
    async fn price_change_24h(&self, currency: &CurrencyCode) -> Result<Decimal, EngineError> {
        if *currency == BaseCurrency::Irt.code() {
            return Ok(Decimal::ZERO);
        }
        let Some(lookup) = self
            .registry
            .find_by_pair(currency, &BaseCurrency::Irt.code(), true)
            .await
        else {
            return Ok(Decimal::ZERO);
        };
        let pool_id = lookup.pool.read().await.id;

        let now = Utc::now();
        let oldest = self
            .recorder
            .swaps_in_range(Some(pool_id), now - Duration::days(1), now)
            .await
            .into_iter()
            .filter(|record| record.input_currency == *currency)
            .next_back();
        let Some(swap) = oldest else {
            return Ok(Decimal::ZERO);
        };
        if swap.price_after.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let current = self.resolver.price(currency, BaseCurrency::Irt).await?;
        Ok((current.value - swap.price_after) / swap.price_after)
    }

    pub async fn currency_overview(
        &self,
        currency: &CurrencyCode,
    ) -> Result<CurrencyOverview, EngineError> {
        let pools = self.registry.filter_by_currency(currency).await;
        if pools.is_empty() {
            return Err(EngineError::CurrencyNotFound(currency.clone()));
        }

        let now = Utc::now();
        let mut volume_24h_irt = Decimal::ZERO;
        let mut pairs = Vec::with_capacity(pools.len());
        for shared in pools {
            let pool = shared.read().await;
            volume_24h_irt += self
                .recorder
                .volume_in_irt(Some(pool.id), now - Duration::days(1), now)
                .await;
            pairs.push(PoolPair {
                pool_id: pool.id,
                currency_a: pool.currency_a.clone(),
                currency_b: pool.currency_b.clone(),
            });
        }

        let fees = self.recorder.currency_fee_totals(currency, None).await?;
        let fees_irt = self
            .recorder
            .currency_fee_totals(currency, Some(BaseCurrency::Irt))
            .await?;

        Ok(CurrencyOverview {
            currency: currency.clone(),
            tvl: self.resolver.currency_tvl(currency, None).await?,
            tvl_irt: self
                .resolver
                .currency_tvl(currency, Some(BaseCurrency::Irt))
                .await?,
            volume_24h_irt,
            price_change_24h: self.price_change_24h(currency).await?,
            total_fees: fees.amount,
            total_fees_irt: fees_irt.value,
            price_irt: self.resolver.price(currency, BaseCurrency::Irt).await?,
            pairs,
        })
    }

    pub async fn market_summary(&self) -> Result<MarketSummary, EngineError> {
        let now = Utc::now();
        let mut tvl_irt = Decimal::ZERO;
        let mut tvl_24h_ago = Decimal::ZERO;
        let mut total_fees_irt = Decimal::ZERO;

        for shared in self.registry.list().await {
            let pool = shared.read().await.clone();
            tvl_irt += self
                .resolver
                .pool_tvl(&pool, Some(BaseCurrency::Irt), None)
                .await?;
            total_fees_irt += self
                .recorder
                .pool_fee_totals(&pool, Some(BaseCurrency::Irt))
                .await?
                .total_value;

            // TVL near the start of the window, reconstructed from the
            // oldest in-window provider transaction. Swaps between provider
            // transactions are not replayed; this is a reporting
            // approximation, not ledger truth.
            let oldest_tx = self
                .recorder
                .provider_txs_in_range(Some(pool.id), now - Duration::days(1), now)
                .await
                .into_iter()
                .next_back();
            if let Some(record) = oldest_tx {
                if let Some((amount_a, amount_b)) = record.pool_reserves_after() {
                    tvl_24h_ago += self
                        .resolver
                        .pool_tvl(&pool, Some(BaseCurrency::Irt), Some((amount_a, amount_b)))
                        .await?;
                }
            }
        }

        let tvl_change_24h = if tvl_24h_ago.is_zero() {
            Decimal::ZERO
        } else {
            (tvl_irt - tvl_24h_ago) / tvl_24h_ago
        };

        let volume_24h_irt = self
            .recorder
            .volume_in_irt(None, now - Duration::days(1), now)
            .await;
        let volume_previous = self
            .recorder
            .volume_in_irt(None, now - Duration::days(2), now - Duration::days(1))
            .await;
        let volume_change_48h_24h = if volume_previous.is_zero() {
            Decimal::ZERO
        } else {
            (volume_24h_irt - volume_previous) / volume_previous
        };

        Ok(MarketSummary {
            tvl_irt,
            tvl_change_24h,
            total_fees_irt,
            volume_24h_irt,
            volume_change_48h_24h,
        })
    }
}
