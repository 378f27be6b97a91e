//! Append-only history recording, queries, and aggregation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use swap_domain::entities::{Pool, PoolSnapshot, Provider, ProviderTxRecord, SwapRecord};
use swap_domain::enums::{BaseCurrency, ProviderTxKind};
use swap_domain::error::EngineError;
use swap_domain::value_objects::CurrencyCode;

use crate::pricing::PriceResolver;
use crate::registry::PoolRegistry;

/// Everything a swap commit hands over for recording.
#[derive(Debug, Clone)]
pub struct SwapCommitData {
    pub user_id: Uuid,
    pub pool_id: Uuid,
    pub input_currency: CurrencyCode,
    pub output_currency: CurrencyCode,
    pub input_amount: Decimal,
    pub output_amount: Decimal,
    pub fee_amount: Decimal,
    pub fee_rate: Decimal,
    pub price_before: Decimal,
    pub price_after: Decimal,
    pub slippage: Decimal,
}

/// Fee revenue accumulated by one pool, split by output currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeTotals {
    /// Fees collected in currency A (swaps whose input was currency B).
    pub currency_a: Decimal,
    /// Fees collected in currency B (swaps whose input was currency A).
    pub currency_b: Decimal,
    /// Both sides valued in the requested unit.
    pub total_value: Decimal,
}

/// Fee revenue accumulated in one currency across every pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyFees {
    pub amount: Decimal,
    pub value: Decimal,
}

/// Append-only stores for swap, provider, and snapshot rows.
///
/// Rows are immutable once pushed; reconstruction and aggregation read them
/// offline, never on the commit path. Base-currency equivalents are frozen
/// at record time through the resolver; a currency the resolver cannot
/// value records a zero equivalent rather than failing the commit.
pub struct HistoryRecorder {
    registry: Arc<PoolRegistry>,
    resolver: Arc<PriceResolver>,
    provider_txs: Arc<RwLock<Vec<ProviderTxRecord>>>,
    swaps: Arc<RwLock<Vec<SwapRecord>>>,
    snapshots: Arc<RwLock<Vec<PoolSnapshot>>>,
}

impl HistoryRecorder {
    #[must_use]
    pub fn new(registry: Arc<PoolRegistry>, resolver: Arc<PriceResolver>) -> Self {
        Self {
            registry,
            resolver,
            provider_txs: Arc::new(RwLock::new(Vec::new())),
            swaps: Arc::new(RwLock::new(Vec::new())),
            snapshots: Arc::new(RwLock::new(Vec::new())),
        }
    }

    async fn price_or_zero(&self, currency: &CurrencyCode, base: BaseCurrency) -> Decimal {
        self.resolver
            .price(currency, base)
            .await
            .map(|price| price.value)
            .unwrap_or(Decimal::ZERO)
    }

    /// Values an (amount_a, amount_b) pair of the pool's currencies in `base`.
    async fn pair_equivalent(
        &self,
        pool: &Pool,
        amount_a: Decimal,
        amount_b: Decimal,
        base: BaseCurrency,
    ) -> Decimal {
        amount_a * self.price_or_zero(&pool.currency_a, base).await
            + amount_b * self.price_or_zero(&pool.currency_b, base).await
    }

    /// Appends a provider transaction, freezing its base-currency
    /// equivalents as of now.
    pub async fn record_provider_tx(
        &self,
        provider: &Provider,
        pool: &Pool,
        kind: ProviderTxKind,
        amount_a: Decimal,
        amount_b: Decimal,
        lp_tokens_delta: Decimal,
        lp_tokens_pool_total: Decimal,
    ) -> ProviderTxRecord {
        let record = ProviderTxRecord {
            id: Uuid::new_v4(),
            user_id: provider.user_id,
            pool_id: provider.pool_id,
            kind,
            amount_a,
            amount_b,
            lp_tokens_delta,
            lp_tokens_pool_total,
            equivalent_irt: self
                .pair_equivalent(pool, amount_a, amount_b, BaseCurrency::Irt)
                .await,
            equivalent_usdt: self
                .pair_equivalent(pool, amount_a, amount_b, BaseCurrency::Usdt)
                .await,
            equivalent_btc: self
                .pair_equivalent(pool, amount_a, amount_b, BaseCurrency::Btc)
                .await,
            recorded_at: Utc::now(),
        };
        self.provider_txs.write().await.push(record.clone());
        debug!(pool = %record.pool_id, ?kind, "Provider transaction recorded");
        record
    }

    /// Appends a swap, freezing fee value and output equivalents as of now.
    pub async fn record_swap(&self, data: SwapCommitData) -> SwapRecord {
        let output_irt = self.price_or_zero(&data.output_currency, BaseCurrency::Irt).await;
        let output_usdt = self
            .price_or_zero(&data.output_currency, BaseCurrency::Usdt)
            .await;
        let output_btc = self.price_or_zero(&data.output_currency, BaseCurrency::Btc).await;

        let record = SwapRecord {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            pool_id: data.pool_id,
            input_currency: data.input_currency,
            output_currency: data.output_currency,
            input_amount: data.input_amount,
            output_amount: data.output_amount,
            fee_amount: data.fee_amount,
            fee_rate: data.fee_rate,
            fee_value_irt: data.fee_amount * output_irt,
            price_before: data.price_before,
            price_after: data.price_after,
            slippage: data.slippage,
            equivalent_irt: data.output_amount * output_irt,
            equivalent_usdt: data.output_amount * output_usdt,
            equivalent_btc: data.output_amount * output_btc,
            recorded_at: Utc::now(),
        };
        self.swaps.write().await.push(record.clone());
        debug!(pool = %record.pool_id, "Swap recorded");
        record
    }

    /// Snapshots every pool's reserves, LP supply, and base prices.
    pub async fn snapshot_pools(&self) -> Vec<PoolSnapshot> {
        let mut taken = Vec::new();
        for shared in self.registry.list().await {
            let pool = shared.read().await.clone();
            let snapshot = PoolSnapshot {
                id: Uuid::new_v4(),
                pool_id: pool.id,
                amount_a: pool.amount_a,
                amount_b: pool.amount_b,
                lp_tokens: pool.lp_tokens,
                price_a_irt: self.price_or_zero(&pool.currency_a, BaseCurrency::Irt).await,
                price_b_irt: self.price_or_zero(&pool.currency_b, BaseCurrency::Irt).await,
                price_a_usdt: self.price_or_zero(&pool.currency_a, BaseCurrency::Usdt).await,
                price_b_usdt: self.price_or_zero(&pool.currency_b, BaseCurrency::Usdt).await,
                price_a_btc: self.price_or_zero(&pool.currency_a, BaseCurrency::Btc).await,
                price_b_btc: self.price_or_zero(&pool.currency_b, BaseCurrency::Btc).await,
                recorded_at: Utc::now(),
            };
            taken.push(snapshot.clone());
            self.snapshots.write().await.push(snapshot);
        }
        taken
    }

    /// Provider transactions, newest first, optionally limited to one pool.
    pub async fn provider_txs(&self, pool_id: Option<Uuid>) -> Vec<ProviderTxRecord> {
        let rows = self.provider_txs.read().await;
        let mut out: Vec<ProviderTxRecord> = rows
            .iter()
            .filter(|record| pool_id.is_none_or(|id| record.pool_id == id))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        out
    }

    /// Provider transactions within `[start, end]`, newest first.
    pub async fn provider_txs_in_range(
        &self,
        pool_id: Option<Uuid>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<ProviderTxRecord> {
        self.provider_txs(pool_id)
            .await
            .into_iter()
            .filter(|record| record.recorded_at >= start && record.recorded_at <= end)
            .collect()
    }

    /// The provider's first-ever transaction: the anchor for their primary
    /// (first-deposit) share and amounts.
    pub async fn first_provider_tx(
        &self,
        user_id: Uuid,
        pool_id: Uuid,
    ) -> Option<ProviderTxRecord> {
        let rows = self.provider_txs.read().await;
        rows.iter()
            .filter(|record| record.user_id == user_id && record.pool_id == pool_id)
            .min_by_key(|record| record.recorded_at)
            .cloned()
    }

    /// Swaps, newest first, optionally limited to a user and/or pool.
    pub async fn swaps(&self, user_id: Option<Uuid>, pool_id: Option<Uuid>) -> Vec<SwapRecord> {
        let rows = self.swaps.read().await;
        let mut out: Vec<SwapRecord> = rows
            .iter()
            .filter(|record| user_id.is_none_or(|id| record.user_id == id))
            .filter(|record| pool_id.is_none_or(|id| record.pool_id == id))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        out
    }

    /// Swaps within `[start, end]`, newest first.
    pub async fn swaps_in_range(
        &self,
        pool_id: Option<Uuid>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<SwapRecord> {
        self.swaps(None, pool_id)
            .await
            .into_iter()
            .filter(|record| record.recorded_at >= start && record.recorded_at <= end)
            .collect()
    }

    /// Snapshots taken for one pool, newest first.
    pub async fn snapshots_for_pool(&self, pool_id: Uuid) -> Vec<PoolSnapshot> {
        let rows = self.snapshots.read().await;
        let mut out: Vec<PoolSnapshot> = rows
            .iter()
            .filter(|snapshot| snapshot.pool_id == pool_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        out
    }

    /// Total fees a pool has collected, split by side.
    ///
    /// A swap's fee is denominated in its output currency, so input-A swaps
    /// accumulate on the B side and vice versa. `base == None` values the
    /// total in currency B at the pool's spot price.
    pub async fn pool_fee_totals(
        &self,
        pool: &Pool,
        base: Option<BaseCurrency>,
    ) -> Result<FeeTotals, EngineError> {
        let mut fees_a = Decimal::ZERO;
        let mut fees_b = Decimal::ZERO;
        for record in self.swaps(None, Some(pool.id)).await {
            if record.input_currency == pool.currency_a {
                fees_b += record.fee_amount;
            } else {
                fees_a += record.fee_amount;
            }
        }

        let total_value = match base {
            None => match pool.spot_price(false) {
                Some(price) => fees_b + fees_a * price.value,
                None if fees_a.is_zero() => fees_b,
                None => return Err(EngineError::InsufficientLiquidity),
            },
            Some(base) => {
                let price_a = self.resolver.price(&pool.currency_a, base).await?;
                let price_b = self.resolver.price(&pool.currency_b, base).await?;
                fees_a * price_a.value + fees_b * price_b.value
            }
        };

        Ok(FeeTotals {
            currency_a: fees_a,
            currency_b: fees_b,
            total_value,
        })
    }

    /// Total fees collected in one currency across every pool holding it.
    pub async fn currency_fee_totals(
        &self,
        currency: &CurrencyCode,
        base: Option<BaseCurrency>,
    ) -> Result<CurrencyFees, EngineError> {
        let mut amount = Decimal::ZERO;
        for shared in self.registry.filter_by_currency(currency).await {
            let pool_id = shared.read().await.id;
            for record in self.swaps(None, Some(pool_id)).await {
                if record.output_currency == *currency {
                    amount += record.fee_amount;
                }
            }
        }
        let value = match base {
            None => amount,
            Some(base) => amount * self.resolver.price(currency, base).await?.value,
        };
        Ok(CurrencyFees { amount, value })
    }

    /// Swap volume within `[start, end]` valued in IRT at current prices.
    pub async fn volume_in_irt(
        &self,
        pool_id: Option<Uuid>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Decimal {
        let mut volume = Decimal::ZERO;
        for record in self.swaps_in_range(pool_id, start, end).await {
            let price = self
                .price_or_zero(&record.input_currency, BaseCurrency::Irt)
                .await;
            volume += record.input_amount * price;
        }
        volume
    }
}
