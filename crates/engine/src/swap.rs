//! Swap quoting and committing.

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use swap_domain::entities::{Pool, SwapRecord};
use swap_domain::error::EngineError;
use swap_domain::fees::FeeConfig;
use swap_domain::math::{SwapBreakdown, equating_swap_amount, swap_breakdown};
use swap_domain::value_objects::{CurrencyCode, Price};

use crate::history::{HistoryRecorder, SwapCommitData};
use crate::registry::PoolRegistry;

/// Dry-run result of a swap. Quoting never mutates state; committing the
/// same input against an unmodified pool reproduces these numbers exactly.
#[derive(Debug, Clone, Serialize)]
pub struct SwapQuote {
    pub pool_id: Uuid,
    pub input_currency: CurrencyCode,
    pub output_currency: CurrencyCode,
    pub input_amount: Decimal,
    pub output_amount: Decimal,
    /// Protocol fee yield in the output currency.
    pub fee_amount: Decimal,
    pub fee_rate: Decimal,
    pub price_before: Price,
    pub price_after: Price,
    pub slippage: Decimal,
}

/// Constant-product swap engine over the registry's pools.
///
/// The fee configuration is an explicit argument to every call, so a quote
/// and its commit are pure functions of (pool state, input, fees).
#[derive(Clone)]
pub struct SwapEngine {
    registry: Arc<PoolRegistry>,
    recorder: Arc<HistoryRecorder>,
}

impl SwapEngine {
    #[must_use]
    pub fn new(registry: Arc<PoolRegistry>, recorder: Arc<HistoryRecorder>) -> Self {
        Self { registry, recorder }
    }

    fn breakdown_for(
        pool: &Pool,
        input_amount: Decimal,
        reversed: bool,
        fees: &FeeConfig,
    ) -> Result<(SwapQuote, SwapBreakdown), EngineError> {
        // An empty pool has no price to quote against; reject before any
        // curve arithmetic.
        if pool.is_empty() {
            return Err(EngineError::InsufficientLiquidity);
        }
        let price_before = pool
            .spot_price(reversed)
            .ok_or(EngineError::InsufficientLiquidity)?;

        let (own, other) = pool.oriented_reserves(reversed);
        let breakdown = swap_breakdown(own, other, input_amount, fees)?;
        let (input_currency, output_currency) = pool.oriented_currencies(reversed);

        let quote = SwapQuote {
            pool_id: pool.id,
            input_currency,
            output_currency,
            input_amount,
            output_amount: breakdown.output_amount,
            fee_amount: breakdown.fee_amount,
            fee_rate: fees.total_rate(),
            price_before,
            price_after: breakdown.final_price,
            slippage: breakdown.slippage,
        };
        Ok((quote, breakdown))
    }

    /// Quotes a swap against the pool's current reserves. Runs under a read
    /// lock and may execute fully in parallel across callers.
    pub async fn quote(
        &self,
        pool_id: Uuid,
        input_amount: Decimal,
        reversed: bool,
        fees: &FeeConfig,
    ) -> Result<SwapQuote, EngineError> {
        let shared = self
            .registry
            .find(pool_id)
            .await
            .ok_or(EngineError::PoolNotFound)?;
        let pool = shared.read().await;
        Self::breakdown_for(&pool, input_amount, reversed, fees).map(|(quote, _)| quote)
    }

    /// Commits a swap.
    ///
    /// Under the pool's write lock the engine re-validates suspension,
    /// liquidity, and the caller's slippage bound against the *current*
    /// reserves (not against any earlier quote), then applies the final
    /// reserves in one step. The history row is appended after the lock is
    /// released and before this call returns; wallet movements are the
    /// caller's to sequence after that.
    pub async fn commit(
        &self,
        pool_id: Uuid,
        user_id: Uuid,
        input_amount: Decimal,
        reversed: bool,
        max_slippage: Decimal,
        fees: &FeeConfig,
    ) -> Result<SwapRecord, EngineError> {
        let shared = self
            .registry
            .find(pool_id)
            .await
            .ok_or(EngineError::PoolNotFound)?;

        let quote = {
            let mut pool = shared.write().await;
            if pool.suspend_swap {
                return Err(EngineError::PoolSuspended);
            }
            let (quote, breakdown) = Self::breakdown_for(&pool, input_amount, reversed, fees)?;
            if quote.slippage > max_slippage {
                return Err(EngineError::SlippageExceeded {
                    computed: quote.slippage,
                    allowed: max_slippage,
                });
            }

            let (final_a, final_b) = if reversed {
                (breakdown.final_other_reserve, breakdown.final_own_reserve)
            } else {
                (breakdown.final_own_reserve, breakdown.final_other_reserve)
            };
            pool.apply_swap(final_a, final_b);
            quote
        };

        let record = self
            .recorder
            .record_swap(SwapCommitData {
                user_id,
                pool_id,
                input_currency: quote.input_currency,
                output_currency: quote.output_currency,
                input_amount: quote.input_amount,
                output_amount: quote.output_amount,
                fee_amount: quote.fee_amount,
                fee_rate: quote.fee_rate,
                price_before: quote.price_before.value,
                price_after: quote.price_after.value,
                slippage: quote.slippage,
            })
            .await;

        info!(
            pool = %pool_id,
            user = %user_id,
            input = %record.input_amount,
            output = %record.output_amount,
            slippage = %record.slippage,
            "Swap committed"
        );
        Ok(record)
    }

    /// The portion of `amount` of `currency` to swap so that the remaining
    /// input and the received output hold equal value, on current reserves.
    pub async fn equating_input(
        &self,
        pool_id: Uuid,
        currency: &CurrencyCode,
        amount: Decimal,
        fees: &FeeConfig,
    ) -> Result<Decimal, EngineError> {
        let shared = self
            .registry
            .find(pool_id)
            .await
            .ok_or(EngineError::PoolNotFound)?;
        let pool = shared.read().await;
        let own = if pool.currency_a == *currency {
            pool.amount_a
        } else if pool.currency_b == *currency {
            pool.amount_b
        } else {
            return Err(EngineError::CurrencyNotFound(currency.clone()));
        };
        equating_swap_amount(own, amount, fees)
    }
}
