//! Liquidity provisioning and LP-token accounting.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use swap_domain::entities::{Pool, Provider, ProviderTxRecord};
use swap_domain::enums::{BaseCurrency, ProviderTxKind};
use swap_domain::error::EngineError;
use swap_domain::math::{initial_lp_tokens, proportional_lp_tokens, removal_amounts};
use swap_domain::value_objects::{Percentage, Price};

use crate::collaborators::PriceOracle;
use crate::history::HistoryRecorder;
use crate::pricing::PriceResolver;
use crate::registry::{PoolRegistry, SharedPool};

/// Paired-deposit sides must match in value within this tolerance, in USDT.
const VALUE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1

/// Dry-run result of adding liquidity.
#[derive(Debug, Clone, Serialize)]
pub struct AddQuote {
    pub pool_id: Uuid,
    pub amount_a: Decimal,
    /// The B-side amount that balances `amount_a` at the pool price (or at
    /// oracle prices for an empty pool).
    pub required_amount_b: Decimal,
    /// LP tokens this deposit would mint (the delta for an existing
    /// position).
    pub minted_lp_tokens: Decimal,
    /// The provider's share after the deposit.
    pub new_share: Percentage,
    /// The provider's entitlements after the deposit.
    pub new_amount_a: Decimal,
    pub new_amount_b: Decimal,
    /// Pool spot price used for the derivation; `None` for an empty pool.
    pub pool_price: Option<Price>,
}

/// Dry-run result of removing liquidity.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveQuote {
    pub pool_id: Uuid,
    pub burned_lp_tokens: Decimal,
    pub received_amount_a: Decimal,
    pub received_amount_b: Decimal,
    pub new_share: Percentage,
}

/// A provider's first-deposit footprint, recovered from their first
/// history row.
#[derive(Debug, Clone, Serialize)]
pub struct PrimaryPosition {
    pub share: Percentage,
    pub amount_a: Decimal,
    pub amount_b: Decimal,
}

/// Full view of one (user, pool) position.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderPosition {
    pub is_active: bool,
    /// The position's current value in IRT.
    pub tvl_irt: Decimal,
    pub present_share: Percentage,
    pub present_amount_a: Decimal,
    pub present_amount_b: Decimal,
    /// `None` when no history row exists for the provider.
    pub primary: Option<PrimaryPosition>,
}

/// Add/remove liquidity against a pool, with per-provider share accounting.
///
/// Lock order is always pool, then provider map; no collaborator call is
/// awaited while either lock is held.
#[derive(Clone)]
pub struct LiquidityLedger {
    registry: Arc<PoolRegistry>,
    resolver: Arc<PriceResolver>,
    oracle: Arc<dyn PriceOracle>,
    recorder: Arc<HistoryRecorder>,
    providers: Arc<RwLock<HashMap<(Uuid, Uuid), Provider>>>,
}

impl LiquidityLedger {
    #[must_use]
    pub fn new(
        registry: Arc<PoolRegistry>,
        resolver: Arc<PriceResolver>,
        oracle: Arc<dyn PriceOracle>,
        recorder: Arc<HistoryRecorder>,
    ) -> Self {
        Self {
            registry,
            resolver,
            oracle,
            recorder,
            providers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn shared_pool(&self, pool_id: Uuid) -> Result<SharedPool, EngineError> {
        self.registry
            .find(pool_id)
            .await
            .ok_or(EngineError::PoolNotFound)
    }

    /// The provider row for (user, pool), if one was ever created.
    pub async fn provider(&self, user_id: Uuid, pool_id: Uuid) -> Option<Provider> {
        self.providers
            .read()
            .await
            .get(&(user_id, pool_id))
            .cloned()
    }

    /// Every provider row of one pool.
    pub async fn providers_of_pool(&self, pool_id: Uuid) -> Vec<Provider> {
        self.providers
            .read()
            .await
            .values()
            .filter(|provider| provider.pool_id == pool_id)
            .cloned()
            .collect()
    }

    /// A user's positions with their pools, ordered by pool rank.
    pub async fn pools_of_user(
        &self,
        user_id: Uuid,
        only_with_liquidity: bool,
    ) -> Vec<(Provider, SharedPool)> {
        let rows: Vec<Provider> = self
            .providers
            .read()
            .await
            .values()
            .filter(|provider| provider.user_id == user_id)
            .filter(|provider| !only_with_liquidity || provider.has_liquidity())
            .cloned()
            .collect();

        let mut ranked = Vec::with_capacity(rows.len());
        for provider in rows {
            if let Some(shared) = self.registry.find(provider.pool_id).await {
                let rank = shared.read().await.rank;
                ranked.push((rank, provider, shared));
            }
        }
        ranked.sort_by_key(|(rank, _, _)| *rank);
        ranked
            .into_iter()
            .map(|(_, provider, shared)| (provider, shared))
            .collect()
    }

    /// Derives the B amount balancing `amount_a`, plus the price used.
    ///
    /// A priced pool uses its spot price. An empty pool has no price, so
    /// both sides are valued through the oracle in USDT and the B amount is
    /// solved for equal value.
    async fn required_amount_b(
        &self,
        pool: &Pool,
        amount_a: Decimal,
    ) -> Result<(Decimal, Option<Price>), EngineError> {
        match pool.spot_price(false) {
            Some(price) => Ok((price.value * amount_a, Some(price))),
            None => {
                let unit_a = self
                    .oracle
                    .value_in_base(&pool.currency_a, Decimal::ONE, BaseCurrency::Usdt)
                    .await?;
                let unit_b = self
                    .oracle
                    .value_in_base(&pool.currency_b, Decimal::ONE, BaseCurrency::Usdt)
                    .await?;
                if unit_b.is_zero() {
                    return Err(EngineError::CurrencyNotFound(pool.currency_b.clone()));
                }
                Ok((amount_a * unit_a / unit_b, None))
            }
        }
    }

    fn minted_for(pool: &Pool, amount_a: Decimal, amount_b: Decimal) -> Result<Decimal, EngineError> {
        if pool.is_empty() {
            initial_lp_tokens(amount_a, amount_b)
        } else {
            proportional_lp_tokens(amount_a, amount_b, pool.amount_a, pool.amount_b, pool.lp_tokens)
        }
    }

    /// Quotes a deposit of `amount_a` of the pool's A side.
    ///
    /// Two sequential quotes against the same pool state return the same
    /// required B amount.
    pub async fn quote_add(
        &self,
        pool_id: Uuid,
        user_id: Uuid,
        amount_a: Decimal,
    ) -> Result<AddQuote, EngineError> {
        if amount_a <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_a));
        }
        let shared = self.shared_pool(pool_id).await?;
        let pool = shared.read().await.clone();

        let (required_b, pool_price) = self.required_amount_b(&pool, amount_a).await?;
        let minted = Self::minted_for(&pool, amount_a, required_b)?;

        let existing = self.provider(user_id, pool_id).await;
        let existing_lp = existing
            .as_ref()
            .map(|provider| provider.lp_tokens)
            .unwrap_or(Decimal::ZERO);
        let new_share = Percentage::new((existing_lp + minted) / (pool.lp_tokens + minted));

        let (held_a, held_b) = existing
            .as_ref()
            .map(|provider| (provider.amount_a(&pool), provider.amount_b(&pool)))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        Ok(AddQuote {
            pool_id,
            amount_a,
            required_amount_b: required_b,
            minted_lp_tokens: minted,
            new_share,
            new_amount_a: amount_a + held_a,
            new_amount_b: required_b + held_b,
            pool_price,
        })
    }

    /// Checks that the provided B amount matches the required one in value,
    /// within [`VALUE_TOLERANCE`] USDT.
    async fn guard_equal_value(
        &self,
        pool: &Pool,
        required_b: Decimal,
        provided_b: Decimal,
        priced: bool,
        amount_a: Decimal,
    ) -> Result<(), EngineError> {
        if priced {
            let required_value = self
                .oracle
                .value_in_base(&pool.currency_b, required_b, BaseCurrency::Usdt)
                .await?;
            let provided_value = self
                .oracle
                .value_in_base(&pool.currency_b, provided_b, BaseCurrency::Usdt)
                .await?;
            if (required_value - provided_value).abs() > VALUE_TOLERANCE {
                return Err(EngineError::ValueMismatch {
                    required_value,
                    provided_value,
                    required_amount_b: required_b,
                });
            }
        } else {
            let value_a = self
                .oracle
                .value_in_base(&pool.currency_a, amount_a, BaseCurrency::Usdt)
                .await?;
            let value_b = self
                .oracle
                .value_in_base(&pool.currency_b, provided_b, BaseCurrency::Usdt)
                .await?;
            if (value_a - value_b).abs() > VALUE_TOLERANCE {
                return Err(EngineError::ValueMismatch {
                    required_value: value_a,
                    provided_value: value_b,
                    required_amount_b: required_b,
                });
            }
        }
        Ok(())
    }

    /// Commits a deposit.
    ///
    /// The value-equivalence guard runs against a snapshot before the pool
    /// write lock is taken (the oracle is never awaited under the lock);
    /// the deposited B amount and the minted tokens are then re-derived from
    /// the pool's current state inside the lock. The deposited B side is the
    /// *derived* balancing amount; the caller's `amount_b` only proves they
    /// brought equivalent value.
    pub async fn commit_add(
        &self,
        pool_id: Uuid,
        user_id: Uuid,
        amount_a: Decimal,
        amount_b: Decimal,
    ) -> Result<ProviderTxRecord, EngineError> {
        if amount_a <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_a));
        }
        if amount_b <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_b));
        }

        let shared = self.shared_pool(pool_id).await?;
        let snapshot = shared.read().await.clone();
        if snapshot.suspend_providing {
            return Err(EngineError::PoolSuspended);
        }

        let (required_b, price) = self.required_amount_b(&snapshot, amount_a).await?;
        self.guard_equal_value(&snapshot, required_b, amount_b, price.is_some(), amount_a)
            .await?;

        let (provider, pool_after, deposit_b, minted) = {
            let mut pool = shared.write().await;
            if pool.suspend_providing {
                return Err(EngineError::PoolSuspended);
            }
            // Re-derive against current reserves; the guard above may have
            // raced a commit on the same pool.
            let deposit_b = match pool.spot_price(false) {
                Some(price) => price.value * amount_a,
                None => required_b,
            };
            let minted = Self::minted_for(&pool, amount_a, deposit_b)?;

            let mut providers = self.providers.write().await;
            let provider = providers
                .entry((user_id, pool_id))
                .or_insert_with(|| Provider::new(user_id, pool_id));
            provider.lp_tokens += minted;
            let provider = provider.clone();
            drop(providers);

            pool.deposit(amount_a, deposit_b, minted);
            (provider, pool.clone(), deposit_b, minted)
        };

        let record = self
            .recorder
            .record_provider_tx(
                &provider,
                &pool_after,
                ProviderTxKind::Add,
                amount_a,
                deposit_b,
                minted,
                pool_after.lp_tokens,
            )
            .await;

        info!(
            pool = %pool_id,
            user = %user_id,
            amount_a = %amount_a,
            amount_b = %deposit_b,
            minted = %minted,
            "Liquidity added"
        );
        Ok(record)
    }

    /// Quotes withdrawing `share_percent` of the caller's position.
    pub async fn quote_remove(
        &self,
        pool_id: Uuid,
        user_id: Uuid,
        share_percent: Decimal,
    ) -> Result<RemoveQuote, EngineError> {
        if share_percent <= Decimal::ZERO || share_percent > Decimal::ONE {
            return Err(EngineError::RemovePercentOutOfRange(share_percent));
        }
        let shared = self.shared_pool(pool_id).await?;
        let pool = shared.read().await.clone();
        if pool.is_empty() {
            return Err(EngineError::InsufficientLiquidity);
        }
        let provider = self
            .provider(user_id, pool_id)
            .await
            .ok_or(EngineError::ProviderNotFound)?;
        if !provider.has_liquidity() {
            return Err(EngineError::InsufficientLiquidity);
        }

        let burn = provider.lp_tokens * share_percent;
        let (received_a, received_b) =
            removal_amounts(pool.amount_a, pool.amount_b, pool.lp_tokens, burn)?;
        let remaining_total = pool.lp_tokens - burn;
        let new_share = if remaining_total.is_zero() {
            Percentage::new(Decimal::ZERO)
        } else {
            Percentage::new((provider.lp_tokens - burn) / remaining_total)
        };

        Ok(RemoveQuote {
            pool_id,
            burned_lp_tokens: burn,
            received_amount_a: received_a,
            received_amount_b: received_b,
            new_share,
        })
    }

    /// Commits a withdrawal, burning the tokens and paying out proportional
    /// reserves. Amounts are re-derived from current state under the pool
    /// write lock.
    pub async fn commit_remove(
        &self,
        pool_id: Uuid,
        user_id: Uuid,
        share_percent: Decimal,
    ) -> Result<ProviderTxRecord, EngineError> {
        if share_percent <= Decimal::ZERO || share_percent > Decimal::ONE {
            return Err(EngineError::RemovePercentOutOfRange(share_percent));
        }
        let shared = self.shared_pool(pool_id).await?;

        let (provider, pool_after, received_a, received_b, burn) = {
            let mut pool = shared.write().await;
            if pool.suspend_providing {
                return Err(EngineError::PoolSuspended);
            }
            if pool.is_empty() {
                return Err(EngineError::InsufficientLiquidity);
            }

            let mut providers = self.providers.write().await;
            let provider = providers
                .get_mut(&(user_id, pool_id))
                .ok_or(EngineError::ProviderNotFound)?;
            if !provider.has_liquidity() {
                return Err(EngineError::InsufficientLiquidity);
            }

            let burn = provider.lp_tokens * share_percent;
            let (received_a, received_b) =
                removal_amounts(pool.amount_a, pool.amount_b, pool.lp_tokens, burn)?;
            provider.lp_tokens -= burn;
            let provider = provider.clone();
            drop(providers);

            pool.withdraw(received_a, received_b, burn);
            (provider, pool.clone(), received_a, received_b, burn)
        };

        let record = self
            .recorder
            .record_provider_tx(
                &provider,
                &pool_after,
                ProviderTxKind::Remove,
                received_a,
                received_b,
                burn,
                pool_after.lp_tokens,
            )
            .await;

        info!(
            pool = %pool_id,
            user = %user_id,
            amount_a = %received_a,
            amount_b = %received_b,
            burned = %burn,
            "Liquidity removed"
        );
        Ok(record)
    }

    /// Present and primary (first-deposit) view of a position.
    pub async fn position(
        &self,
        user_id: Uuid,
        pool_id: Uuid,
    ) -> Result<ProviderPosition, EngineError> {
        let provider = self
            .provider(user_id, pool_id)
            .await
            .ok_or(EngineError::ProviderNotFound)?;
        let shared = self.shared_pool(pool_id).await?;
        let pool = shared.read().await.clone();

        let present_amount_a = provider.amount_a(&pool);
        let present_amount_b = provider.amount_b(&pool);
        let tvl_irt = self
            .resolver
            .pool_tvl(
                &pool,
                Some(BaseCurrency::Irt),
                Some((present_amount_a, present_amount_b)),
            )
            .await?;

        let primary = self
            .recorder
            .first_provider_tx(user_id, pool_id)
            .await
            .map(|record| PrimaryPosition {
                share: Percentage::new(if record.lp_tokens_pool_total.is_zero() {
                    Decimal::ZERO
                } else {
                    record.lp_tokens_delta / record.lp_tokens_pool_total
                }),
                amount_a: record.amount_a,
                amount_b: record.amount_b,
            });

        Ok(ProviderPosition {
            is_active: provider.has_liquidity(),
            tvl_irt,
            present_share: provider.share(&pool),
            present_amount_a,
            present_amount_b,
            primary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::FixedPriceOracle;
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;
    use swap_domain::value_objects::CurrencyCode;

    fn code(symbol: &str) -> CurrencyCode {
        CurrencyCode::new(symbol)
    }

    struct Fixture {
        ledger: LiquidityLedger,
        pool_id: Uuid,
    }

    /// ETH-USDT pool; oracle prices keep a 1:2000 deposit value-balanced.
    async fn fixture() -> Fixture {
        let registry = Arc::new(PoolRegistry::new());
        let shared = registry.create(code("ETH"), code("USDT"), 1).await.unwrap();
        let pool_id = shared.read().await.id;

        let oracle = Arc::new(
            FixedPriceOracle::new()
                .with_price(code("ETH"), BaseCurrency::Usdt, dec!(2000))
                .with_price(code("USDT"), BaseCurrency::Usdt, Decimal::ONE)
                .with_price(code("ETH"), BaseCurrency::Irt, dec!(120000000))
                .with_price(code("USDT"), BaseCurrency::Irt, dec!(60000)),
        );
        let resolver = Arc::new(PriceResolver::new(registry.clone(), oracle.clone()));
        let recorder = Arc::new(HistoryRecorder::new(registry.clone(), resolver.clone()));
        let ledger = LiquidityLedger::new(registry, resolver, oracle, recorder);
        Fixture { ledger, pool_id }
    }

    #[tokio::test]
    async fn first_deposit_mints_sqrt_and_fills_the_pool() {
        let Fixture { ledger, pool_id } = fixture().await;
        let user = Uuid::new_v4();

        let record = ledger
            .commit_add(pool_id, user, dec!(10), dec!(20000))
            .await
            .unwrap();

        // sqrt(10 * 20_000) = sqrt(200_000)
        assert!((record.lp_tokens_delta - dec!(447.2135954)).abs() < dec!(0.0001));
        assert_eq!(record.lp_tokens_delta, record.lp_tokens_pool_total);

        let provider = ledger.provider(user, pool_id).await.unwrap();
        assert!(provider.has_liquidity());
    }

    #[tokio::test]
    async fn add_quote_derives_required_b_from_the_pool_price() {
        let Fixture { ledger, pool_id } = fixture().await;
        let user = Uuid::new_v4();
        ledger
            .commit_add(pool_id, user, dec!(10), dec!(20000))
            .await
            .unwrap();

        let quote = ledger.quote_add(pool_id, user, dec!(1)).await.unwrap();
        assert_eq!(quote.required_amount_b, dec!(2000));
        assert_eq!(quote.pool_price.unwrap().value, dec!(2000));

        // Share after the deposit: minted / (supply before + minted).
        let supply_before = dec!(200000).sqrt().unwrap();
        assert_eq!(
            quote.new_share.as_decimal(),
            quote.minted_lp_tokens / (supply_before + quote.minted_lp_tokens)
        );

        // Idempotent: same state, same answer.
        let again = ledger.quote_add(pool_id, user, dec!(1)).await.unwrap();
        assert_eq!(again.required_amount_b, quote.required_amount_b);
        assert_eq!(again.minted_lp_tokens, quote.minted_lp_tokens);
    }

    #[tokio::test]
    async fn empty_pool_quote_uses_oracle_values() {
        let Fixture { ledger, pool_id } = fixture().await;
        let quote = ledger
            .quote_add(pool_id, Uuid::new_v4(), dec!(10))
            .await
            .unwrap();
        // 10 ETH * 2000 / 1 = 20_000 USDT for equal value.
        assert_eq!(quote.required_amount_b, dec!(20000));
        assert_eq!(quote.pool_price, None);
    }

    #[tokio::test]
    async fn later_deposit_mints_proportionally() {
        let Fixture { ledger, pool_id } = fixture().await;
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        ledger
            .commit_add(pool_id, first, dec!(10), dec!(20000))
            .await
            .unwrap();

        // 10% of the pool.
        let record = ledger
            .commit_add(pool_id, second, dec!(1), dec!(2000))
            .await
            .unwrap();
        let total_before = dec!(200000).sqrt().unwrap();
        assert!((record.lp_tokens_delta - total_before * dec!(0.1)).abs() < dec!(0.0001));

        let shared = ledger.registry.find(pool_id).await.unwrap();
        let pool = shared.read().await;
        assert_eq!(pool.amount_a, dec!(11));
        assert_eq!(pool.amount_b, dec!(22000));
    }

    #[tokio::test]
    async fn mismatched_value_is_rejected_with_numbers() {
        let Fixture { ledger, pool_id } = fixture().await;
        let err = ledger
            .commit_add(pool_id, Uuid::new_v4(), dec!(10), dec!(5000))
            .await
            .unwrap_err();
        match err {
            EngineError::ValueMismatch {
                required_value,
                provided_value,
                required_amount_b,
            } => {
                assert_eq!(required_value, dec!(20000));
                assert_eq!(provided_value, dec!(5000));
                assert_eq!(required_amount_b, dec!(20000));
            }
            other => panic!("expected ValueMismatch, got {other:?}"),
        }

        // Nothing was minted or deposited.
        let shared = ledger.registry.find(pool_id).await.unwrap();
        assert!(shared.read().await.is_empty());
    }

    #[tokio::test]
    async fn remove_pays_out_proportionally() {
        let Fixture { ledger, pool_id } = fixture().await;
        let user = Uuid::new_v4();
        ledger
            .commit_add(pool_id, user, dec!(10), dec!(20000))
            .await
            .unwrap();

        let quote = ledger.quote_remove(pool_id, user, dec!(0.5)).await.unwrap();
        assert_eq!(quote.received_amount_a, dec!(5));
        assert_eq!(quote.received_amount_b, dec!(10000));

        let record = ledger.commit_remove(pool_id, user, dec!(0.5)).await.unwrap();
        assert_eq!(record.amount_a, quote.received_amount_a);

        let provider = ledger.provider(user, pool_id).await.unwrap();
        let shared = ledger.registry.find(pool_id).await.unwrap();
        let pool = shared.read().await;
        assert_eq!(provider.share(&pool).as_decimal(), Decimal::ONE);
        assert_eq!(pool.amount_a, dec!(5));
    }

    #[tokio::test]
    async fn remove_rejects_zero_percent_and_empty_positions() {
        let Fixture { ledger, pool_id } = fixture().await;
        let user = Uuid::new_v4();

        let err = ledger
            .quote_remove(pool_id, user, Decimal::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::RemovePercentOutOfRange(_)));

        ledger
            .commit_add(pool_id, user, dec!(10), dec!(20000))
            .await
            .unwrap();
        let stranger = Uuid::new_v4();
        let err = ledger
            .quote_remove(pool_id, stranger, dec!(0.5))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ProviderNotFound));

        // Withdraw everything, then try again: row survives at zero tokens.
        ledger.commit_remove(pool_id, user, Decimal::ONE).await.unwrap();
        assert!(ledger.provider(user, pool_id).await.is_some());
        let err = ledger
            .commit_remove(pool_id, user, dec!(0.5))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientLiquidity));
    }

    #[tokio::test]
    async fn position_reports_present_and_primary() {
        let Fixture { ledger, pool_id } = fixture().await;
        let user = Uuid::new_v4();
        ledger
            .commit_add(pool_id, user, dec!(10), dec!(20000))
            .await
            .unwrap();
        // A second provider halves the first one's share.
        ledger
            .commit_add(pool_id, Uuid::new_v4(), dec!(10), dec!(20000))
            .await
            .unwrap();

        let position = ledger.position(user, pool_id).await.unwrap();
        assert!(position.is_active);
        assert_eq!(position.present_share.as_decimal(), dec!(0.5));
        assert_eq!(position.present_amount_a, dec!(10));

        let primary = position.primary.unwrap();
        assert_eq!(primary.share.as_decimal(), Decimal::ONE);
        assert_eq!(primary.amount_a, dec!(10));
        assert_eq!(primary.amount_b, dec!(20000));
    }

    #[tokio::test]
    async fn suspended_providing_blocks_commits() {
        let Fixture { ledger, pool_id } = fixture().await;
        ledger
            .registry
            .suspend(pool_id, swap_domain::enums::SuspendScope::Providing)
            .await
            .unwrap();
        let err = ledger
            .commit_add(pool_id, Uuid::new_v4(), dec!(10), dec!(20000))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::PoolSuspended));
    }
}
