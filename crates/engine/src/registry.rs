//! Pool ownership and pair lookup.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use swap_domain::entities::Pool;
use swap_domain::enums::SuspendScope;
use swap_domain::error::EngineError;
use swap_domain::value_objects::CurrencyCode;

/// A pool behind its own writer lock. Quotes take read guards; a commit
/// takes the write guard of exactly one pool, so operations on distinct
/// pools never serialize against each other.
pub type SharedPool = Arc<RwLock<Pool>>;

/// Result of a pair lookup: the pool plus whether the caller's A/B order is
/// reversed relative to the pool's stored order. Every downstream formula
/// takes the flag instead of re-deriving orientation from the symbols.
#[derive(Clone)]
pub struct PairLookup {
    pub pool: SharedPool,
    pub reversed: bool,
}

/// Owns the full set of pools.
///
/// Pools are kept in creation order, which makes every enumeration-order
/// tie-break (notably in the price resolver) deterministic. At most one pool
/// exists per unordered currency pair.
#[derive(Clone, Default)]
pub struct PoolRegistry {
    pools: Arc<RwLock<Vec<SharedPool>>>,
}

impl PoolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from persisted pool rows.
    #[must_use]
    pub fn from_pools(pools: Vec<Pool>) -> Self {
        let shared = pools
            .into_iter()
            .map(|pool| Arc::new(RwLock::new(pool)))
            .collect();
        Self {
            pools: Arc::new(RwLock::new(shared)),
        }
    }

    pub async fn find(&self, id: Uuid) -> Option<SharedPool> {
        let pools = self.pools.read().await;
        for shared in pools.iter() {
            if shared.read().await.id == id {
                return Some(shared.clone());
            }
        }
        None
    }

    /// Looks the pair up in the caller's order; with `allow_reverse` the
    /// opposite order is also tried, and a hit there sets `reversed`.
    pub async fn find_by_pair(
        &self,
        currency_a: &CurrencyCode,
        currency_b: &CurrencyCode,
        allow_reverse: bool,
    ) -> Option<PairLookup> {
        let pools = self.pools.read().await;
        for shared in pools.iter() {
            let pool = shared.read().await;
            if pool.is_pair(currency_a, currency_b) {
                return Some(PairLookup {
                    pool: shared.clone(),
                    reversed: false,
                });
            }
            if allow_reverse && pool.is_pair(currency_b, currency_a) {
                return Some(PairLookup {
                    pool: shared.clone(),
                    reversed: true,
                });
            }
        }
        None
    }

    /// Every pool with the currency on either side, in creation order.
    pub async fn filter_by_currency(&self, currency: &CurrencyCode) -> Vec<SharedPool> {
        let pools = self.pools.read().await;
        let mut matches = Vec::new();
        for shared in pools.iter() {
            if shared.read().await.contains(currency) {
                matches.push(shared.clone());
            }
        }
        matches
    }

    /// Creates a pool with zero reserves, enforcing unordered-pair
    /// uniqueness.
    pub async fn create(
        &self,
        currency_a: CurrencyCode,
        currency_b: CurrencyCode,
        rank: i32,
    ) -> Result<SharedPool, EngineError> {
        if currency_a == currency_b {
            return Err(EngineError::IdenticalCurrencies(currency_a));
        }
        if self
            .find_by_pair(&currency_a, &currency_b, true)
            .await
            .is_some()
        {
            return Err(EngineError::PoolAlreadyExists {
                currency_a,
                currency_b,
            });
        }

        let pool = Pool::new(currency_a.clone(), currency_b.clone(), rank);
        let id = pool.id;
        let shared = Arc::new(RwLock::new(pool));
        self.pools.write().await.push(shared.clone());

        info!(pool = %id, pair = %format!("{currency_a}-{currency_b}"), rank, "Pool created");
        Ok(shared)
    }

    /// All pools ordered by display rank.
    pub async fn list(&self) -> Vec<SharedPool> {
        let pools = self.pools.read().await;
        let mut ranked = Vec::with_capacity(pools.len());
        for shared in pools.iter() {
            let rank = shared.read().await.rank;
            ranked.push((rank, shared.clone()));
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, shared)| shared).collect()
    }

    /// Deduplicated union of every currency appearing in any pool, in
    /// first-seen order.
    pub async fn currency_symbols(&self) -> Vec<CurrencyCode> {
        let pools = self.pools.read().await;
        let mut symbols: Vec<CurrencyCode> = Vec::new();
        for shared in pools.iter() {
            let pool = shared.read().await;
            if !symbols.contains(&pool.currency_a) {
                symbols.push(pool.currency_a.clone());
            }
            if !symbols.contains(&pool.currency_b) {
                symbols.push(pool.currency_b.clone());
            }
        }
        symbols
    }

    /// Raises the pool's suspension flag(s); idempotent.
    pub async fn suspend(&self, id: Uuid, scope: SuspendScope) -> Result<(), EngineError> {
        let shared = self.find(id).await.ok_or(EngineError::PoolNotFound)?;
        let mut pool = shared.write().await;
        pool.suspend(scope);
        info!(pool = %id, ?scope, "Pool suspended");
        Ok(())
    }

    /// Rank for the next provisioned pool: one past the current maximum.
    pub async fn next_rank(&self) -> i32 {
        let pools = self.pools.read().await;
        let mut max_rank = 0;
        for shared in pools.iter() {
            max_rank = max_rank.max(shared.read().await.rank);
        }
        max_rank + 1
    }

    /// Cloned rows of every pool, for persistence and reporting.
    pub async fn snapshot(&self) -> Vec<Pool> {
        let pools = self.pools.read().await;
        let mut rows = Vec::with_capacity(pools.len());
        for shared in pools.iter() {
            rows.push(shared.read().await.clone());
        }
        rows
    }
}
