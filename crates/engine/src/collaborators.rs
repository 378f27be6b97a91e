//! Contracts consumed from the surrounding exchange, plus in-memory
//! reference implementations for tests and tooling.
//!
//! The engine never moves user funds itself: wallet debits/credits are the
//! caller's responsibility, sequenced strictly after a successful commit.
//! Implementations of these traits must not call back into the engine; they
//! may be awaited while no pool write lock is held.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use swap_domain::enums::BaseCurrency;
use swap_domain::error::EngineError;
use swap_domain::fees::FeeConfig;
use swap_domain::value_objects::CurrencyCode;

/// Option name for the total swap fee rate.
pub const SWAP_FEE: &str = "swap_fee";
/// Option name for the provider-retained swap fee rate.
pub const SWAP_PROVIDERS_FEE: &str = "swap_providers_fee";

/// User balance ledger. Checked and moved by the caller around each
/// operation; the engine only defines the seam.
#[async_trait]
pub trait WalletLedger: Send + Sync {
    async fn available(
        &self,
        user_id: Uuid,
        currency: &CurrencyCode,
    ) -> Result<Decimal, EngineError>;

    /// Fails with [`EngineError::InsufficientBalance`] carrying the numbers.
    async fn debit(
        &self,
        user_id: Uuid,
        currency: &CurrencyCode,
        amount: Decimal,
    ) -> Result<(), EngineError>;

    async fn credit(
        &self,
        user_id: Uuid,
        currency: &CurrencyCode,
        amount: Decimal,
    ) -> Result<(), EngineError>;
}

/// Reference-price feed, consulted only when no pool-based price path
/// exists for a currency.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Values `amount` of `currency` in the given base.
    async fn value_in_base(
        &self,
        currency: &CurrencyCode,
        amount: Decimal,
        base: BaseCurrency,
    ) -> Result<Decimal, EngineError>;
}

/// Admin-configurable fee-rate store.
#[async_trait]
pub trait FeeRateStore: Send + Sync {
    async fn rate(&self, name: &str) -> Result<Decimal, EngineError>;
}

/// Reads the swap fee pair out of a [`FeeRateStore`] and validates it.
pub async fn load_fee_config(store: &dyn FeeRateStore) -> Result<FeeConfig, EngineError> {
    let total = store.rate(SWAP_FEE).await?;
    let provider = store.rate(SWAP_PROVIDERS_FEE).await?;
    FeeConfig::new(total, provider)
}

/// In-memory wallet ledger.
#[derive(Debug, Default)]
pub struct InMemoryWallet {
    balances: Arc<RwLock<HashMap<(Uuid, CurrencyCode), Decimal>>>,
}

impl InMemoryWallet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletLedger for InMemoryWallet {
    async fn available(
        &self,
        user_id: Uuid,
        currency: &CurrencyCode,
    ) -> Result<Decimal, EngineError> {
        let balances = self.balances.read().await;
        Ok(balances
            .get(&(user_id, currency.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    async fn debit(
        &self,
        user_id: Uuid,
        currency: &CurrencyCode,
        amount: Decimal,
    ) -> Result<(), EngineError> {
        let mut balances = self.balances.write().await;
        let balance = balances
            .entry((user_id, currency.clone()))
            .or_insert(Decimal::ZERO);
        if *balance < amount {
            return Err(EngineError::InsufficientBalance {
                currency: currency.clone(),
                available: *balance,
                required: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }

    async fn credit(
        &self,
        user_id: Uuid,
        currency: &CurrencyCode,
        amount: Decimal,
    ) -> Result<(), EngineError> {
        let mut balances = self.balances.write().await;
        *balances
            .entry((user_id, currency.clone()))
            .or_insert(Decimal::ZERO) += amount;
        Ok(())
    }
}

/// Oracle over a fixed table of unit prices.
#[derive(Debug, Default)]
pub struct FixedPriceOracle {
    unit_prices: HashMap<(CurrencyCode, BaseCurrency), Decimal>,
}

impl FixedPriceOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-unit price of `currency` in `base`.
    #[must_use]
    pub fn with_price(mut self, currency: CurrencyCode, base: BaseCurrency, price: Decimal) -> Self {
        self.unit_prices.insert((currency, base), price);
        self
    }
}

#[async_trait]
impl PriceOracle for FixedPriceOracle {
    async fn value_in_base(
        &self,
        currency: &CurrencyCode,
        amount: Decimal,
        base: BaseCurrency,
    ) -> Result<Decimal, EngineError> {
        let unit = self
            .unit_prices
            .get(&(currency.clone(), base))
            .ok_or_else(|| EngineError::CurrencyNotFound(currency.clone()))?;
        Ok(*unit * amount)
    }
}

/// Fee-rate store over a fixed name/rate table.
#[derive(Debug, Default)]
pub struct StaticFeeRates {
    rates: HashMap<String, Decimal>,
}

impl StaticFeeRates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rate(mut self, name: &str, rate: Decimal) -> Self {
        self.rates.insert(name.to_string(), rate);
        self
    }
}

#[async_trait]
impl FeeRateStore for StaticFeeRates {
    async fn rate(&self, name: &str) -> Result<Decimal, EngineError> {
        self.rates
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::FeeRateNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn wallet_debit_checks_balance() {
        let wallet = InMemoryWallet::new();
        let user = Uuid::new_v4();
        let btc = CurrencyCode::new("BTC");

        wallet.credit(user, &btc, dec!(1)).await.unwrap();
        assert_eq!(wallet.available(user, &btc).await.unwrap(), dec!(1));

        let err = wallet.debit(user, &btc, dec!(2)).await.unwrap_err();
        assert!(matches!(err, EngineError::InsufficientBalance { .. }));

        wallet.debit(user, &btc, dec!(0.4)).await.unwrap();
        assert_eq!(wallet.available(user, &btc).await.unwrap(), dec!(0.6));
    }

    #[tokio::test]
    async fn fee_config_loads_from_store() {
        let store = StaticFeeRates::new()
            .with_rate(SWAP_FEE, dec!(0.003))
            .with_rate(SWAP_PROVIDERS_FEE, dec!(0.0015));
        let fees = load_fee_config(&store).await.unwrap();
        assert_eq!(fees.total_rate(), dec!(0.003));
        assert_eq!(fees.provider_rate(), dec!(0.0015));
    }

    #[tokio::test]
    async fn oracle_misses_are_currency_not_found() {
        let oracle = FixedPriceOracle::new().with_price(
            CurrencyCode::new("BTC"),
            BaseCurrency::Usdt,
            dec!(60000),
        );
        let value = oracle
            .value_in_base(&CurrencyCode::new("BTC"), dec!(2), BaseCurrency::Usdt)
            .await
            .unwrap();
        assert_eq!(value, dec!(120000));

        let err = oracle
            .value_in_base(&CurrencyCode::new("DOGE"), dec!(1), BaseCurrency::Usdt)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::CurrencyNotFound(_)));
    }
}
