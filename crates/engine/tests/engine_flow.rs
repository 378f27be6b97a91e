//! End-to-end flow over the whole engine: provision a pool, provide
//! liquidity, swap against it, and withdraw, checking the pool invariants
//! and the wallet sequencing contract along the way.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

use swap_engine::prelude::*;

struct Exchange {
    registry: Arc<PoolRegistry>,
    resolver: Arc<PriceResolver>,
    recorder: Arc<HistoryRecorder>,
    swap_engine: SwapEngine,
    ledger: LiquidityLedger,
    wallet: Arc<InMemoryWallet>,
    fees: FeeConfig,
}

async fn exchange() -> Exchange {
    let registry = Arc::new(PoolRegistry::new());
    let oracle = Arc::new(
        FixedPriceOracle::new()
            .with_price(CurrencyCode::new("ETH"), BaseCurrency::Usdt, dec!(2000))
            .with_price(CurrencyCode::new("USDT"), BaseCurrency::Usdt, Decimal::ONE)
            .with_price(CurrencyCode::new("ETH"), BaseCurrency::Irt, dec!(120000000))
            .with_price(CurrencyCode::new("USDT"), BaseCurrency::Irt, dec!(60000))
            .with_price(CurrencyCode::new("ETH"), BaseCurrency::Btc, dec!(0.03))
            .with_price(CurrencyCode::new("USDT"), BaseCurrency::Btc, dec!(0.000015)),
    );
    let resolver = Arc::new(PriceResolver::new(registry.clone(), oracle.clone()));
    let recorder = Arc::new(HistoryRecorder::new(registry.clone(), resolver.clone()));
    let swap_engine = SwapEngine::new(registry.clone(), recorder.clone());
    let ledger = LiquidityLedger::new(
        registry.clone(),
        resolver.clone(),
        oracle,
        recorder.clone(),
    );

    let store = StaticFeeRates::new()
        .with_rate(SWAP_FEE, dec!(0.003))
        .with_rate(SWAP_PROVIDERS_FEE, dec!(0.0015));
    let fees = load_fee_config(&store).await.unwrap();

    Exchange {
        registry,
        resolver,
        recorder,
        swap_engine,
        ledger,
        wallet: Arc::new(InMemoryWallet::new()),
        fees,
    }
}

fn eth() -> CurrencyCode {
    CurrencyCode::new("ETH")
}

fn usdt() -> CurrencyCode {
    CurrencyCode::new("USDT")
}

/// Invariant from the pool model: zero LP supply iff zero reserves.
async fn assert_pool_invariant(pool: &SharedPool) {
    let pool = pool.read().await;
    assert_eq!(
        pool.lp_tokens.is_zero(),
        pool.amount_a.is_zero() && pool.amount_b.is_zero()
    );
    assert!(pool.amount_a >= Decimal::ZERO);
    assert!(pool.amount_b >= Decimal::ZERO);
    assert!(pool.lp_tokens >= Decimal::ZERO);
}

#[tokio::test]
async fn provide_swap_withdraw_round_trip() {
    let exchange = exchange().await;
    let provider = Uuid::new_v4();
    let trader = Uuid::new_v4();

    let shared = exchange
        .registry
        .create(eth(), usdt(), 1)
        .await
        .unwrap();
    let pool_id = shared.read().await.id;
    assert_pool_invariant(&shared).await;

    // Provider funds their wallet and deposits; debits happen around the
    // commit, driven by the caller.
    exchange.wallet.credit(provider, &eth(), dec!(10)).await.unwrap();
    exchange
        .wallet
        .credit(provider, &usdt(), dec!(20000))
        .await
        .unwrap();

    let add = exchange
        .ledger
        .commit_add(pool_id, provider, dec!(10), dec!(20000))
        .await
        .unwrap();
    exchange
        .wallet
        .debit(provider, &eth(), add.amount_a)
        .await
        .unwrap();
    exchange
        .wallet
        .debit(provider, &usdt(), add.amount_b)
        .await
        .unwrap();
    assert_pool_invariant(&shared).await;

    let k_before = shared.read().await.constant_product();

    // Trader quotes, checks the slippage, and commits the same input; the
    // committed numbers must reproduce the quote exactly.
    let quote = exchange
        .swap_engine
        .quote(pool_id, dec!(1), false, &exchange.fees)
        .await
        .unwrap();
    let record = exchange
        .swap_engine
        .commit(pool_id, trader, dec!(1), false, quote.slippage, &exchange.fees)
        .await
        .unwrap();
    assert_eq!(record.output_amount, quote.output_amount);
    assert_eq!(record.price_after, quote.price_after.value);

    // Wallet movement strictly after the commit succeeded.
    exchange.wallet.credit(trader, &eth(), dec!(1)).await.unwrap();
    exchange.wallet.debit(trader, &eth(), dec!(1)).await.unwrap();
    exchange
        .wallet
        .credit(trader, &usdt(), record.output_amount)
        .await
        .unwrap();

    // Provider fee share grew k; the swap left LP supply alone.
    assert!(shared.read().await.constant_product() >= k_before);
    assert_pool_invariant(&shared).await;

    // The provider's position gained value in currency B terms.
    let position = exchange.ledger.position(provider, pool_id).await.unwrap();
    assert_eq!(position.present_share.as_decimal(), Decimal::ONE);
    assert!(position.primary.is_some());

    // Withdraw everything; the wallet receives the proportional amounts and
    // the pool returns to the empty state.
    let remove = exchange
        .ledger
        .commit_remove(pool_id, provider, Decimal::ONE)
        .await
        .unwrap();
    exchange
        .wallet
        .credit(provider, &eth(), remove.amount_a)
        .await
        .unwrap();
    exchange
        .wallet
        .credit(provider, &usdt(), remove.amount_b)
        .await
        .unwrap();

    assert_pool_invariant(&shared).await;
    assert!(shared.read().await.is_empty());

    // The sole provider ends up with the trader's input folded in.
    let eth_balance = exchange.wallet.available(provider, &eth()).await.unwrap();
    assert!(eth_balance > dec!(10));

    // History kept every row.
    assert_eq!(exchange.recorder.swaps(None, Some(pool_id)).await.len(), 1);
    assert_eq!(exchange.recorder.provider_txs(Some(pool_id)).await.len(), 2);
}

#[tokio::test]
async fn distinct_pools_commit_concurrently() {
    let exchange = exchange().await;
    let user = Uuid::new_v4();

    let eth_pool = exchange.registry.create(eth(), usdt(), 1).await.unwrap();
    let eth_pool_id = eth_pool.read().await.id;
    exchange
        .ledger
        .commit_add(eth_pool_id, user, dec!(100), dec!(200000))
        .await
        .unwrap();

    let btc = CurrencyCode::new("BTC");
    let btc_pool = exchange.registry.create(btc.clone(), usdt(), 2).await.unwrap();
    btc_pool
        .write()
        .await
        .deposit(dec!(10), dec!(600000), dec!(2449));
    let btc_pool_id = btc_pool.read().await.id;

    // Interleave commits on both pools from parallel tasks.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = exchange.swap_engine.clone();
        let fees = exchange.fees;
        handles.push(tokio::spawn(async move {
            engine
                .commit(eth_pool_id, Uuid::new_v4(), dec!(1), false, Decimal::ONE, &fees)
                .await
        }));
        let engine = exchange.swap_engine.clone();
        let fees = exchange.fees;
        handles.push(tokio::spawn(async move {
            engine
                .commit(btc_pool_id, Uuid::new_v4(), dec!(0.1), false, Decimal::ONE, &fees)
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Serialized per-pool commits keep k monotone on both pools.
    assert!(eth_pool.read().await.constant_product() >= dec!(100) * dec!(200000));
    assert!(btc_pool.read().await.constant_product() >= dec!(10) * dec!(600000));
    assert_eq!(
        exchange.recorder.swaps(None, None).await.len(),
        16
    );
}

#[tokio::test]
async fn resolver_prices_x_in_x_as_one() {
    let exchange = exchange().await;
    for symbol in ["IRT", "USDT", "BTC"] {
        let base = BaseCurrency::try_from_code(&CurrencyCode::new(symbol)).unwrap();
        let price = exchange
            .resolver
            .price(&CurrencyCode::new(symbol), base)
            .await
            .unwrap();
        assert_eq!(price.value, Decimal::ONE);
    }

    let err = BaseCurrency::try_from_code(&CurrencyCode::new("EUR")).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedBaseCurrency(_)));
}
