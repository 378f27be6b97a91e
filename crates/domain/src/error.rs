use rust_decimal::Decimal;

use crate::value_objects::CurrencyCode;

/// Unified error type for the swap engine.
///
/// Every variant is a per-request, recoverable condition; a failing
/// validation happens strictly before any reserve mutation, so callers may
/// retry with adjusted input. Variants that exist to let the caller adjust
/// (`SlippageExceeded`, `ValueMismatch`, `InsufficientBalance`) carry the
/// computed numbers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// No pool matches the requested id or currency pair.
    #[error("pool not found")]
    PoolNotFound,
    /// The user holds no provider position in the pool.
    #[error("provider not found")]
    ProviderNotFound,
    /// The currency has no price source (no pool path and no oracle entry).
    #[error("currency {0} not found")]
    CurrencyNotFound(CurrencyCode),
    /// The named fee rate is missing from the fee-rate store.
    #[error("fee rate {0} not found")]
    FeeRateNotFound(String),
    /// A pool already exists for the unordered currency pair.
    #[error("pool {currency_a}-{currency_b} already exists")]
    PoolAlreadyExists {
        currency_a: CurrencyCode,
        currency_b: CurrencyCode,
    },
    /// Both sides of a pool must be distinct currencies.
    #[error("pool sides must differ, got {0} twice")]
    IdenticalCurrencies(CurrencyCode),
    /// Valuation requested against a currency other than IRT, USDT or BTC.
    #[error("unsupported base currency {0}")]
    UnsupportedBaseCurrency(CurrencyCode),
    /// Amounts fed into the engine must be strictly positive.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    /// Removal share must lie in `(0, 1]`.
    #[error("remove percent must be in (0, 1], got {0}")]
    RemovePercentOutOfRange(Decimal),
    /// The pool (or the provider's position) has nothing to trade against.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,
    /// Wallet balance too low; surfaced by the wallet ledger and propagated
    /// unchanged.
    #[error("insufficient {currency} balance: available {available}, required {required}")]
    InsufficientBalance {
        currency: CurrencyCode,
        available: Decimal,
        required: Decimal,
    },
    /// The swap would move the price past the caller's tolerance.
    #[error("slippage {computed} exceeds allowed {allowed}")]
    SlippageExceeded { computed: Decimal, allowed: Decimal },
    /// Paired deposit sides are not of approximately equal value.
    #[error("deposit value mismatch: required {required_value}, provided {provided_value}")]
    ValueMismatch {
        required_value: Decimal,
        provided_value: Decimal,
        /// The B-side amount that would have balanced the deposit.
        required_amount_b: Decimal,
    },
    /// The pool's suspension flag blocks this operation.
    #[error("operation is suspended for this pool")]
    PoolSuspended,
    /// Fee configuration violates `0 <= provider <= total <= 1`.
    #[error("invalid fee configuration: total {total_rate}, provider {provider_rate}")]
    InvalidFeeConfig {
        total_rate: Decimal,
        provider_rate: Decimal,
    },
    /// Decimal arithmetic left the representable range.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}
