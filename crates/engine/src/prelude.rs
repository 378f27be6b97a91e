//! Convenience re-exports for wiring the engine together.

pub use crate::collaborators::{
    FeeRateStore, FixedPriceOracle, InMemoryWallet, PriceOracle, SWAP_FEE, SWAP_PROVIDERS_FEE,
    StaticFeeRates, WalletLedger, load_fee_config,
};
pub use crate::history::{CurrencyFees, FeeTotals, HistoryRecorder, SwapCommitData};
pub use crate::liquidity::{
    AddQuote, LiquidityLedger, PrimaryPosition, ProviderPosition, RemoveQuote,
};
pub use crate::pricing::PriceResolver;
pub use crate::registry::{PairLookup, PoolRegistry, SharedPool};
pub use crate::reports::{CurrencyOverview, MarketSummary, PoolOverview, PoolPair, ReportService};
pub use crate::swap::{SwapEngine, SwapQuote};

pub use swap_domain::prelude::*;
