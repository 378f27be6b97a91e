//! Convenience re-exports for consumers of the domain model.

pub use crate::entities::{Pool, PoolSnapshot, Provider, ProviderTxRecord, SwapRecord};
pub use crate::enums::{BaseCurrency, ProviderTxKind, SuspendScope};
pub use crate::error::EngineError;
pub use crate::fees::FeeConfig;
pub use crate::math::{
    SwapBreakdown, equating_swap_amount, initial_lp_tokens, proportional_lp_tokens,
    removal_amounts, swap_breakdown,
};
pub use crate::value_objects::{CurrencyCode, Percentage, Price};
