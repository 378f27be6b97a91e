//! Domain model for a constant-product swap pool engine.
//!
//! This crate holds the pure accounting core of the exchange's swap service:
//! the pool aggregate and its invariants, provider positions, the immutable
//! history rows, and the swap/liquidity math. Nothing here performs I/O or
//! takes a lock; the `swap-engine` crate layers concurrency, price
//! resolution, and record keeping on top of these types.
//!
//! Two conventions run through the whole model:
//!
//! - Every quantity (reserve, LP token, price, value) is a
//!   [`rust_decimal::Decimal`]; the accounting path never touches floats.
//! - An undefined price (a zero divisor reserve) is an `Option::None`, not a
//!   negative sentinel.

/// Pool, provider, and history-row entities.
pub mod entities;
/// Base currencies, transaction kinds, and suspension scopes.
pub mod enums;
/// Unified error enum.
pub mod error;
/// Swap fee configuration.
pub mod fees;
/// Pure constant-product and LP-token math.
pub mod math;
/// Convenience re-exports.
pub mod prelude;
/// Newtype value objects: currency codes, prices, percentages.
pub mod value_objects;
