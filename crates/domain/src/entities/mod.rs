/// Immutable history rows and snapshots.
pub mod history;
/// The pool aggregate.
pub mod pool;
/// Per-user provider positions.
pub mod provider;

pub use history::{PoolSnapshot, ProviderTxRecord, SwapRecord};
pub use pool::Pool;
pub use provider::Provider;
