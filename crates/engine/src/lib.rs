//! Concurrent engine for the constant-product swap pools.
//!
//! This crate wires the domain model into five cooperating services:
//!
//! - [`registry::PoolRegistry`] owns every pool behind a per-pool lock
//! - [`pricing::PriceResolver`] resolves single-hop base-currency prices
//! - [`swap::SwapEngine`] quotes and commits constant-product swaps
//! - [`liquidity::LiquidityLedger`] tracks LP positions and deposits
//! - [`history::HistoryRecorder`] appends swap/provider/snapshot rows
//!
//! Concurrency model: quoting only ever takes read locks and runs freely in
//! parallel; a commit takes the write lock of the one pool it mutates,
//! re-validates every bound against the current reserves inside that lock,
//! and appends its history row before returning. Operations on distinct
//! pools never block each other, and there are no cross-pool transactions.

/// Collaborator traits (wallet, oracle, fee store) and in-memory impls.
pub mod collaborators;
/// Append-only history recording, queries, and aggregation.
pub mod history;
/// Liquidity provisioning and LP-token accounting.
pub mod liquidity;
/// Prelude module for convenient imports.
pub mod prelude;
/// Price resolution across the pool graph.
pub mod pricing;
/// Pool ownership and pair lookup.
pub mod registry;
/// Pool, currency, and market-wide report assembly.
pub mod reports;
/// Swap quoting and committing.
pub mod swap;
