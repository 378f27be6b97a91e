/// Constant-product swap formula and fee split.
pub mod constant_product;
/// LP-token mint and burn math.
pub mod liquidity;

pub use constant_product::{SwapBreakdown, equating_swap_amount, swap_breakdown};
pub use liquidity::{initial_lp_tokens, proportional_lp_tokens, removal_amounts};
