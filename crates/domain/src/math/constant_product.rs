use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::fees::FeeConfig;
use crate::value_objects::Price;

/// Full result of running one directed input through the constant-product
/// formula (`x * y = k`).
///
/// Reserves are expressed in swap orientation: "own" is the input side,
/// "other" the output side. `final_*` are the reserves the pool must hold
/// after a commit; they differ from the curve point because only the
/// provider-retained fee slice stays in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapBreakdown {
    pub output_amount: Decimal,
    /// Protocol fee yield in the output currency, for reporting only.
    pub fee_amount: Decimal,
    /// Fractional price movement caused by this swap.
    pub slippage: Decimal,
    /// Post-swap price in the same orientation as the pre-swap price.
    pub final_price: Price,
    pub final_own_reserve: Decimal,
    pub final_other_reserve: Decimal,
}

/// Quotes a swap of `input_amount` against oriented reserves.
///
/// Steps, with `t` = total fee rate and `p` = provider fee rate:
///
/// 1. `net_in = input * (1 - t)` enters the curve.
/// 2. `new_other = k / (own + net_in)`, `output = other - new_other`.
/// 3. The pool keeps `input * (1 - (t - p))` on the input side: the
///    provider slice inflates `k`, the protocol slice is extracted.
/// 4. `fee_amount = new_other - k / (own + input)`: the output-side amount
///    the protocol fee would otherwise have yielded.
/// 5. `slippage = 1 - final_price / old_price`.
///
/// A zero reserve on either side is rejected before any arithmetic; an empty
/// pool cannot quote.
pub fn swap_breakdown(
    own_reserve: Decimal,
    other_reserve: Decimal,
    input_amount: Decimal,
    fees: &FeeConfig,
) -> Result<SwapBreakdown, EngineError> {
    if input_amount <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(input_amount));
    }
    if own_reserve <= Decimal::ZERO || other_reserve <= Decimal::ZERO {
        return Err(EngineError::InsufficientLiquidity);
    }

    let k = own_reserve * other_reserve;
    let net_in = input_amount * (Decimal::ONE - fees.total_rate());
    let new_other = k / (own_reserve + net_in);
    let output_amount = other_reserve - new_other;

    let final_own = own_reserve + input_amount * (Decimal::ONE - fees.protocol_rate());
    let final_other = new_other;

    let old_price = other_reserve / own_reserve;
    let final_price = final_other / final_own;
    let fee_amount = new_other - k / (own_reserve + input_amount);
    let slippage = Decimal::ONE - final_price / old_price;

    Ok(SwapBreakdown {
        output_amount,
        fee_amount,
        slippage,
        final_price: Price::new(final_price),
        final_own_reserve: final_own,
        final_other_reserve: final_other,
    })
}

/// The portion of `amount` to swap so that the remaining input and the swap
/// output end up with equal value at the post-swap price.
///
/// Closed form with `f = 1 - total_fee` and `r` the input-side reserve:
/// `A = r(1 + f) / 2f`, result `A * (sqrt(1 + r * amount / (f * A^2)) - 1)`.
pub fn equating_swap_amount(
    own_reserve: Decimal,
    amount: Decimal,
    fees: &FeeConfig,
) -> Result<Decimal, EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount));
    }
    if own_reserve <= Decimal::ZERO {
        return Err(EngineError::InsufficientLiquidity);
    }
    let fee_factor = Decimal::ONE - fees.total_rate();
    if fee_factor.is_zero() {
        return Err(EngineError::InvalidFeeConfig {
            total_rate: fees.total_rate(),
            provider_rate: fees.provider_rate(),
        });
    }

    let half_curve = own_reserve * (Decimal::ONE + fee_factor) / (Decimal::TWO * fee_factor);
    let radicand =
        Decimal::ONE + (own_reserve * amount) / (fee_factor * half_curve * half_curve);
    let root = radicand.sqrt().ok_or(EngineError::ArithmeticOverflow)?;
    Ok(half_curve * (root - Decimal::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec!(0.0001)
    }

    #[test]
    fn worked_example_with_split_fee() {
        // Reserves 1000/2000 (k = 2_000_000), input 100, total fee 0.3%,
        // provider fee 0.15%:
        //   net_in     = 99.7
        //   new_other  = 2_000_000 / 1099.7 = 1818.6869...
        //   output     = 181.3130...
        //   final_own  = 1000 + 100 * (1 - 0.0015) = 1099.85
        let fees = FeeConfig::new(dec!(0.003), dec!(0.0015)).unwrap();
        let breakdown = swap_breakdown(dec!(1000), dec!(2000), dec!(100), &fees).unwrap();

        assert!(close(breakdown.output_amount, dec!(181.3130)));
        assert!(close(breakdown.final_own_reserve, dec!(1099.85)));
        // Protocol fee yield: 2_000_000/1099.7 - 2_000_000/1100
        assert!(close(breakdown.fee_amount, dec!(0.5051)));

        // Only the provider slice stays in the pool, so k grows.
        let k_after = breakdown.final_own_reserve * breakdown.final_other_reserve;
        assert!(k_after >= dec!(2000000));
    }

    #[test]
    fn zero_provider_fee_preserves_k() {
        let fees = FeeConfig::new(dec!(0.003), Decimal::ZERO).unwrap();
        let breakdown = swap_breakdown(dec!(1000), dec!(2000), dec!(100), &fees).unwrap();
        let k_after = breakdown.final_own_reserve * breakdown.final_other_reserve;
        assert!(close(k_after, dec!(2000000)));
    }

    #[test]
    fn slippage_matches_price_movement() {
        let fees = FeeConfig::zero();
        let breakdown = swap_breakdown(dec!(1000), dec!(2000), dec!(100), &fees).unwrap();
        let expected = Decimal::ONE - breakdown.final_price.value / dec!(2);
        assert_eq!(breakdown.slippage, expected);
        assert!(breakdown.slippage > Decimal::ZERO);
    }

    #[test]
    fn empty_side_is_rejected_before_quoting() {
        let fees = FeeConfig::zero();
        assert!(matches!(
            swap_breakdown(Decimal::ZERO, dec!(2000), dec!(100), &fees),
            Err(EngineError::InsufficientLiquidity)
        ));
        assert!(matches!(
            swap_breakdown(dec!(1000), dec!(2000), Decimal::ZERO, &fees),
            Err(EngineError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn equating_amount_balances_both_sides() {
        // Swapping the computed portion must leave remaining ~= output value
        // at the post-swap price.
        let fees = FeeConfig::new(dec!(0.003), dec!(0.0015)).unwrap();
        let own = dec!(1000);
        let total = dec!(100);

        let swap_in = equating_swap_amount(own, total, &fees).unwrap();
        assert!(swap_in > Decimal::ZERO && swap_in < total);

        let breakdown = swap_breakdown(own, dec!(2000), swap_in, &fees).unwrap();
        let remaining = total - swap_in;
        let remaining_value = remaining * breakdown.final_price.value;
        assert!((remaining_value - breakdown.output_amount).abs() / breakdown.output_amount < dec!(0.01));
    }
}
