use rust_decimal::{Decimal, MathematicalOps};

use crate::error::EngineError;

/// LP tokens minted for the first deposit into an empty pool:
/// `sqrt(amount_a * amount_b)`.
pub fn initial_lp_tokens(amount_a: Decimal, amount_b: Decimal) -> Result<Decimal, EngineError> {
    if amount_a <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount_a));
    }
    if amount_b <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount_b));
    }
    (amount_a * amount_b)
        .sqrt()
        .ok_or(EngineError::ArithmeticOverflow)
}

/// LP tokens minted for a deposit into a non-empty pool, proportional to the
/// existing supply: `min(amount_a / reserve_a, amount_b / reserve_b) *
/// lp_total`.
///
/// For a deposit priced at the pool's spot price both ratios coincide; the
/// `min` only bites on an off-ratio deposit and then credits the smaller
/// side, so an unbalanced deposit can never dilute existing providers.
pub fn proportional_lp_tokens(
    amount_a: Decimal,
    amount_b: Decimal,
    reserve_a: Decimal,
    reserve_b: Decimal,
    lp_total: Decimal,
) -> Result<Decimal, EngineError> {
    if amount_a <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount_a));
    }
    if amount_b <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount_b));
    }
    if reserve_a <= Decimal::ZERO || reserve_b <= Decimal::ZERO || lp_total <= Decimal::ZERO {
        return Err(EngineError::InsufficientLiquidity);
    }
    let ratio_a = amount_a / reserve_a;
    let ratio_b = amount_b / reserve_b;
    Ok(ratio_a.min(ratio_b) * lp_total)
}

/// Amounts returned for burning `burn` LP tokens out of `lp_total`:
/// each reserve times `burn / lp_total`.
pub fn removal_amounts(
    reserve_a: Decimal,
    reserve_b: Decimal,
    lp_total: Decimal,
    burn: Decimal,
) -> Result<(Decimal, Decimal), EngineError> {
    if burn <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(burn));
    }
    if lp_total <= Decimal::ZERO {
        return Err(EngineError::InsufficientLiquidity);
    }
    let share = burn / lp_total;
    Ok((reserve_a * share, reserve_b * share))
}
