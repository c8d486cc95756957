use crate::error::MathError;
use crate::{MULTIPLIER, SUPPLY_MULTIPLIER};
use alloy_primitives::U256;

/// Divides `a` by `b`, rounding the result up to the next integer
/// when there is a non‑zero remainder.
///
/// This will panic on division by zero, mirroring primitive integer
/// division, so callers must ensure `b != 0`.
#[inline(always)]
pub fn ceil_div(a: U256, b: U256) -> U256 {
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::ONE
    }
}

/// Divides `numerator` by `denominator`, rounding toward positive infinity
/// when `round_up` is set and toward zero otherwise.
#[inline(always)]
pub fn div_with_rounding(
    numerator: U256,
    denominator: U256,
    round_up: bool,
) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let (quotient, remainder) = numerator.div_rem(denominator);
    if round_up && !remainder.is_zero() {
        Ok(quotient + U256::ONE)
    } else {
        Ok(quotient)
    }
}

/// Raises `target_supply * SUPPLY_MULTIPLIER` to the power `n`, keeping the
/// result scaled by [`MULTIPLIER`].
///
/// Square-and-multiply, with every product brought back to scale through
/// [`div_with_rounding`]. Rounding each step, rather than once at the end,
/// is part of the result: an independent implementation must round the same
/// way to produce the same value.
pub fn pow(target_supply: u64, n: u8, round_up: bool) -> Result<U256, MathError> {
    let mut result = MULTIPLIER;
    let mut base = U256::from(target_supply)
        .checked_mul(SUPPLY_MULTIPLIER)
        .ok_or(MathError::Overflow)?;
    let mut n = n;

    while n > 0 {
        if n % 2 == 1 {
            let product = result.checked_mul(base).ok_or(MathError::Overflow)?;
            result = div_with_rounding(product, MULTIPLIER, round_up)?;
        }
        let squared = base.checked_mul(base).ok_or(MathError::Overflow)?;
        base = div_with_rounding(squared, MULTIPLIER, round_up)?;
        n /= 2;
    }

    Ok(result)
}
