use crate::error::{CurveError, Error, MathError};
use crate::math::curve::{calculate_curve, CurveSegment};
use crate::math::math_helpers::ceil_div;
use crate::{FIND_ROOT_MAX_ERROR, MAX_TOKEN_SUPPLY, MULTIPLIER};
use alloy_primitives::U256;
use tracing::trace;

/// Returns how many tokens `pay_amount` buys on `segment`, starting from
/// `current_supply` whose native amount is `current_native_amount`.
///
/// The result never takes the supply below the segment's boundary:
/// - the terminal segment is inverted in closed form, `x = k / (y + c)`,
///   rounding the target supply up;
/// - other segments are bisected down to [`FIND_ROOT_MAX_ERROR`] base units,
///   keeping the bound whose cost is known not to exceed the target. The
///   bisection may therefore under-deliver by up to one tolerance band.
///
/// Fails with [`CurveError::BuyAmountTooLarge`] when the terminal segment
/// cannot move the supply down at all for this payment.
pub fn find_root(
    current_supply: u64,
    current_native_amount: U256,
    pay_amount: U256,
    segment: &CurveSegment,
) -> Result<u64, Error> {
    let target_native_amount = current_native_amount
        .checked_add(pay_amount)
        .ok_or(MathError::Overflow)?;

    if segment.is_terminal() {
        // y = k / x - c  =>  x = k / (y + c)
        let denominator = target_native_amount
            .checked_add(segment.c_offset)
            .and_then(|v| v.checked_mul(MULTIPLIER / U256::from(MAX_TOKEN_SUPPLY)))
            .ok_or(MathError::Overflow)?;
        let target_supply = ceil_div(segment.k_scaled, denominator);
        // last token cannot be bought
        if target_supply >= U256::from(current_supply) {
            return Err(CurveError::BuyAmountTooLarge.into());
        }
        let target_supply = u64::try_from(target_supply).map_err(|_| MathError::Overflow)?;
        return Ok(current_supply - target_supply);
    }

    if current_supply <= segment.supply_at_boundary {
        return Ok(0);
    }

    // `affordable` always has cost <= target; `unaffordable` always has cost >= target
    let mut unaffordable = segment.supply_at_boundary;
    let mut affordable = current_supply;
    let mut iterations = 0u32;
    while affordable - unaffordable > FIND_ROOT_MAX_ERROR {
        let mid = (unaffordable + affordable) >> 1;
        // round up so `affordable` moves as little as possible
        let y = calculate_curve(mid, true, segment)?;
        if target_native_amount > y {
            affordable = mid;
        } else {
            unaffordable = mid;
        }
        iterations += 1;
    }
    trace!(iterations, current_supply, affordable, "root search converged");

    Ok(current_supply - affordable)
}
