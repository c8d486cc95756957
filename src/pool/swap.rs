use crate::error::{CurveError, Error, MathError};
use crate::math::curve::{calculate_curve, upper_boundary, CURVES};
use crate::math::root_finder::find_root;
use crate::MAX_TOKEN_SUPPLY;
use alloy_primitives::U256;
use tracing::debug;

/// Computes the native amount paid when buying, or received when selling,
/// exactly `amount` tokens against a curve with `remaining_supply` left.
///
/// The walk evaluates the start point once and the end point once, on the
/// segments that contain them; segment boundaries in between only move the
/// cursor, since adjacent segments agree there. Buys evaluate the end point
/// rounded up and the start rounded down, sells the reverse.
///
/// Sells that straddle dust at a boundary can round the start above the end;
/// such a sell is clamped to zero proceeds rather than failing.
pub fn compute_swap(amount: u64, remaining_supply: u64, buy: bool) -> Result<U256, Error> {
    if buy {
        compute_buy(amount, remaining_supply)
    } else {
        compute_sell(amount, remaining_supply)
    }
}

fn compute_buy(amount: u64, remaining_supply: u64) -> Result<U256, Error> {
    let target_supply = match remaining_supply.checked_sub(amount) {
        Some(0) | None => return Err(CurveError::CannotBuyAllRemainingSupply.into()),
        Some(target) => target,
    };

    let mut supply = remaining_supply;
    let mut start_native_amount: Option<U256> = None;
    let mut end_native_amount = U256::ZERO;
    for segment in CURVES.iter() {
        if supply <= segment.supply_at_boundary {
            continue;
        }
        if start_native_amount.is_none() {
            start_native_amount = Some(calculate_curve(supply, false, segment)?);
        }

        if target_supply >= segment.supply_at_boundary {
            end_native_amount = calculate_curve(target_supply, true, segment)?;
            break;
        }
        // reach the segment boundary
        debug!(
            from = supply,
            to = segment.supply_at_boundary,
            "buy crosses segment boundary"
        );
        supply = segment.supply_at_boundary;
    }

    let native_amount = end_native_amount
        .checked_sub(start_native_amount.unwrap_or_default())
        .ok_or(MathError::Underflow)?;
    Ok(native_amount)
}

fn compute_sell(amount: u64, remaining_supply: u64) -> Result<U256, Error> {
    let target_supply = match remaining_supply.checked_add(amount) {
        Some(target) if target <= MAX_TOKEN_SUPPLY => target,
        _ => return Err(CurveError::CannotExceedMaxSupply.into()),
    };

    let mut supply = remaining_supply;
    let mut end_native_amount: Option<U256> = None;
    let mut start_native_amount = U256::ZERO;
    for index in (0..CURVES.len()).rev() {
        let segment = &CURVES[index];
        let upper = upper_boundary(index);
        if supply >= upper {
            continue;
        }
        if end_native_amount.is_none() {
            end_native_amount = Some(calculate_curve(supply, false, segment)?);
        }

        if target_supply <= upper {
            start_native_amount = calculate_curve(target_supply, true, segment)?;
            break;
        }
        // go back to the previous segment boundary
        debug!(from = supply, to = upper, "sell crosses segment boundary");
        supply = upper;
    }

    let end_native_amount = end_native_amount.unwrap_or_default();
    if end_native_amount > start_native_amount {
        Ok(end_native_amount - start_native_amount)
    } else {
        debug!(
            amount,
            remaining_supply,
            %end_native_amount,
            %start_native_amount,
            "sell proceeds rounded below zero, clamping"
        );
        Ok(U256::ZERO)
    }
}

// the running state of an exact-in buy as it walks down the segments
struct ExactInState {
    // native amount not yet converted into tokens
    pay_amount_remaining: U256,
    // remaining supply at the cursor
    supply: u64,
    // native amount at the cursor, once known
    start_native_amount: Option<U256>,
    // tokens bought so far
    buy_amount: u64,
}

/// Computes how many tokens `pay_amount` buys from a curve with
/// `remaining_supply` left.
///
/// Whole segments are consumed while the payment covers them; the segment
/// where the payment runs out (or the terminal one) is inverted with
/// [`find_root`]. Buying the result back with [`compute_swap`] costs at most
/// `pay_amount`, plus one base unit of rounding on the terminal segment.
pub fn compute_buy_token_exact_in(pay_amount: U256, remaining_supply: u64) -> Result<u64, Error> {
    let mut state = ExactInState {
        pay_amount_remaining: pay_amount,
        supply: remaining_supply,
        start_native_amount: None,
        buy_amount: 0,
    };

    for segment in CURVES.iter() {
        if state.supply <= segment.supply_at_boundary {
            continue;
        }
        let start_native_amount = match state.start_native_amount {
            Some(native) => native,
            None => calculate_curve(state.supply, false, segment)?,
        };

        let segment_budget = segment
            .native_at_boundary
            .checked_sub(start_native_amount)
            .ok_or(MathError::Underflow)?;

        if state.pay_amount_remaining < segment_budget || segment.is_terminal() {
            // still in the segment; round up so fewer tokens are bought
            let start_native_amount = calculate_curve(state.supply, true, segment)?;
            state.buy_amount += find_root(
                state.supply,
                start_native_amount,
                state.pay_amount_remaining,
                segment,
            )?;
            break;
        }

        state.buy_amount += state.supply - segment.supply_at_boundary;
        if state.pay_amount_remaining == segment_budget {
            // the payment lands exactly on the boundary
            break;
        }

        debug!(
            from = state.supply,
            to = segment.supply_at_boundary,
            %segment_budget,
            "exact-in buy consumes whole segment"
        );
        state.supply = segment.supply_at_boundary;
        state.pay_amount_remaining -= segment_budget;
        state.start_native_amount = Some(segment.native_at_boundary);
    }

    Ok(state.buy_amount)
}
