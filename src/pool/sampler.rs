//! Display-only sampling of the curve for charts.
//!
//! Nothing here is used for settlement. Prices and market caps are decimals
//! in whole native units, derived from the exact integer curve.

use crate::error::{CurveError, Error, MathError, SamplerError};
use crate::math::curve::{search_curve, CurveSegment};
use crate::pool::swap::{compute_buy_token_exact_in, compute_swap};
use crate::{MAX_TOKEN_SUPPLY, NATIVE_DECIMALS, TOKEN_DECIMALS};
use alloy_primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decimal places kept on a computed price.
pub const PRICE_DECIMAL_PLACES: u32 = 15;

/// Significant digits kept on a computed market cap.
pub const MARKET_CAP_SIGNIFICANT_DIGITS: u32 = 15;

// 2^96 - 1
const DECIMAL_MAX_MANTISSA: U256 = U256::from_limbs([u64::MAX, u32::MAX as u64, 0, 0]);
const DECIMAL_MAX_SCALE: u32 = 28;
const U256_10: U256 = U256::from_limbs([10, 0, 0, 0]);

/// Chart sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of points returned, at least 2.
    pub max_points: usize,
    /// Right edge of the chart as a percentage of the native amount raised
    /// so far; 300 shows up to 3x. At least 100.
    pub x_axis_max_threshold_pct: u64,
    /// The right edge never shows less than this much native currency.
    pub x_axis_min_native: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_points: 1000,
            x_axis_max_threshold_pct: 300,
            // 200 SOL
            x_axis_min_native: 200_000_000_000,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.x_axis_max_threshold_pct < 100 {
            return Err(SamplerError::InvalidMaxThreshold);
        }
        if self.max_points < 2 {
            return Err(SamplerError::InvalidMaxPoints);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    /// Cumulative tokens bought from a full curve.
    pub buy_amount: u64,
    /// Native amount paid for `buy_amount` from a full curve.
    pub native_amount: U256,
    /// Marginal price times max supply, in whole native units.
    pub market_cap: Decimal,
    /// Set on exactly one point: where the curve currently stands.
    pub current: bool,
}

/// Marginal price, in whole native units per whole token, at
/// `target_supply` whose cumulative native amount is `native_amount`.
///
/// For `y = k / x^n - c` the slope is `n * (y + c) / x`. Truncated to
/// [`PRICE_DECIMAL_PLACES`].
pub fn calculate_price(
    target_supply: u64,
    native_amount: U256,
    segment: &CurveSegment,
) -> Result<Decimal, Error> {
    // n * (y + c) * 10^TOKEN_DECIMALS / (x * 10^NATIVE_DECIMALS)
    let numerator = slope_numerator(native_amount, segment)?
        .checked_mul(U256::from(10u64.pow(TOKEN_DECIMALS)))
        .ok_or(MathError::Overflow)?;
    let denominator = native_scaled_supply(target_supply)?;
    let price = decimal_quotient(numerator, denominator)?;
    Ok(price.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::ToZero))
}

/// Marginal price at `target_supply` times the whole issued supply, in whole
/// native units, truncated to [`MARKET_CAP_SIGNIFICANT_DIGITS`].
///
/// Computed from the exact slope rather than from the truncated
/// [`calculate_price`]. Fails with [`SamplerError::DecimalOverflow`] when the
/// integer part does not fit a `Decimal`, which happens within about a hundred
/// base units of depletion.
pub fn calculate_market_cap(
    target_supply: u64,
    native_amount: U256,
    segment: &CurveSegment,
) -> Result<Decimal, Error> {
    // n * (y + c) * MAX_TOKEN_SUPPLY / (x * 10^NATIVE_DECIMALS)
    let numerator = slope_numerator(native_amount, segment)?
        .checked_mul(U256::from(MAX_TOKEN_SUPPLY))
        .ok_or(MathError::Overflow)?;
    let denominator = native_scaled_supply(target_supply)?;
    let market_cap = decimal_quotient(numerator, denominator)?;
    Ok(market_cap
        .round_sf_with_strategy(MARKET_CAP_SIGNIFICANT_DIGITS, RoundingStrategy::ToZero)
        .ok_or(SamplerError::DecimalOverflow)?)
}

fn slope_numerator(native_amount: U256, segment: &CurveSegment) -> Result<U256, MathError> {
    native_amount
        .checked_add(segment.c_offset)
        .and_then(|v| v.checked_mul(U256::from(segment.exponent)))
        .ok_or(MathError::Overflow)
}

fn native_scaled_supply(target_supply: u64) -> Result<U256, MathError> {
    if target_supply == 0 {
        return Err(MathError::DivisionByZero);
    }
    Ok(U256::from(target_supply) * U256::from(10u64.pow(NATIVE_DECIMALS)))
}

/// `numerator / denominator` truncated at the finest scale whose mantissa
/// still fits a `Decimal`.
fn decimal_quotient(numerator: U256, denominator: U256) -> Result<Decimal, Error> {
    let mut fitted = None;
    let mut scale_factor = U256::ONE;
    for scale in 0..=DECIMAL_MAX_SCALE {
        let quotient = numerator
            .checked_mul(scale_factor)
            .ok_or(MathError::Overflow)?
            / denominator;
        if quotient > DECIMAL_MAX_MANTISSA {
            break;
        }
        fitted = Some((quotient, scale));
        scale_factor *= U256_10;
    }

    let (mantissa, scale) = fitted.ok_or(SamplerError::DecimalOverflow)?;
    let mantissa = u128::try_from(mantissa)
        .ok()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(SamplerError::DecimalOverflow)?;
    Ok(Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|_| SamplerError::DecimalOverflow)?)
}

// Within about a hundred base units of depletion the market cap exceeds the
// `Decimal` range; charts get `Decimal::MAX` there.
fn market_cap_at(buy_amount: u64, native_amount: U256) -> Result<Decimal, Error> {
    let supply = MAX_TOKEN_SUPPLY - buy_amount;
    match calculate_market_cap(supply, native_amount, search_curve(supply)) {
        Err(Error::SamplerError(SamplerError::DecimalOverflow)) => {
            debug!(supply, "market cap beyond decimal range, saturating");
            Ok(Decimal::MAX)
        }
        result => result,
    }
}

/// Samples the curve from a full supply up to a chart edge derived from the
/// current position, `config.max_points` evenly spaced points in token space.
///
/// The right edge is `x_axis_max_threshold_pct` of what has been raised so
/// far, capped by the cost of all but one unit and floored at
/// `x_axis_min_native`, converted back into tokens. The first point at or
/// past the current sold amount is replaced by the exact current point.
pub fn curve_points(
    remaining_supply: u64,
    config: &SamplerConfig,
) -> Result<Vec<CurvePoint>, Error> {
    config.validate()?;

    let current_sold = MAX_TOKEN_SUPPLY
        .checked_sub(remaining_supply)
        .ok_or(CurveError::CannotExceedMaxSupply)?;
    let current_native = compute_swap(current_sold, MAX_TOKEN_SUPPLY, true)?;

    let max_native = compute_swap(MAX_TOKEN_SUPPLY - 1, MAX_TOKEN_SUPPLY, true)?;
    let threshold_native = current_native
        .checked_mul(U256::from(config.x_axis_max_threshold_pct))
        .ok_or(MathError::Overflow)?
        / crate::U256_100;
    let threshold_native = threshold_native
        .min(max_native)
        .max(U256::from(config.x_axis_min_native));

    let max_buy_amount = compute_buy_token_exact_in(threshold_native, MAX_TOKEN_SUPPLY)?;
    let intervals = (config.max_points - 1) as u64;
    let step = max_buy_amount.div_ceil(intervals).max(1);
    debug!(
        current_sold,
        %threshold_native,
        max_buy_amount,
        step,
        "sampling curve"
    );

    let mut points = Vec::with_capacity(config.max_points);
    for i in 0..config.max_points as u64 {
        let buy_amount = step
            .checked_mul(i)
            .ok_or(MathError::Overflow)?
            .min(MAX_TOKEN_SUPPLY - 1);
        let native_amount = if buy_amount > 0 {
            compute_swap(buy_amount, MAX_TOKEN_SUPPLY, true)?
        } else {
            U256::ZERO
        };
        points.push(CurvePoint {
            buy_amount,
            native_amount,
            market_cap: market_cap_at(buy_amount, native_amount)?,
            current: false,
        });
    }

    let current_index = points
        .iter()
        .position(|point| point.buy_amount >= current_sold)
        .unwrap_or(points.len() - 1);
    let point = &mut points[current_index];
    if point.buy_amount != current_sold {
        *point = CurvePoint {
            buy_amount: current_sold,
            native_amount: current_native,
            market_cap: market_cap_at(current_sold, current_native)?,
            current: true,
        };
    }
    point.current = true;

    Ok(points)
}
