//! Bonding-curve segments and their evaluation.
//!
//! Each segment prices the remaining supply `x` as `y = k / x^n - c`, where
//! `y` is the cumulative native amount raised once the supply has fallen to
//! `x`. Segments are ordered from the shallowest (most supply left) to the
//! steepest (near depletion), and `c` is chosen per segment so that adjacent
//! segments agree at their shared boundary.

use crate::error::MathError;
use crate::math::math_helpers::{div_with_rounding, pow};
use crate::{MAX_TOKEN_SUPPLY, SUPPLY_MULTIPLIER};
use alloy_primitives::U256;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurveSegment {
    /// Power of the supply in the denominator.
    pub exponent: u8,
    /// `k * MULTIPLIER * LAMPORTS_PER_SOL`.
    pub k_scaled: U256,
    /// `c * LAMPORTS_PER_SOL`, subtracted so the segment meets its neighbour.
    pub c_offset: U256,
    /// Remaining supply at the lower end of this segment.
    pub supply_at_boundary: u64,
    /// `calculate_curve(supply_at_boundary, true, self)`, cached.
    pub native_at_boundary: U256,
}

impl CurveSegment {
    /// The terminal segment is the only one with a closed-form inverse.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.exponent == 1
    }
}

/// Supply from 100% down to 80% of max, `y = 7 / x^4 - 7`.
pub const CURVE_1: CurveSegment = CurveSegment {
    exponent: 4,
    k_scaled: U256::from_limbs([12899172069043863552, 3794707603, 0, 0]), // 7e28
    c_offset: U256::from_limbs([7_000_000_000, 0, 0, 0]),
    supply_at_boundary: MAX_TOKEN_SUPPLY * 80 / 100,
    native_at_boundary: U256::from_limbs([10_089_843_750, 0, 0, 0]),
};

/// Supply from 80% down to 5% of max, `y = 21.875 / x^2 - c2`.
pub const CURVE_2: CurveSegment = CurveSegment {
    exponent: 2,
    k_scaled: U256::from_limbs([10333953595984052224, 11858461261, 0, 0]), // 2.1875e29
    c_offset: U256::from_limbs([24_089_843_750, 0, 0, 0]),
    supply_at_boundary: MAX_TOKEN_SUPPLY * 5 / 100,
    native_at_boundary: U256::from_limbs([8_725_910_156_250, 0, 0, 0]),
};

/// Supply from 5% down to a single base unit, `y = 875 / x - c3`.
pub const CURVE_3: CurveSegment = CurveSegment {
    exponent: 1,
    k_scaled: U256::from_limbs([7529774217751953408, 474338450462, 0, 0]), // 8.75e30
    c_offset: U256::from_limbs([8_774_089_843_750, 0, 0, 0]),
    // the last base unit can never be bought
    supply_at_boundary: 1,
    native_at_boundary: U256::from_limbs([852983779537312730, 47433845, 0, 0]), // 874999999999991225910156250
};

pub const CURVE_LAST: CurveSegment = CURVE_3;

/// All segments, shallowest first.
pub static CURVES: [CurveSegment; 3] = [CURVE_1, CURVE_2, CURVE_3];

/// Returns the native amount on `segment` at `target_supply`.
///
/// `round_up` should be `true` for the side of a trade the caller pays
/// (buy end point, sell start point) and `false` for the side the caller
/// receives, so the difference always rounds in the protocol's favor.
///
/// Evaluating at a supply of zero fails with [`MathError::DivisionByZero`]:
/// the curve diverges there.
pub fn calculate_curve(
    target_supply: u64,
    round_up: bool,
    segment: &CurveSegment,
) -> Result<U256, MathError> {
    let pow_x = if segment.exponent > 1 {
        pow(target_supply, segment.exponent, round_up)?
    } else {
        U256::from(target_supply)
            .checked_mul(SUPPLY_MULTIPLIER)
            .ok_or(MathError::Overflow)?
    };

    let y = div_with_rounding(segment.k_scaled, pow_x, round_up)?;
    y.checked_sub(segment.c_offset).ok_or(MathError::Underflow)
}

/// Returns the segment that prices a point at `target_supply`.
///
/// A supply sitting exactly on a boundary belongs to the deeper segment.
pub fn search_curve(target_supply: u64) -> &'static CurveSegment {
    CURVES
        .iter()
        .find(|segment| target_supply > segment.supply_at_boundary)
        .unwrap_or(&CURVES[CURVES.len() - 1])
}

/// Remaining supply at the upper end of segment `index`.
#[inline]
pub fn upper_boundary(index: usize) -> u64 {
    if index == 0 {
        MAX_TOKEN_SUPPLY
    } else {
        CURVES[index - 1].supply_at_boundary
    }
}
