//! Exact pricing math for a token sale priced by a three-segment bonding curve.
//!
//! The curve maps the *remaining* token supply to the cumulative native
//! currency raised. Each segment has the form `y = k / x^n - c` and the
//! segments are glued together so the curve is continuous at every boundary.
//! All settlement-path arithmetic is integer-only (`U256`), with rounding
//! chosen so that quotes always favor the protocol: buyers pay at least the
//! exact cost, sellers receive at most the exact proceeds.
//!
//! This crate exposes:
//! - Low‑level fixed-point primitives and the per-segment curve (`math::*`).
//! - Swap quoting across segments, fees and exact-in buys (`pool::swap`, `pool::fee`).
//! - Display-only curve sampling for charts (`pool::sampler`).
//!
//! Every function is a pure function of its inputs: the remaining supply is
//! owned by the caller and is never mutated here.
//!
//! # Examples
//!
//! ## Quoting a buy
//! ```
//! use bonding_curve_math::{pool::fee::compute_swap_with_fee, MAX_TOKEN_SUPPLY, U256};
//!
//! // Buy 1% of the supply from a fresh curve.
//! let quote = compute_swap_with_fee(MAX_TOKEN_SUPPLY / 100, MAX_TOKEN_SUPPLY, true).unwrap();
//! assert_eq!(quote.native_amount, U256::from(287_142_490u64));
//! assert_eq!(quote.total, quote.native_amount + quote.fee);
//! ```
//!
//! ## Spending an exact amount of native currency
//! ```
//! use bonding_curve_math::{pool::swap::compute_buy_token_exact_in, MAX_TOKEN_SUPPLY, U256};
//!
//! let one_sol = U256::from(1_000_000_000u64);
//! let tokens = compute_buy_token_exact_in(one_sol, MAX_TOKEN_SUPPLY).unwrap();
//! assert!(tokens > 0);
//! ```

pub use alloy_primitives::U256;
pub use rust_decimal::Decimal;

pub mod error;
pub mod math;
pub mod pool;

pub use error::{CurveError, Error, MathError, SamplerError};
pub use math::curve::{CurveSegment, CURVES, CURVE_LAST};
pub use pool::sampler::{curve_points, CurvePoint, SamplerConfig};

/// Decimal places of the sold token.
pub const TOKEN_DECIMALS: u32 = 6;
/// Decimal places of the native currency.
pub const NATIVE_DECIMALS: u32 = 9;

/// Total issued tokens, 1e9 whole tokens at 6 decimals.
pub const MAX_TOKEN_SUPPLY: u64 = 1_000_000_000 * 1_000_000;

/// Smallest native units per whole native coin.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Fixed-point scale used by `pow`, 1e19.
pub const MULTIPLIER: U256 = U256::from_limbs([10_000_000_000_000_000_000, 0, 0, 0]);

/// Scales a token supply so that `MAX_TOKEN_SUPPLY * SUPPLY_MULTIPLIER == MULTIPLIER`.
pub const SUPPLY_MULTIPLIER: U256 = U256::from_limbs([10_000, 0, 0, 0]);

/// Width, in token base units, at which the non-terminal root search stops.
pub const FIND_ROOT_MAX_ERROR: u64 = 100_000;

const U256_100: U256 = U256::from_limbs([100, 0, 0, 0]);
const U256_101: U256 = U256::from_limbs([101, 0, 0, 0]);
