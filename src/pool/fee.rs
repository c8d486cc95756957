//! Flat 1% trading fee, always rounded in the protocol's favor.

use crate::error::{Error, MathError};
use crate::math::math_helpers::ceil_div;
use crate::pool::swap::{compute_buy_token_exact_in, compute_swap};
use crate::{U256_100, U256_101};
use alloy_primitives::U256;
use serde::Serialize;

/// Native amounts of a fixed-token-amount trade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SwapQuote {
    /// Native amount moved along the curve.
    pub native_amount: U256,
    /// Fee charged on `native_amount`.
    pub fee: U256,
    /// What the trader pays (buy) or receives (sell).
    pub total: U256,
}

/// Result of spending an exact native amount on tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExactInQuote {
    /// Tokens received.
    pub buy_amount: u64,
    /// Native amount moved along the curve, equal to the payment.
    pub native_amount: U256,
    /// Fee charged on top of the payment.
    pub fee: U256,
    /// `native_amount + fee`.
    pub total: U256,
}

/// Computes the 1% fee on `amount`, rounded up.
#[inline]
pub fn compute_fee(amount: U256) -> U256 {
    ceil_div(amount, U256_100)
}

/// Splits a fee-inclusive budget into the curve payment and the fee, so that
/// `pay + compute_fee(pay)` does not exceed `max_pay_amount` by more than
/// rounding dust.
///
/// `pay = ceil(max_pay_amount * 100 / 101)`, `fee = max_pay_amount - pay`.
pub fn split_pay_amount(max_pay_amount: U256) -> Result<(U256, U256), MathError> {
    let scaled = max_pay_amount
        .checked_mul(U256_100)
        .ok_or(MathError::Overflow)?;
    let pay_amount = ceil_div(scaled, U256_101);
    let fee_amount = max_pay_amount
        .checked_sub(pay_amount)
        .ok_or(MathError::Underflow)?;
    Ok((pay_amount, fee_amount))
}

/// Quotes a fixed token amount including the fee: buyers pay
/// `native + fee`, sellers receive `native - fee`.
pub fn compute_swap_with_fee(
    amount: u64,
    remaining_supply: u64,
    buy: bool,
) -> Result<SwapQuote, Error> {
    let native_amount = compute_swap(amount, remaining_supply, buy)?;
    let fee = compute_fee(native_amount);
    let total = if buy {
        native_amount.checked_add(fee).ok_or(MathError::Overflow)?
    } else {
        native_amount.checked_sub(fee).ok_or(MathError::Underflow)?
    };
    Ok(SwapQuote {
        native_amount,
        fee,
        total,
    })
}

/// Quotes an exact-in buy; the fee is charged on top of `pay_amount`.
pub fn compute_buy_exact_in_with_fee(
    pay_amount: U256,
    remaining_supply: u64,
) -> Result<ExactInQuote, Error> {
    let buy_amount = compute_buy_token_exact_in(pay_amount, remaining_supply)?;
    let fee = compute_fee(pay_amount);
    let total = pay_amount.checked_add(fee).ok_or(MathError::Overflow)?;
    Ok(ExactInQuote {
        buy_amount,
        native_amount: pay_amount,
        fee,
        total,
    })
}
