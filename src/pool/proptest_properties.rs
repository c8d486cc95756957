//! Property-based tests for the quoting invariants.

use proptest::prelude::*;

use crate::math::curve::{calculate_curve, search_curve};
use crate::pool::fee::{compute_fee, compute_swap_with_fee, split_pay_amount};
use crate::pool::sampler::{curve_points, SamplerConfig};
use crate::pool::swap::{compute_buy_token_exact_in, compute_swap};
use crate::{MAX_TOKEN_SUPPLY, U256};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Remaining supply between 1% and 100% of max.
fn remaining_supply_strategy() -> impl Strategy<Value = u64> {
    MAX_TOKEN_SUPPLY / 100..=MAX_TOKEN_SUPPLY
}

/// Any remaining supply down to the last unit, weighted toward depletion.
fn any_remaining_supply_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![1..=1_000u64, 1..=MAX_TOKEN_SUPPLY]
}

/// Native payments between 0.001 and 100_000 SOL.
fn pay_amount_strategy() -> impl Strategy<Value = u64> {
    1_000_000u64..=100_000_000_000_000u64
}

/// Token amounts that leave at least one base unit behind.
fn trade_strategy() -> impl Strategy<Value = (u64, u64)> {
    remaining_supply_strategy().prop_flat_map(|supply| (Just(supply), 1..supply))
}

// ---------------------------------------------------------------------------
// Swap
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_buy_then_sell_never_profits((supply, amount) in trade_strategy()) {
        let cost = compute_swap(amount, supply, true).unwrap();
        let proceeds = compute_swap(amount, supply - amount, false).unwrap();
        prop_assert!(
            proceeds <= cost,
            "sell {} > buy {} for {} at {}",
            proceeds, cost, amount, supply
        );
    }

    #[test]
    fn prop_buy_cost_non_decreasing_in_amount(
        (supply, amount) in trade_strategy(),
        extra in 1u64..=MAX_TOKEN_SUPPLY / 100,
    ) {
        prop_assume!(amount + extra < supply);
        let smaller = compute_swap(amount, supply, true).unwrap();
        let larger = compute_swap(amount + extra, supply, true).unwrap();
        prop_assert!(larger >= smaller);
    }

    #[test]
    fn prop_buy_cost_matches_curve_difference((supply, amount) in trade_strategy()) {
        // cost never undercuts the exact difference evaluated on one segment
        let segment = search_curve(supply - amount);
        prop_assume!(segment == search_curve(supply));
        let end = calculate_curve(supply - amount, false, segment).unwrap();
        let start = calculate_curve(supply, true, segment).unwrap();
        let cost = compute_swap(amount, supply, true).unwrap();
        prop_assert!(cost >= end.saturating_sub(start));
    }

    #[test]
    fn prop_exact_in_never_costs_more_than_payment(
        supply in remaining_supply_strategy(),
        pay in pay_amount_strategy(),
    ) {
        let pay = U256::from(pay);
        let bought = compute_buy_token_exact_in(pay, supply).unwrap();
        prop_assert!(bought < supply);
        if bought > 0 {
            // the terminal segment may round up by a single base unit
            let cost = compute_swap(bought, supply, true).unwrap();
            prop_assert!(cost <= pay + U256::from(1u8), "cost {} > pay {}", cost, pay);
        }
    }

    #[test]
    fn prop_exact_in_of_buy_cost_recovers_no_extra_value((supply, amount) in trade_strategy()) {
        let cost = compute_swap(amount, supply, true).unwrap();
        let bought = compute_buy_token_exact_in(cost, supply).unwrap();
        prop_assert!(bought < supply);
        if bought > 0 {
            // several token amounts can share one cost; the value bought back never grows
            let repriced = compute_swap(bought, supply, true).unwrap();
            prop_assert!(repriced <= cost + U256::from(1u8));
        }
    }
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fee_is_one_percent_rounded_up(amount in any::<u64>()) {
        let amount = U256::from(amount);
        let fee = compute_fee(amount);
        prop_assert!(fee * U256::from(100u8) >= amount);
        prop_assert!(fee <= amount / U256::from(100u8) + U256::from(1u8));
    }

    #[test]
    fn prop_split_pay_amount_stays_within_budget(max_pay in any::<u64>()) {
        let max_pay = U256::from(max_pay);
        let (pay, fee) = split_pay_amount(max_pay).unwrap();
        prop_assert_eq!(pay + fee, max_pay);
        prop_assert!(pay + compute_fee(pay) <= max_pay + U256::from(1u8));
    }

    #[test]
    fn prop_sell_quote_total_never_exceeds_proceeds((supply, amount) in trade_strategy()) {
        let quote = compute_swap_with_fee(amount, supply - amount, false).unwrap();
        prop_assert!(quote.total <= quote.native_amount);
        prop_assert_eq!(quote.total + quote.fee, quote.native_amount);
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_sampled_points_mark_current_once(
        supply in any_remaining_supply_strategy(),
        max_points in 2usize..=200,
    ) {
        let config = SamplerConfig { max_points, ..SamplerConfig::default() };
        let points = curve_points(supply, &config).unwrap();
        prop_assert_eq!(points.len(), max_points);
        prop_assert_eq!(points.iter().filter(|p| p.current).count(), 1);
        for pair in points.windows(2) {
            prop_assert!(pair[0].buy_amount < pair[1].buy_amount);
        }
    }
}
