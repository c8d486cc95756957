#![allow(dead_code)]

use bonding_curve_math::{
    curve_points,
    math::{
        curve::{calculate_curve, CURVE_1, CURVE_2, CURVE_3},
        math_helpers::{div_with_rounding, pow},
        root_finder::find_root,
    },
    pool::{
        fee::{compute_buy_exact_in_with_fee, compute_swap_with_fee, split_pay_amount},
        swap::{compute_buy_token_exact_in, compute_swap},
    },
    SamplerConfig, MAX_TOKEN_SUPPLY, U256,
};
use criterion::{black_box, Criterion};

fn pct(p: u64) -> u64 {
    MAX_TOKEN_SUPPLY * p / 100
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("math_helpers");

    group.bench_function("pow_exponent_4", |b| {
        b.iter(|| pow(black_box(pct(90)), black_box(4), black_box(true)))
    });
    group.bench_function("pow_exponent_2", |b| {
        b.iter(|| pow(black_box(pct(40)), black_box(2), black_box(false)))
    });
    group.bench_function("div_with_rounding", |b| {
        b.iter(|| {
            div_with_rounding(
                black_box(CURVE_1.k_scaled),
                black_box(U256::from(3u64)),
                black_box(true),
            )
        })
    });

    group.finish();
}

pub fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");

    for (name, supply, segment) in [
        ("curve_1", pct(90), &CURVE_1),
        ("curve_2", pct(40), &CURVE_2),
        ("curve_3", pct(2), &CURVE_3),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| calculate_curve(black_box(supply), black_box(true), segment))
        });
    }

    group.finish();
}

pub fn bench_root_finder(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_finder");

    let start = calculate_curve(MAX_TOKEN_SUPPLY, true, &CURVE_1).unwrap();
    group.bench_function("bisection", |b| {
        b.iter(|| {
            find_root(
                black_box(MAX_TOKEN_SUPPLY),
                black_box(start),
                black_box(U256::from(1_000_000_000u64)),
                &CURVE_1,
            )
        })
    });

    let start = calculate_curve(pct(4), true, &CURVE_3).unwrap();
    group.bench_function("closed_form", |b| {
        b.iter(|| {
            find_root(
                black_box(pct(4)),
                black_box(start),
                black_box(U256::from(1_000_000_000u64)),
                &CURVE_3,
            )
        })
    });

    group.finish();
}

pub fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap");

    group.bench_function("buy_single_segment", |b| {
        b.iter(|| compute_swap(black_box(pct(1)), black_box(MAX_TOKEN_SUPPLY), black_box(true)))
    });
    group.bench_function("buy_across_all_segments", |b| {
        b.iter(|| compute_swap(black_box(pct(97)), black_box(MAX_TOKEN_SUPPLY), black_box(true)))
    });
    group.bench_function("sell_across_all_segments", |b| {
        b.iter(|| compute_swap(black_box(pct(97)), black_box(pct(3)), black_box(false)))
    });
    group.bench_function("buy_with_fee", |b| {
        b.iter(|| {
            compute_swap_with_fee(black_box(pct(10)), black_box(MAX_TOKEN_SUPPLY), black_box(true))
        })
    });

    group.finish();
}

pub fn bench_exact_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_in");

    let one_sol = U256::from(1_000_000_000u64);
    group.bench_function("one_sol_fresh_curve", |b| {
        b.iter(|| compute_buy_token_exact_in(black_box(one_sol), black_box(MAX_TOKEN_SUPPLY)))
    });
    group.bench_function("large_payment_across_segments", |b| {
        b.iter(|| {
            compute_buy_token_exact_in(
                black_box(U256::from(100_000_000_000_000u64)),
                black_box(MAX_TOKEN_SUPPLY),
            )
        })
    });
    group.bench_function("split_and_quote", |b| {
        b.iter(|| {
            let (pay, _fee) = split_pay_amount(black_box(one_sol)).unwrap();
            compute_buy_exact_in_with_fee(pay, black_box(pct(50)))
        })
    });

    group.finish();
}

pub fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");
    group.sample_size(20);

    let config = SamplerConfig::default();
    group.bench_function("curve_points_default", |b| {
        b.iter(|| curve_points(black_box(pct(50)), &config))
    });

    group.finish();
}
