//! Benchmarks for return alignment and beta regression.

#![allow(missing_docs)]

use betaculator_data::{PricePoint, PriceSeries};
use betaculator_engine::{build_aligned_returns, estimate_beta};
use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_walk(symbol: &str, rng: &mut StdRng, len: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let mut price = 100.0;
    let points = (0..len)
        .map(|i| {
            price *= 1.0 + rng.gen_range(-0.03..0.03);
            PricePoint::new(start + Days::new(i as u64), price)
        })
        .collect();
    PriceSeries::new(symbol, points).unwrap()
}

fn bench_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("beta");
    let mut rng = StdRng::seed_from_u64(7);

    for len in [105, 1_260, 5_040] {
        let security = random_walk("SEC", &mut rng, len);
        let market = random_walk("MKT", &mut rng, len);

        group.bench_with_input(BenchmarkId::new("align", len), &len, |b, _| {
            b.iter(|| build_aligned_returns(black_box(&security), black_box(&market)))
        });

        let aligned = build_aligned_returns(&security, &market).unwrap();
        group.bench_with_input(BenchmarkId::new("regress", len), &len, |b, _| {
            b.iter(|| estimate_beta(black_box(&aligned)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimation);
criterion_main!(benches);
