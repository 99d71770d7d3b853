use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use yieldsim::coverage::{CoverageMatrix, KeplerEra};
use yieldsim::detection::count_transits;

/// Ephemerides counted per timed batch.
const EPHEMERIDES: usize = 2_000;

/// TESS extended-mission grid: 13.7-day sectors, 114 epochs.
const TESS_EPOCH_LENGTH: f64 = 13.7;
const TESS_EPOCHS: usize = 114;

/// Kepler quarter grid: 91.3125-day quarters.
const KEPLER_EPOCH_LENGTH: f64 = 91.3125;

/// Pre-generate (t0, period) pairs so the timed section contains only the
/// transit-time walk and the coverage lookups.
#[inline]
fn random_ephemerides(rng: &mut StdRng, period_lo: f64, period_hi: f64) -> Vec<(f64, f64)> {
    (0..EPHEMERIDES)
        .map(|_| {
            let period = rng.random_range(period_lo..period_hi);
            let t0 = rng.random_range(0.0..period);
            (t0, period)
        })
        .collect()
}

/// Short periods stress the loop: up to ~1500 transit times fall inside the
/// 1561.8-day TESS horizon.
fn bench_short_period(c: &mut Criterion) {
    let coverage = CoverageMatrix::uniform(1, TESS_EPOCHS, 1);

    c.bench_function("count_transits/tess_short_period_1..10d", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
                random_ephemerides(&mut rng, 1.0, 10.0)
            },
            |cases| {
                for (t0, period) in cases {
                    let n = count_transits(
                        black_box(t0),
                        black_box(period),
                        &coverage,
                        0,
                        TESS_EPOCH_LENGTH,
                        TESS_EPOCHS,
                    );
                    black_box(n);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Long periods exit the walk after a handful of iterations.
fn bench_long_period(c: &mut Criterion) {
    let coverage = CoverageMatrix::uniform(1, TESS_EPOCHS, 1);

    c.bench_function("count_transits/tess_long_period_100..500d", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(0xBADF00D);
                random_ephemerides(&mut rng, 100.0, 500.0)
            },
            |cases| {
                for (t0, period) in cases {
                    let n = count_transits(
                        black_box(t0),
                        black_box(period),
                        &coverage,
                        0,
                        TESS_EPOCH_LENGTH,
                        TESS_EPOCHS,
                    );
                    black_box(n);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Two-era Kepler mask: the walk still visits every transit time, but most of
/// the grid between the prime mission and K2 is dark.
fn bench_kepler_mask(c: &mut Criterion) {
    let coverage = KeplerEra::K1K2.coverage(1);
    let window = coverage.n_epochs();

    c.bench_function("count_transits/kepler_k1k2_mask_20..400d", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(0xCAFE);
                random_ephemerides(&mut rng, 20.0, 400.0)
            },
            |cases| {
                for (t0, period) in cases {
                    let n = count_transits(
                        black_box(t0),
                        black_box(period),
                        &coverage,
                        0,
                        KEPLER_EPOCH_LENGTH,
                        window,
                    );
                    black_box(n);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_short_period, bench_long_period, bench_kepler_mask
);
criterion_main!(benches);
