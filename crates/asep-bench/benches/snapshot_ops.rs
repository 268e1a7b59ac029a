//! Criterion benchmarks for snapshots and initialization.

use std::hint::black_box;

use asep_bench::{open_profile, reference_profile, FRAME};
use asep_engine::{SimulationController, UpdateScheme};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_snapshot_1k(c: &mut Criterion) {
    let mut sim = SimulationController::with_config(reference_profile(
        7,
        UpdateScheme::ContinuousMarkovChain,
    ))
    .unwrap();
    for _ in 0..30 {
        sim.step(FRAME);
    }
    c.bench_function("snapshot_1k", |b| {
        b.iter(|| black_box(sim.snapshot()));
    });
}

fn bench_snapshot_with_statistics(c: &mut Criterion) {
    let mut sim =
        SimulationController::with_config(open_profile(7, UpdateScheme::MonteCarloSweep))
            .unwrap();
    // Fill the statistics window.
    for _ in 0..100 {
        sim.step(FRAME);
    }
    c.bench_function("snapshot_open_1k_stats", |b| {
        b.iter(|| black_box(sim.snapshot()));
    });
}

fn bench_initialize_1k(c: &mut Criterion) {
    c.bench_function("initialize_1k", |b| {
        b.iter(|| {
            let sim = SimulationController::with_config(reference_profile(
                black_box(3),
                UpdateScheme::ProbabilisticAttempt,
            ))
            .unwrap();
            black_box(sim.particle_count())
        });
    });
}

criterion_group!(
    benches,
    bench_snapshot_1k,
    bench_initialize_1k,
    bench_snapshot_with_statistics
);
criterion_main!(benches);
