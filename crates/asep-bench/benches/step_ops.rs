//! Criterion benchmarks for stepping each update scheme.

use std::hint::black_box;

use asep_bench::{open_profile, reference_profile, stress_profile, FRAME};
use asep_engine::{SimulationController, UpdateScheme};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_step_1k(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_1k");
    for scheme in UpdateScheme::ALL {
        let mut sim = SimulationController::with_config(reference_profile(42, scheme)).unwrap();
        // Warm up: let the first jumps settle so transits are in steady state.
        for _ in 0..60 {
            sim.step(FRAME);
        }
        group.bench_function(BenchmarkId::from_parameter(format!("{scheme:?}")), |b| {
            b.iter(|| black_box(sim.step(FRAME)));
        });
    }
    group.finish();
}

fn bench_step_100k(c: &mut Criterion) {
    let mut sim = SimulationController::with_config(stress_profile(
        42,
        UpdateScheme::ContinuousMarkovChain,
    ))
    .unwrap();
    sim.step(FRAME);

    c.bench_function("step_100k_continuous", |b| {
        b.iter(|| black_box(sim.step(FRAME)));
    });
}

fn bench_open_1000_steps(c: &mut Criterion) {
    c.bench_function("open_1000_steps", |b| {
        b.iter(|| {
            let mut sim = SimulationController::with_config(open_profile(
                42,
                UpdateScheme::ContinuousMarkovChain,
            ))
            .unwrap();
            for _ in 0..1000 {
                black_box(sim.step(FRAME));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_step_1k,
    bench_step_100k,
    bench_open_1000_steps
);
criterion_main!(benches);
