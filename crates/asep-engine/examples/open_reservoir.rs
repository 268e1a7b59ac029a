//! Drive an open-boundary lattice and print its density profile.
//!
//! ```text
//! RUST_LOG=asep_engine=debug cargo run -p asep-engine --example open_reservoir
//! ```

use asep_core::RatesConfig;
use asep_engine::{SimConfig, SimulationController, UpdateScheme};
use asep_space::BoundaryPolicy;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = SimConfig::new(30, 0)
        .with_boundary(BoundaryPolicy::OpenReservoir)
        .with_scheme(UpdateScheme::ContinuousMarkovChain)
        .with_rates(RatesConfig::totally_asymmetric(1.0).with_reservoir(0.6, 0.3))
        .with_statistics(200)
        .with_seed(1);
    let mut sim = SimulationController::with_config(config)?;

    for frame in 0..3_000u32 {
        sim.step(1.0 / 60.0);
        if frame % 600 == 599 {
            let m = sim.last_metrics();
            info!(
                tick = sim.current_tick().0,
                particles = sim.particle_count(),
                in_transit = m.in_transit,
                "progress"
            );
        }
    }

    let snapshot = sim.snapshot();
    if let Some(stats) = snapshot.statistics {
        let profile: String = stats
            .density
            .iter()
            .map(|d| match (d * 4.0).round() as u8 {
                0 => ' ',
                1 => '░',
                2 => '▒',
                3 => '▓',
                _ => '█',
            })
            .collect();
        println!("density |{profile}|");
        let mean: f64 = stats.current.iter().sum::<f64>() / stats.current.len().max(1) as f64;
        println!("mean current {mean:.3}");
    }
    Ok(())
}
