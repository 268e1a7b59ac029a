//! Benchmark profiles for the ASEP simulation core.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 1,000-site ring at half filling
//! - [`stress_profile`]: 100,000-site ring at half filling
//! - [`open_profile`]: 1,000-site open lattice fed by reservoirs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use asep_core::RatesConfig;
use asep_engine::{SimConfig, UpdateScheme};
use asep_space::BoundaryPolicy;

/// Frame time used by every benchmark step.
pub const FRAME: f64 = 1.0 / 60.0;

/// 1,000 sites, 500 particles, periodic, with a small backward rate.
pub fn reference_profile(seed: u64, scheme: UpdateScheme) -> SimConfig {
    ring(1_000, seed, scheme)
}

/// 100,000 sites, 50,000 particles, periodic.
pub fn stress_profile(seed: u64, scheme: UpdateScheme) -> SimConfig {
    ring(100_000, seed, scheme)
}

/// 1,000 open sites in the maximal-current phase, starting empty.
pub fn open_profile(seed: u64, scheme: UpdateScheme) -> SimConfig {
    SimConfig::new(1_000, 0)
        .with_boundary(BoundaryPolicy::OpenReservoir)
        .with_scheme(scheme)
        .with_rates(RatesConfig::totally_asymmetric(1.0).with_reservoir(0.8, 0.8))
        .with_seed(seed)
        .with_statistics(100)
}

fn ring(sites: usize, seed: u64, scheme: UpdateScheme) -> SimConfig {
    SimConfig::new(sites, sites / 2)
        .with_boundary(BoundaryPolicy::Periodic)
        .with_scheme(scheme)
        .with_rates(RatesConfig {
            left_rate: 0.2,
            ..RatesConfig::totally_asymmetric(1.0)
        })
        .with_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        for scheme in UpdateScheme::ALL {
            reference_profile(42, scheme).validate().unwrap();
        }
    }

    #[test]
    fn stress_profile_validates() {
        stress_profile(42, UpdateScheme::ContinuousMarkovChain)
            .validate()
            .unwrap();
    }

    #[test]
    fn open_profile_validates() {
        let config = open_profile(42, UpdateScheme::MonteCarloSweep);
        config.validate().unwrap();
        assert!(config.boundary.is_open());
    }
}
