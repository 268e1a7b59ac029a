//! Reusable configurations and snapshot assertions.
//!
//! - [`small_config`]: a 16-site lattice with 6 particles for any
//!   boundary/scheme pair.
//! - [`every_combination`]: all twelve boundary × scheme pairs.
//! - [`assert_exclusion`] and [`assert_conserved`]: invariant checks on
//!   an owned [`Snapshot`].

use std::collections::HashSet;

use asep_engine::{SimConfig, Snapshot, UpdateScheme};
use asep_lattice::{Location, TransitState};
use asep_space::BoundaryPolicy;

/// A small lattice with every rate switched on.
pub fn small_config(boundary: BoundaryPolicy, scheme: UpdateScheme, seed: u64) -> SimConfig {
    let mut config = SimConfig::new(16, 6)
        .with_boundary(boundary)
        .with_scheme(scheme)
        .with_seed(seed)
        .with_transit_speed(8.0);
    config.rates.left_rate = 0.3;
    config
}

/// Every boundary policy paired with every update scheme.
pub fn every_combination() -> Vec<(BoundaryPolicy, UpdateScheme)> {
    BoundaryPolicy::ALL
        .iter()
        .flat_map(|&b| UpdateScheme::ALL.iter().map(move |&s| (b, s)))
        .collect()
}

/// Assert that no site is claimed twice and that sites and particles agree.
///
/// # Panics
///
/// Panics with a description of the first violation found.
pub fn assert_exclusion(snapshot: &Snapshot) {
    let mut idle_sites = HashSet::new();
    let mut targets = HashSet::new();
    for p in &snapshot.particles {
        match p.transit_state {
            TransitState::Idle => {
                let Location::Site(site) = p.current else {
                    panic!("idle particle {} is off the lattice", p.id);
                };
                assert!(
                    idle_sites.insert(site),
                    "two idle particles on site {site} at tick {:?}",
                    snapshot.tick
                );
                assert_eq!(
                    snapshot.sites[site].occupant,
                    Some(p.id),
                    "site {site} does not record its occupant"
                );
            }
            TransitState::InTransit => {
                let Some(target) = p.target else {
                    panic!("particle {} in transit without a target", p.id);
                };
                if let Location::Site(site) = target {
                    assert!(
                        targets.insert(site),
                        "two particles heading to site {site} at tick {:?}",
                        snapshot.tick
                    );
                    assert_eq!(
                        snapshot.sites[site].reserved,
                        Some(p.id),
                        "site {site} does not record its reservation"
                    );
                }
                assert!(
                    (0.0..1.0).contains(&p.progress),
                    "progress {} out of range",
                    p.progress
                );
            }
        }
    }
    assert!(
        idle_sites.is_disjoint(&targets),
        "a reserved site also holds an idle particle"
    );
    for (site, view) in snapshot.sites.iter().enumerate() {
        assert!(
            !(view.occupant.is_some() && view.reserved.is_some()),
            "site {site} is both occupied and reserved"
        );
    }
}

/// Assert the snapshot holds exactly `expected` particles.
pub fn assert_conserved(snapshot: &Snapshot, expected: usize) {
    assert_eq!(
        snapshot.particle_count(),
        expected,
        "particle count changed by tick {:?}",
        snapshot.tick
    );
}
