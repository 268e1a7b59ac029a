//! Owned, point-in-time views of simulation state.

use asep_core::{ParticleId, TickId};
use asep_lattice::{Location, Particle, SiteState, TransitState};

use crate::controller::ControllerState;
use crate::stats::StatisticsSample;

/// One lattice site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SiteView {
    /// The idle particle standing here.
    pub occupant: Option<ParticleId>,
    /// The in-transit particle heading here.
    pub reserved: Option<ParticleId>,
}

impl SiteView {
    /// Whether the site is claimed by anyone.
    pub fn is_claimed(&self) -> bool {
        self.occupant.is_some() || self.reserved.is_some()
    }
}

impl From<SiteState> for SiteView {
    fn from(state: SiteState) -> Self {
        match state {
            SiteState::Empty => Self::default(),
            SiteState::Occupied(id) => Self {
                occupant: Some(id),
                reserved: None,
            },
            SiteState::Reserved(id) => Self {
                occupant: None,
                reserved: Some(id),
            },
        }
    }
}

/// One particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    /// Stable id.
    pub id: ParticleId,
    /// Where the particle currently is (its origin while in transit).
    pub current: Location,
    /// Idle or in transit.
    pub transit_state: TransitState,
    /// Where the jump started. `Some` iff in transit.
    pub origin: Option<Location>,
    /// Where the jump ends. `Some` iff in transit.
    pub target: Option<Location>,
    /// Jump progress in `[0, 1)`; 0 when idle.
    pub progress: f64,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            id: p.id(),
            current: p.current(),
            transit_state: p.state(),
            origin: p.origin(),
            target: p.target(),
            progress: p.progress(),
        }
    }
}

/// Density and current statistics at snapshot time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatisticsView {
    /// Per-site density averaged over the window.
    pub density: Vec<f64>,
    /// Per-bond current averaged over the window.
    pub current: Vec<f64>,
    /// Every retained sample, oldest first.
    pub history: Vec<StatisticsSample>,
}

/// Immutable copy of the simulation state.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Steps taken since the last reset.
    pub tick: TickId,
    /// Virtual time since the last reset.
    pub virtual_time: f64,
    /// Controller lifecycle state.
    pub state: ControllerState,
    /// Every site, left to right.
    pub sites: Vec<SiteView>,
    /// Every particle, in creation order.
    pub particles: Vec<ParticleView>,
    /// Statistics, if an aggregator is attached.
    pub statistics: Option<StatisticsView>,
}

impl Snapshot {
    /// Number of particles, including those in transit.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of particles in transit.
    pub fn in_transit(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.transit_state == TransitState::InTransit)
            .count()
    }

    /// The particle with `id`.
    pub fn particle(&self, id: ParticleId) -> Option<&ParticleView> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Sites of all idle particles, ascending.
    pub fn idle_sites(&self) -> Vec<usize> {
        self.sites
            .iter()
            .enumerate()
            .filter(|(_, s)| s.occupant.is_some())
            .map(|(i, _)| i)
            .collect()
    }

    /// Per-site occupancy, counting reserved sites as occupied.
    pub fn occupancy(&self) -> Vec<f64> {
        self.sites
            .iter()
            .map(|s| if s.is_claimed() { 1.0 } else { 0.0 })
            .collect()
    }
}
