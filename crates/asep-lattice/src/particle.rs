//! Particle records and locations.

use asep_core::{Edge, ParticleId};

/// Where a particle is, or is heading.
///
/// `Virtual` locations sit just outside the lattice (`-1` and `N`). They
/// are the origin of particles created at a boundary and the target of
/// particles leaving through one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// A real site index in `[0, N)`.
    Site(usize),
    /// The virtual location beyond an edge.
    Virtual(Edge),
}

impl Location {
    /// The real site, if this is one.
    pub fn site(self) -> Option<usize> {
        match self {
            Location::Site(s) => Some(s),
            Location::Virtual(_) => None,
        }
    }

    /// Signed index on a lattice of `len` sites (`-1` and `len` for the
    /// virtual locations).
    pub fn index(self, len: usize) -> i64 {
        match self {
            Location::Site(s) => s as i64,
            Location::Virtual(edge) => edge.virtual_index(len),
        }
    }
}

/// Whether a particle is resting or mid-jump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitState {
    /// Resting on its current site; eligible for new attempts.
    #[default]
    Idle,
    /// Committed to a jump that has not completed yet.
    InTransit,
}

/// A particle owned by the [`ParticleRegistry`](crate::ParticleRegistry).
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub(crate) id: ParticleId,
    pub(crate) current: Location,
    pub(crate) state: TransitState,
    pub(crate) origin: Option<Location>,
    pub(crate) target: Option<Location>,
    pub(crate) progress: f64,
}

impl Particle {
    pub(crate) fn idle(id: ParticleId, site: usize) -> Self {
        Self {
            id,
            current: Location::Site(site),
            state: TransitState::Idle,
            origin: None,
            target: None,
            progress: 0.0,
        }
    }

    /// The particle's id.
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Where the particle is. While in transit this is still the origin.
    pub fn current(&self) -> Location {
        self.current
    }

    /// The current site, if the particle is on a real site.
    pub fn current_site(&self) -> Option<usize> {
        self.current.site()
    }

    /// Idle or in transit.
    pub fn state(&self) -> TransitState {
        self.state
    }

    /// Whether the particle is idle.
    pub fn is_idle(&self) -> bool {
        self.state == TransitState::Idle
    }

    /// Where the jump started. `Some` iff in transit.
    pub fn origin(&self) -> Option<Location> {
        self.origin
    }

    /// Where the jump ends. `Some` iff in transit.
    pub fn target(&self) -> Option<Location> {
        self.target
    }

    /// Jump progress in `[0, 1]`; 0 while idle.
    pub fn progress(&self) -> f64 {
        self.progress
    }
}
