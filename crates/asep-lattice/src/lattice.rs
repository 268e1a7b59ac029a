//! Site states of a 1-D lattice.

use asep_core::ParticleId;
use asep_space::Line;

/// What a single site holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SiteState {
    /// Nobody stands on or is heading to this site.
    #[default]
    Empty,
    /// An idle particle stands here.
    Occupied(ParticleId),
    /// An in-transit particle is heading here.
    Reserved(ParticleId),
}

impl SiteState {
    /// The particle claiming this site, if any.
    pub fn claimant(self) -> Option<ParticleId> {
        match self {
            SiteState::Empty => None,
            SiteState::Occupied(id) | SiteState::Reserved(id) => Some(id),
        }
    }

    /// Whether the site is free for a new particle or jump.
    pub fn is_empty(self) -> bool {
        self == SiteState::Empty
    }
}

/// Fixed-size ordered sequence of sites.
///
/// Resizing is not supported; a structural change rebuilds the lattice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    line: Line,
    sites: Vec<SiteState>,
}

impl Lattice {
    /// An all-empty lattice over `line`.
    pub fn new(line: Line) -> Self {
        Self {
            line,
            sites: vec![SiteState::Empty; line.len()],
        }
    }

    /// The geometry.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always returns `false` — a [`Line`] has at least one site.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// State of `site`, or `None` out of range.
    pub fn get(&self, site: usize) -> Option<SiteState> {
        self.sites.get(site).copied()
    }

    /// Whether `site` is in range and empty.
    pub fn is_free(&self, site: usize) -> bool {
        matches!(self.get(site), Some(SiteState::Empty))
    }

    /// All site states in index order.
    pub fn sites(&self) -> &[SiteState] {
        &self.sites
    }

    /// Per-site occupancy: 1.0 where a site is occupied or reserved.
    pub fn occupancy(&self) -> Vec<f64> {
        self.sites
            .iter()
            .map(|s| if s.is_empty() { 0.0 } else { 1.0 })
            .collect()
    }

    /// Number of claimed sites.
    pub fn claimed_count(&self) -> usize {
        self.sites.iter().filter(|s| !s.is_empty()).count()
    }

    pub(crate) fn set(&mut self, site: usize, state: SiteState) {
        self.sites[site] = state;
    }
}
