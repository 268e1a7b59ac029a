//! Particle ownership and the transit state machine.
//!
//! Every transition that can change occupancy goes through
//! [`ParticleRegistry`]: interactive insert/remove, boundary admission,
//! jump commit ([`begin_transit`](ParticleRegistry::begin_transit)) and
//! jump completion ([`advance`](ParticleRegistry::advance)).
//!
//! ```text
//!            begin_transit(target)            advance() reaches 1.0
//!   Idle@s ───────────────────────▶ InTransit ─────────────────────▶ Idle@t
//!   (s: Occupied)                 (s: Empty, t: Reserved)          (t: Occupied)
//! ```
//!
//! A transit towards a virtual location ends by removing the particle; an
//! admission starts a transit from a virtual location.

use asep_core::{Edge, InvariantViolation, MutationError, ParticleId};
use asep_space::Line;
use indexmap::IndexMap;

use crate::error::TransitError;
use crate::lattice::{Lattice, SiteState};
use crate::particle::{Location, Particle, TransitState};

/// A jump that completed during [`ParticleRegistry::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrival {
    /// The particle settled on a real site and is idle again.
    Settled {
        /// The particle.
        id: ParticleId,
        /// Its new site.
        site: usize,
    },
    /// The particle left the lattice and was removed.
    Departed {
        /// The removed particle.
        id: ParticleId,
        /// The edge it left through.
        edge: Edge,
    },
}

/// Exclusive owner of all particles and the lattice they live on.
///
/// Particles iterate in creation order, which keeps every scheduling pass
/// deterministic.
#[derive(Clone, Debug)]
pub struct ParticleRegistry {
    lattice: Lattice,
    particles: IndexMap<ParticleId, Particle>,
    next_id: u64,
}

impl ParticleRegistry {
    /// An empty registry over `line`. Ids start at 0.
    pub fn new(line: Line) -> Self {
        Self {
            lattice: Lattice::new(line),
            particles: IndexMap::new(),
            next_id: 0,
        }
    }

    /// The lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The lattice geometry.
    pub fn line(&self) -> &Line {
        self.lattice.line()
    }

    /// Number of particles, including those in transit.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether there are no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Look up a particle.
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    /// All particles in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    /// Ids of all idle particles, in creation order.
    pub fn idle_ids(&self) -> Vec<ParticleId> {
        self.particles
            .values()
            .filter(|p| p.is_idle())
            .map(|p| p.id)
            .collect()
    }

    /// Number of particles currently in transit.
    pub fn in_transit_count(&self) -> usize {
        self.particles.values().filter(|p| !p.is_idle()).count()
    }

    /// The idle particle standing on `site`, if any.
    pub fn occupant(&self, site: usize) -> Option<ParticleId> {
        match self.lattice.get(site) {
            Some(SiteState::Occupied(id)) => Some(id),
            _ => None,
        }
    }

    /// Whether `site` is in range and neither occupied nor reserved.
    pub fn is_free(&self, site: usize) -> bool {
        self.lattice.is_free(site)
    }

    fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a new idle particle on `site`.
    ///
    /// Fails with `OutOfRange` or `Occupied` (occupied or reserved).
    pub fn insert(&mut self, site: usize) -> Result<ParticleId, MutationError> {
        let len = self.lattice.len();
        match self.lattice.get(site) {
            None => return Err(MutationError::OutOfRange { site, len }),
            Some(SiteState::Empty) => {}
            Some(_) => return Err(MutationError::Occupied { site }),
        }
        let id = self.allocate_id();
        self.lattice.set(site, SiteState::Occupied(id));
        self.particles.insert(id, Particle::idle(id, site));
        Ok(id)
    }

    /// Remove an idle particle, freeing its site.
    ///
    /// Fails with `NotFound`, or `NotIdle` while the particle is in transit.
    pub fn remove(&mut self, id: ParticleId) -> Result<Particle, MutationError> {
        let particle = self
            .particles
            .get(&id)
            .ok_or(MutationError::NotFound { id })?;
        if !particle.is_idle() {
            return Err(MutationError::NotIdle { id });
        }
        if let Some(site) = particle.current_site() {
            self.lattice.set(site, SiteState::Empty);
        }
        self.particles
            .shift_remove(&id)
            .ok_or(MutationError::NotFound { id })
    }

    /// Create a particle entering through `edge` onto `site`.
    ///
    /// The new particle starts in transit from the virtual location with
    /// `site` reserved. Fails with `Occupied` if `site` is claimed.
    pub fn admit(&mut self, edge: Edge, site: usize) -> Result<ParticleId, TransitError> {
        let len = self.lattice.len();
        match self.lattice.get(site) {
            None => return Err(TransitError::OutOfRange { site, len }),
            Some(SiteState::Empty) => {}
            Some(_) => return Err(TransitError::Occupied { site }),
        }
        let id = self.allocate_id();
        self.lattice.set(site, SiteState::Reserved(id));
        let from = Location::Virtual(edge);
        self.particles.insert(
            id,
            Particle {
                id,
                current: from,
                state: TransitState::InTransit,
                origin: Some(from),
                target: Some(Location::Site(site)),
                progress: 0.0,
            },
        );
        Ok(id)
    }

    /// Commit an idle particle to a jump towards `target`.
    ///
    /// Re-checks exclusion: a real target must be empty. On success the
    /// origin site is released, the target reserved, and progress reset
    /// to 0.
    pub fn begin_transit(&mut self, id: ParticleId, target: Location) -> Result<(), TransitError> {
        let len = self.lattice.len();
        let particle = self.particles.get(&id).ok_or(TransitError::NotFound { id })?;
        if !particle.is_idle() {
            return Err(TransitError::NotIdle { id });
        }
        let origin = particle.current;
        if let Location::Site(t) = target {
            match self.lattice.get(t) {
                None => return Err(TransitError::OutOfRange { site: t, len }),
                Some(SiteState::Empty) => {}
                Some(_) => return Err(TransitError::Occupied { site: t }),
            }
        }

        if let Some(s) = origin.site() {
            self.lattice.set(s, SiteState::Empty);
        }
        if let Location::Site(t) = target {
            self.lattice.set(t, SiteState::Reserved(id));
        }
        if let Some(p) = self.particles.get_mut(&id) {
            p.state = TransitState::InTransit;
            p.origin = Some(origin);
            p.target = Some(target);
            p.progress = 0.0;
        }
        Ok(())
    }

    /// Advance every in-transit particle by `delta` progress and complete
    /// those reaching 1.
    ///
    /// Non-positive or NaN `delta` is a no-op. Returns the completed jumps
    /// in creation order.
    pub fn advance(&mut self, delta: f64) -> Vec<Arrival> {
        if delta.is_nan() || delta <= 0.0 {
            return Vec::new();
        }
        let mut done = Vec::new();
        for p in self.particles.values_mut() {
            if p.state != TransitState::InTransit {
                continue;
            }
            p.progress = (p.progress + delta).min(1.0);
            if p.progress >= 1.0 {
                done.push(p.id);
            }
        }
        done.into_iter().filter_map(|id| self.complete(id)).collect()
    }

    fn complete(&mut self, id: ParticleId) -> Option<Arrival> {
        let target = self.particles.get(&id)?.target?;
        match target {
            Location::Site(site) => {
                self.lattice.set(site, SiteState::Occupied(id));
                let p = self.particles.get_mut(&id)?;
                p.current = target;
                p.state = TransitState::Idle;
                p.origin = None;
                p.target = None;
                p.progress = 0.0;
                Some(Arrival::Settled { id, site })
            }
            Location::Virtual(edge) => {
                self.particles.shift_remove(&id);
                Some(Arrival::Departed { id, edge })
            }
        }
    }

    /// Verify the exclusion and ownership invariants.
    ///
    /// Every idle particle's site must record it as `Occupied`, every
    /// in-transit particle's real target must record it as `Reserved`,
    /// and every claimed site must be claimed by exactly that particle.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for p in self.particles.values() {
            let claim = match p.state {
                TransitState::Idle => {
                    if p.target.is_some() || p.origin.is_some() || p.progress != 0.0 {
                        return Err(InvariantViolation::InconsistentTransit {
                            id: p.id,
                            reason: "idle particle carries transit fields".to_string(),
                        });
                    }
                    match p.current {
                        Location::Site(s) => Some((s, SiteState::Occupied(p.id))),
                        Location::Virtual(_) => {
                            return Err(InvariantViolation::InconsistentTransit {
                                id: p.id,
                                reason: "idle particle off the lattice".to_string(),
                            })
                        }
                    }
                }
                TransitState::InTransit => {
                    let Some(target) = p.target else {
                        return Err(InvariantViolation::InconsistentTransit {
                            id: p.id,
                            reason: "in transit without a target".to_string(),
                        });
                    };
                    if !(0.0..1.0).contains(&p.progress) {
                        return Err(InvariantViolation::InconsistentTransit {
                            id: p.id,
                            reason: format!("progress {} outside [0, 1)", p.progress),
                        });
                    }
                    target.site().map(|t| (t, SiteState::Reserved(p.id)))
                }
            };
            if let Some((site, expected)) = claim {
                let recorded = self.lattice.get(site);
                if recorded != Some(expected) {
                    return Err(InvariantViolation::DoubleOccupancy {
                        site,
                        recorded: recorded.and_then(SiteState::claimant),
                        claimant: p.id,
                    });
                }
            }
        }

        for (site, state) in self.lattice.sites().iter().enumerate() {
            let Some(id) = state.claimant() else { continue };
            let claims = self.particles.get(&id).is_some_and(|p| match state {
                SiteState::Occupied(_) => p.is_idle() && p.current == Location::Site(site),
                SiteState::Reserved(_) => {
                    !p.is_idle() && p.target == Some(Location::Site(site))
                }
                SiteState::Empty => false,
            });
            if !claims {
                return Err(InvariantViolation::StaleSite { site, id });
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn lattice_mut(&mut self) -> &mut Lattice {
        &mut self.lattice
    }
}
