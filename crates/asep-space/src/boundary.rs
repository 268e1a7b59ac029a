//! Boundary policies: resolving hops and entries at the lattice ends.
//!
//! A policy maps a hop request `(site, direction)` to an accepted target,
//! an accepted destruction, or a rejection, and decides whether a boundary
//! entry admits a new particle. Policies consume variates for the
//! probabilistic boundary rules (alpha, beta) but never touch lattice
//! state; exclusion is the engine's job.

use asep_core::{Direction, Edge, RandomVariateSource, RatesConfig};
use smallvec::{smallvec, SmallVec};

use crate::line::Line;

/// How the lattice treats particles at its ends.
///
/// # Examples
///
/// ```
/// use asep_core::{Direction, RatesConfig, SeededSource};
/// use asep_space::{BoundaryPolicy, HopRequest, Line, Resolution, Target};
///
/// let line = Line::new(6).unwrap();
/// let rates = RatesConfig::default();
/// let mut rng = SeededSource::new(0);
///
/// let hop = HopRequest::idle(5, Direction::Right);
/// assert_eq!(
///     BoundaryPolicy::Periodic.resolve(&line, hop, &rates, &mut rng),
///     Resolution::Accepted(Target::Site(0)),
/// );
/// assert_eq!(
///     BoundaryPolicy::Closed.resolve(&line, hop, &rates, &mut rng),
///     Resolution::Rejected,
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Hard walls: hops past either end are rejected.
    #[default]
    Closed,
    /// Ring: hops past one end re-enter at the other.
    Periodic,
    /// Reservoirs: insertion at site 0 with probability alpha, removal
    /// from site `N - 1` with probability beta. Interior is closed.
    OpenReservoir,
    /// Portals: hops past either end destroy the particle; an
    /// independently-rated creation process spawns particles at both ends.
    PortalExchange,
}

/// A hop attempt by the particle on `site`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HopRequest {
    /// The particle's current site.
    pub site: usize,
    /// Requested direction.
    pub direction: Direction,
    /// Whether the particle is idle. Non-idle particles are always rejected.
    pub idle: bool,
}

impl HopRequest {
    /// A request from an idle particle.
    pub fn idle(site: usize, direction: Direction) -> Self {
        Self {
            site,
            direction,
            idle: true,
        }
    }
}

/// Where an accepted hop leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// A real site. Still subject to the engine's exclusion check.
    Site(usize),
    /// Off the lattice through `Edge`: the particle is destroyed on arrival.
    Destroy(Edge),
}

/// Outcome of resolving a [`HopRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The hop is allowed by the boundary rules.
    Accepted(Target),
    /// The hop is not allowed; the particle stays put.
    Rejected,
}

/// A boundary location through which particles can be created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryPoint {
    /// The edge particles enter through.
    pub edge: Edge,
    /// The real site they enter onto.
    pub site: usize,
    /// Rate of the entry clock for clock-driven schemes.
    pub rate: f64,
    /// Probability an entry is admitted once its clock fires.
    pub acceptance: f64,
    /// Probability an entry is admitted by a single sweep trial.
    pub trial_probability: f64,
}

/// Outcome of an entry attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryResolution {
    /// Create a particle heading onto this site (if it is free).
    Admit(usize),
    /// No particle this time.
    Declined,
}

impl BoundaryPolicy {
    /// All four policies.
    pub const ALL: [BoundaryPolicy; 4] = [
        BoundaryPolicy::Closed,
        BoundaryPolicy::Periodic,
        BoundaryPolicy::OpenReservoir,
        BoundaryPolicy::PortalExchange,
    ];

    /// Whether the particle count may change through boundary exchange.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            BoundaryPolicy::OpenReservoir | BoundaryPolicy::PortalExchange
        )
    }

    /// Whether bonds wrap around from `N - 1` to `0`.
    pub fn wraps(&self) -> bool {
        matches!(self, BoundaryPolicy::Periodic)
    }

    /// Resolve a hop request against this policy.
    ///
    /// Consumes a uniform draw only for the OpenReservoir removal rule.
    pub fn resolve<R: RandomVariateSource + ?Sized>(
        &self,
        line: &Line,
        request: HopRequest,
        rates: &RatesConfig,
        rng: &mut R,
    ) -> Resolution {
        if !request.idle || !line.contains(request.site) {
            return Resolution::Rejected;
        }
        let HopRequest {
            site, direction, ..
        } = request;

        if let Some(target) = line.step_closed(site, direction) {
            return Resolution::Accepted(Target::Site(target));
        }

        // The hop runs off an end.
        match self {
            BoundaryPolicy::Closed => Resolution::Rejected,
            BoundaryPolicy::Periodic => {
                Resolution::Accepted(Target::Site(line.step_wrapped(site, direction)))
            }
            BoundaryPolicy::OpenReservoir => match direction {
                // Site 0 exchanges with the left reservoir by insertion only.
                Direction::Left => Resolution::Rejected,
                Direction::Right => {
                    if rng.bernoulli(rates.reservoir_beta) {
                        Resolution::Accepted(Target::Destroy(Edge::Right))
                    } else {
                        Resolution::Rejected
                    }
                }
            },
            BoundaryPolicy::PortalExchange => {
                Resolution::Accepted(Target::Destroy(direction.edge()))
            }
        }
    }

    /// The entry points this policy exposes on `line`, left first.
    pub fn entry_points(&self, line: &Line, rates: &RatesConfig) -> SmallVec<[EntryPoint; 2]> {
        match self {
            BoundaryPolicy::Closed | BoundaryPolicy::Periodic => SmallVec::new(),
            BoundaryPolicy::OpenReservoir => smallvec![EntryPoint {
                edge: Edge::Left,
                site: Edge::Left.adjacent_site(line.len()),
                rate: rates.right_rate,
                acceptance: rates.reservoir_alpha,
                trial_probability: rates.reservoir_alpha,
            }],
            BoundaryPolicy::PortalExchange => Edge::ALL
                .iter()
                .map(|&edge| EntryPoint {
                    edge,
                    site: edge.adjacent_site(line.len()),
                    rate: rates.portal_creation_rate,
                    acceptance: 1.0,
                    trial_probability: rates.portal_creation_rate.min(1.0),
                })
                .collect(),
        }
    }

    /// The entry point for `edge`, if this policy has one there.
    pub fn entry_point(&self, line: &Line, rates: &RatesConfig, edge: Edge) -> Option<EntryPoint> {
        self.entry_points(line, rates)
            .into_iter()
            .find(|e| e.edge == edge)
    }

    /// Decide whether a fired entry clock admits a particle.
    ///
    /// The caller still has to check that the entry site is free.
    pub fn resolve_entry<R: RandomVariateSource + ?Sized>(
        &self,
        entry: &EntryPoint,
        rng: &mut R,
    ) -> EntryResolution {
        if rng.bernoulli(entry.acceptance) {
            EntryResolution::Admit(entry.site)
        } else {
            EntryResolution::Declined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asep_core::SeededSource;
    use asep_test_utils::ScriptedSource;
    use proptest::prelude::*;

    fn rates() -> RatesConfig {
        RatesConfig::default().with_reservoir(0.9, 0.3)
    }

    #[test]
    fn closed_rejects_both_ends() {
        let line = Line::new(5).unwrap();
        let mut rng = SeededSource::new(0);
        let p = BoundaryPolicy::Closed;
        assert_eq!(
            p.resolve(&line, HopRequest::idle(0, Direction::Left), &rates(), &mut rng),
            Resolution::Rejected
        );
        assert_eq!(
            p.resolve(&line, HopRequest::idle(4, Direction::Right), &rates(), &mut rng),
            Resolution::Rejected
        );
        assert_eq!(
            p.resolve(&line, HopRequest::idle(2, Direction::Right), &rates(), &mut rng),
            Resolution::Accepted(Target::Site(3))
        );
    }

    #[test]
    fn periodic_wraps() {
        let line = Line::new(6).unwrap();
        let mut rng = SeededSource::new(0);
        let p = BoundaryPolicy::Periodic;
        assert_eq!(
            p.resolve(&line, HopRequest::idle(5, Direction::Right), &rates(), &mut rng),
            Resolution::Accepted(Target::Site(0))
        );
        assert_eq!(
            p.resolve(&line, HopRequest::idle(0, Direction::Left), &rates(), &mut rng),
            Resolution::Accepted(Target::Site(5))
        );
    }

    #[test]
    fn non_idle_always_rejected() {
        let line = Line::new(6).unwrap();
        let mut rng = SeededSource::new(0);
        let req = HopRequest {
            site: 2,
            direction: Direction::Right,
            idle: false,
        };
        for p in BoundaryPolicy::ALL {
            assert_eq!(p.resolve(&line, req, &rates(), &mut rng), Resolution::Rejected);
        }
    }

    #[test]
    fn open_reservoir_removal_follows_beta_draw() {
        let line = Line::new(4).unwrap();
        let p = BoundaryPolicy::OpenReservoir;
        let req = HopRequest::idle(3, Direction::Right);

        let mut below = ScriptedSource::new(vec![0.1]);
        assert_eq!(
            p.resolve(&line, req, &rates(), &mut below),
            Resolution::Accepted(Target::Destroy(Edge::Right))
        );

        let mut above = ScriptedSource::new(vec![0.5]);
        assert_eq!(p.resolve(&line, req, &rates(), &mut above), Resolution::Rejected);
    }

    #[test]
    fn open_reservoir_left_wall_is_closed_for_particles() {
        let line = Line::new(4).unwrap();
        let mut rng = ScriptedSource::new(vec![0.0]);
        let p = BoundaryPolicy::OpenReservoir;
        assert_eq!(
            p.resolve(&line, HopRequest::idle(0, Direction::Left), &rates(), &mut rng),
            Resolution::Rejected
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn portal_destroys_at_both_ends() {
        let line = Line::new(4).unwrap();
        let mut rng = SeededSource::new(0);
        let p = BoundaryPolicy::PortalExchange;
        assert_eq!(
            p.resolve(&line, HopRequest::idle(0, Direction::Left), &rates(), &mut rng),
            Resolution::Accepted(Target::Destroy(Edge::Left))
        );
        assert_eq!(
            p.resolve(&line, HopRequest::idle(3, Direction::Right), &rates(), &mut rng),
            Resolution::Accepted(Target::Destroy(Edge::Right))
        );
    }

    #[test]
    fn entry_points_per_policy() {
        let line = Line::new(8).unwrap();
        let r = rates();
        assert!(BoundaryPolicy::Closed.entry_points(&line, &r).is_empty());
        assert!(BoundaryPolicy::Periodic.entry_points(&line, &r).is_empty());

        let open = BoundaryPolicy::OpenReservoir.entry_points(&line, &r);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].edge, Edge::Left);
        assert_eq!(open[0].site, 0);
        assert_eq!(open[0].acceptance, 0.9);

        let portal = BoundaryPolicy::PortalExchange.entry_points(&line, &r);
        let sites: Vec<usize> = portal.iter().map(|e| e.site).collect();
        assert_eq!(sites, vec![0, 7]);
        assert!(portal.iter().all(|e| e.rate == r.portal_creation_rate));
        assert!(BoundaryPolicy::PortalExchange
            .entry_point(&line, &r, Edge::Right)
            .is_some());
        assert!(BoundaryPolicy::OpenReservoir
            .entry_point(&line, &r, Edge::Right)
            .is_none());
    }

    #[test]
    fn resolve_entry_uses_acceptance() {
        let line = Line::new(8).unwrap();
        let p = BoundaryPolicy::OpenReservoir;
        let entry = p.entry_points(&line, &rates())[0];
        let mut low = ScriptedSource::new(vec![0.5]);
        assert_eq!(p.resolve_entry(&entry, &mut low), EntryResolution::Admit(0));
        let mut high = ScriptedSource::new(vec![0.95]);
        assert_eq!(p.resolve_entry(&entry, &mut high), EntryResolution::Declined);
    }

    fn arb_policy() -> impl Strategy<Value = BoundaryPolicy> {
        prop_oneof![
            Just(BoundaryPolicy::Closed),
            Just(BoundaryPolicy::Periodic),
            Just(BoundaryPolicy::OpenReservoir),
            Just(BoundaryPolicy::PortalExchange),
        ]
    }

    proptest! {
        #[test]
        fn accepted_sites_are_adjacent_and_in_range(
            policy in arb_policy(),
            len in 1usize..40,
            site in 0usize..40,
            right in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let site = site % len;
            let line = Line::new(len).unwrap();
            let dir = if right { Direction::Right } else { Direction::Left };
            let mut rng = SeededSource::new(seed);
            if let Resolution::Accepted(Target::Site(t)) =
                policy.resolve(&line, HopRequest::idle(site, dir), &rates(), &mut rng)
            {
                prop_assert!(t < len);
                prop_assert!(t == line.step_wrapped(site, dir));
            }
        }

        #[test]
        fn closed_and_periodic_never_destroy(
            len in 1usize..40,
            site in 0usize..40,
            right in any::<bool>(),
        ) {
            let site = site % len;
            let line = Line::new(len).unwrap();
            let dir = if right { Direction::Right } else { Direction::Left };
            let mut rng = SeededSource::new(1);
            for p in [BoundaryPolicy::Closed, BoundaryPolicy::Periodic] {
                let res = p.resolve(&line, HopRequest::idle(site, dir), &rates(), &mut rng);
                prop_assert!(!matches!(res, Resolution::Accepted(Target::Destroy(_))));
            }
        }
    }
}
