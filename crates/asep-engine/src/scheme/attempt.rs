//! Hop and entry attempts shared by every scheme.
//!
//! The boundary policy decides whether a hop is allowed; the registry then
//! re-checks exclusion and commits. Blocked and rejected attempts are
//! ordinary outcomes, counted in the step metrics.

use asep_core::{Direction, Edge, ParticleId};
use asep_lattice::{Location, TransitError};
use asep_space::{EntryPoint, EntryResolution, HopRequest, Resolution, Target};
use tracing::trace;

use super::SchemeContext;

/// Result of a hop attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HopOutcome {
    /// The particle is now in transit towards this location.
    Committed(Location),
    /// The target is occupied or reserved.
    Blocked,
    /// The boundary policy refused, or the particle cannot hop.
    Rejected,
}

/// Attempt to hop particle `id` in `direction`.
pub(crate) fn hop(ctx: &mut SchemeContext<'_>, id: ParticleId, direction: Direction) -> HopOutcome {
    let Some(particle) = ctx.registry.get(id) else {
        return HopOutcome::Rejected;
    };
    let Some(site) = particle.current_site() else {
        return HopOutcome::Rejected;
    };
    let request = HopRequest {
        site,
        direction,
        idle: particle.is_idle(),
    };
    let line = *ctx.registry.line();
    let target = match ctx
        .boundary
        .resolve(&line, request, ctx.rates, &mut *ctx.rng)
    {
        Resolution::Accepted(Target::Site(t)) => Location::Site(t),
        Resolution::Accepted(Target::Destroy(edge)) => Location::Virtual(edge),
        Resolution::Rejected => {
            ctx.metrics.boundary_rejections += 1;
            return HopOutcome::Rejected;
        }
    };

    match ctx.registry.begin_transit(id, target) {
        Ok(()) => {
            ctx.metrics.jumps_committed += 1;
            if let Location::Virtual(edge) = target {
                ctx.metrics.exits += 1;
                trace!(%id, site, ?edge, "exit committed");
            } else {
                trace!(%id, site, ?target, "jump committed");
            }
            HopOutcome::Committed(target)
        }
        Err(TransitError::Occupied { .. }) => {
            ctx.metrics.jumps_blocked += 1;
            HopOutcome::Blocked
        }
        Err(_) => HopOutcome::Rejected,
    }
}

/// Create a particle through `edge` onto `site` if the site is free.
pub(crate) fn admit(ctx: &mut SchemeContext<'_>, edge: Edge, site: usize) -> Option<ParticleId> {
    match ctx.registry.admit(edge, site) {
        Ok(id) => {
            ctx.metrics.insertions += 1;
            trace!(%id, site, ?edge, "particle entered");
            Some(id)
        }
        Err(TransitError::Occupied { .. }) => {
            ctx.metrics.jumps_blocked += 1;
            None
        }
        Err(_) => None,
    }
}

/// A fired entry clock: ask the policy, then try to admit.
pub(crate) fn entry(ctx: &mut SchemeContext<'_>, entry: &EntryPoint) -> Option<ParticleId> {
    match ctx.boundary.resolve_entry(entry, &mut *ctx.rng) {
        EntryResolution::Admit(site) => admit(ctx, entry.edge, site),
        EntryResolution::Declined => None,
    }
}
