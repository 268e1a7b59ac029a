//! Monte Carlo sweep: `N` random-site trials per step.
//!
//! All `N` sites are drawn before the first trial, fixing the step's sweep
//! order. An idle particle on a drawn site picks a direction with the
//! per-trial probabilities from
//! [`sweep_probabilities`](asep_core::RatesConfig::sweep_probabilities)
//! and attempts the hop; an empty boundary entry site attempts an
//! insertion. Reserved sites are skipped. The sweep keeps no clocks.

use asep_core::{Direction, ParticleId};
use asep_lattice::SiteState;

use super::attempt;
use super::{SchemeContext, UpdateRule};

#[derive(Debug)]
pub(crate) struct SweepRule;

impl SweepRule {
    fn trial(ctx: &mut SchemeContext<'_>, site: usize) {
        match ctx.registry.lattice().get(site) {
            Some(SiteState::Occupied(id)) => {
                let (p_right, p_left) = ctx.rates.sweep_probabilities();
                let u = ctx.rng.uniform();
                let direction = if u < p_right {
                    Direction::Right
                } else if u < p_right + p_left {
                    Direction::Left
                } else {
                    return;
                };
                attempt::hop(ctx, id, direction);
            }
            Some(SiteState::Empty) => {
                let line = *ctx.registry.line();
                let entries = ctx.boundary.entry_points(&line, ctx.rates);
                for entry in entries.iter().filter(|e| e.site == site) {
                    if ctx.rng.bernoulli(entry.trial_probability) {
                        attempt::admit(ctx, entry.edge, site);
                        break;
                    }
                }
            }
            Some(SiteState::Reserved(_)) | None => {}
        }
    }
}

impl UpdateRule for SweepRule {
    fn seed(&mut self, _ctx: &mut SchemeContext<'_>) {}

    fn clear(&mut self) {}

    fn advance(&mut self, ctx: &mut SchemeContext<'_>, until: f64) {
        let n = ctx.registry.lattice().len();
        let order: Vec<usize> = (0..n).map(|_| ctx.rng.index(n)).collect();
        for site in order {
            ctx.metrics.events_fired += 1;
            Self::trial(ctx, site);
        }
        ctx.now = until;
    }

    fn on_idle(&mut self, _ctx: &mut SchemeContext<'_>, _id: ParticleId) {}

    fn forget(&mut self, _id: ParticleId) {}

    fn pending(&self) -> usize {
        0
    }
}
