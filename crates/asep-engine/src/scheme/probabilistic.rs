//! Probabilistic attempts: one decision clock per idle particle.
//!
//! The decision clock runs at the combined hop rate. When it fires, a
//! single uniform draw picks right with probability `r / (r + l)`, left
//! with `l / (r + l)`, and nothing with whatever mass remains. A failed
//! attempt consumes the decision; the next one is drawn from the fire time.

use asep_core::{Direction, Edge, ParticleId, RatesConfig};

use super::attempt::{self, HopOutcome};
use super::queue::EventQueue;
use super::{SchemeContext, UpdateRule};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Clock {
    Decision(ParticleId),
    Entry(Edge),
}

#[derive(Debug)]
pub(crate) struct ProbabilisticRule {
    queue: EventQueue<Clock>,
}

/// Map a uniform draw onto a direction.
fn choose_direction(rates: &RatesConfig, u: f64) -> Option<Direction> {
    let total = rates.total_hop_rate();
    if total <= 0.0 {
        return None;
    }
    let p_right = rates.right_rate / total;
    let p_left = rates.left_rate / total;
    if u < p_right {
        Some(Direction::Right)
    } else if u < p_right + p_left {
        Some(Direction::Left)
    } else {
        None
    }
}

impl ProbabilisticRule {
    pub(crate) fn new() -> Self {
        Self {
            queue: EventQueue::new(),
        }
    }

    fn schedule(&mut self, ctx: &mut SchemeContext<'_>, clock: Clock, from: f64) {
        let rate = match clock {
            Clock::Decision(_) => ctx.rates.total_hop_rate(),
            Clock::Entry(edge) => {
                let line = *ctx.registry.line();
                ctx.boundary
                    .entry_point(&line, ctx.rates, edge)
                    .map_or(0.0, |e| e.rate)
            }
        };
        match ctx.rng.exponential(rate) {
            Some(wait) => self.queue.schedule(clock, from + wait),
            None => self.queue.cancel(clock),
        }
    }

    fn fire(&mut self, ctx: &mut SchemeContext<'_>, clock: Clock, time: f64) {
        match clock {
            Clock::Decision(id) => {
                let u = ctx.rng.uniform();
                let committed = match choose_direction(ctx.rates, u) {
                    Some(direction) => {
                        matches!(attempt::hop(ctx, id, direction), HopOutcome::Committed(_))
                    }
                    None => false,
                };
                // A committed particle gets a fresh clock on arrival.
                if !committed && ctx.registry.get(id).is_some_and(|p| p.is_idle()) {
                    self.schedule(ctx, clock, time);
                }
            }
            Clock::Entry(edge) => {
                let line = *ctx.registry.line();
                if let Some(entry) = ctx.boundary.entry_point(&line, ctx.rates, edge) {
                    attempt::entry(ctx, &entry);
                }
                self.schedule(ctx, clock, time);
            }
        }
    }
}

impl UpdateRule for ProbabilisticRule {
    fn seed(&mut self, ctx: &mut SchemeContext<'_>) {
        let now = ctx.now;
        for id in ctx.registry.idle_ids() {
            self.schedule(ctx, Clock::Decision(id), now);
        }
        let line = *ctx.registry.line();
        for entry in ctx.boundary.entry_points(&line, ctx.rates) {
            self.schedule(ctx, Clock::Entry(entry.edge), now);
        }
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn advance(&mut self, ctx: &mut SchemeContext<'_>, until: f64) {
        while let Some((time, clock)) = self.queue.pop_due(until) {
            ctx.now = time;
            ctx.metrics.events_fired += 1;
            self.fire(ctx, clock, time);
        }
        ctx.now = until;
    }

    fn on_idle(&mut self, ctx: &mut SchemeContext<'_>, id: ParticleId) {
        let now = ctx.now;
        self.schedule(ctx, Clock::Decision(id), now);
    }

    fn forget(&mut self, id: ParticleId) {
        self.queue.cancel(Clock::Decision(id));
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asep_core::SeededSource;
    use asep_lattice::ParticleRegistry;
    use asep_space::{BoundaryPolicy, Line};

    use crate::metrics::StepMetrics;

    #[test]
    fn direction_split_by_rate() {
        let rates = RatesConfig {
            right_rate: 3.0,
            left_rate: 1.0,
            ..RatesConfig::default()
        };
        assert_eq!(choose_direction(&rates, 0.0), Some(Direction::Right));
        assert_eq!(choose_direction(&rates, 0.74), Some(Direction::Right));
        assert_eq!(choose_direction(&rates, 0.76), Some(Direction::Left));
        assert_eq!(choose_direction(&rates, 0.999), Some(Direction::Left));
    }

    #[test]
    fn zero_total_rate_chooses_nothing() {
        let rates = RatesConfig {
            right_rate: 0.0,
            left_rate: 0.0,
            ..RatesConfig::default()
        };
        assert_eq!(choose_direction(&rates, 0.1), None);
    }

    #[test]
    fn failed_decision_is_rescheduled() {
        let mut reg = ParticleRegistry::new(Line::new(3).unwrap());
        // Pinned against the right wall.
        reg.insert(2).unwrap();
        let rates = RatesConfig::default();
        let mut rng = SeededSource::new(5);
        let mut metrics = StepMetrics::default();
        let mut rule = ProbabilisticRule::new();
        let mut ctx = SchemeContext {
            registry: &mut reg,
            boundary: BoundaryPolicy::Closed,
            rates: &rates,
            rng: &mut rng,
            metrics: &mut metrics,
            now: 0.0,
        };
        rule.seed(&mut ctx);
        assert_eq!(rule.pending(), 1);
        rule.advance(&mut ctx, 20.0);
        assert_eq!(rule.pending(), 1);
        assert_eq!(ctx.now, 20.0);
        assert!(metrics.boundary_rejections > 0);
        assert_eq!(metrics.events_fired, metrics.boundary_rejections);
    }

    #[test]
    fn committed_decision_leaves_no_clock() {
        let mut reg = ParticleRegistry::new(Line::new(3).unwrap());
        let id = reg.insert(0).unwrap();
        let rates = RatesConfig::default();
        let mut rng = SeededSource::new(5);
        let mut metrics = StepMetrics::default();
        let mut rule = ProbabilisticRule::new();
        let mut ctx = SchemeContext {
            registry: &mut reg,
            boundary: BoundaryPolicy::Closed,
            rates: &rates,
            rng: &mut rng,
            metrics: &mut metrics,
            now: 0.0,
        };
        rule.seed(&mut ctx);
        rule.advance(&mut ctx, 1_000.0);
        assert_eq!(rule.pending(), 0);
        assert_eq!(metrics.jumps_committed, 1);
        assert!(!reg.get(id).unwrap().is_idle());
    }
}
