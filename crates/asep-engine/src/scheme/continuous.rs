//! Continuous-time Markov chain: one exponential clock per direction.
//!
//! An idle particle carries a right clock and a left clock. When a clock
//! fires and the hop commits, the other clock is dropped; both are
//! redrawn when the particle arrives. A blocked or rejected hop redraws
//! only the clock that fired, starting from its own fire time.

use asep_core::{Direction, Edge, ParticleId};

use super::attempt::{self, HopOutcome};
use super::queue::EventQueue;
use super::{SchemeContext, UpdateRule};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Clock {
    Hop(ParticleId, Direction),
    Entry(Edge),
}

#[derive(Debug)]
pub(crate) struct ContinuousRule {
    queue: EventQueue<Clock>,
}

impl ContinuousRule {
    pub(crate) fn new() -> Self {
        Self {
            queue: EventQueue::new(),
        }
    }

    fn schedule(&mut self, ctx: &mut SchemeContext<'_>, clock: Clock, from: f64) {
        let rate = match clock {
            Clock::Hop(_, direction) => ctx.rates.hop_rate(direction),
            Clock::Entry(edge) => {
                let line = *ctx.registry.line();
                match ctx.boundary.entry_point(&line, ctx.rates, edge) {
                    Some(entry) => entry.rate,
                    None => 0.0,
                }
            }
        };
        // A zero rate parks the clock.
        match ctx.rng.exponential(rate) {
            Some(wait) => self.queue.schedule(clock, from + wait),
            None => self.queue.cancel(clock),
        }
    }

    fn fire(&mut self, ctx: &mut SchemeContext<'_>, clock: Clock, time: f64) {
        match clock {
            Clock::Hop(id, direction) => match attempt::hop(ctx, id, direction) {
                HopOutcome::Committed(_) => {
                    self.queue.cancel(Clock::Hop(id, direction.reverse()));
                }
                HopOutcome::Blocked | HopOutcome::Rejected => {
                    if ctx.registry.get(id).is_some_and(|p| p.is_idle()) {
                        self.schedule(ctx, clock, time);
                    }
                }
            },
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

impl UpdateRule for ContinuousRule {
    fn seed(&mut self, ctx: &mut SchemeContext<'_>) {
        let now = ctx.now;
        for id in ctx.registry.idle_ids() {
            for direction in Direction::ALL {
                self.schedule(ctx, Clock::Hop(id, direction), now);
            }
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
        for direction in Direction::ALL {
            self.schedule(ctx, Clock::Hop(id, direction), now);
        }
    }

    fn forget(&mut self, id: ParticleId) {
        for direction in Direction::ALL {
            self.queue.cancel(Clock::Hop(id, direction));
        }
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
