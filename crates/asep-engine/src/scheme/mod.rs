//! Update schemes: deciding which hop attempts fire, and when.
//!
//! [`UpdateScheme`] is the configuration tag. Each variant builds an
//! [`UpdateRule`], the object the controller drives:
//!
//! - **ContinuousMarkovChain**: two exponential clocks per idle particle,
//!   one per direction, in a virtual-time min-heap.
//! - **ProbabilisticAttempt**: one exponential decision clock per idle
//!   particle; a fired decision picks a direction by rate.
//! - **MonteCarloSweep**: `N` random-site trials per step, no clocks.
//!
//! Boundary entries are clocks of their own under the clock-driven
//! schemes and part of the site trials under the sweep.

mod attempt;
mod continuous;
mod probabilistic;
pub(crate) mod queue;
mod sweep;

use asep_core::{ParticleId, RandomVariateSource, RatesConfig};
use asep_lattice::ParticleRegistry;
use asep_space::BoundaryPolicy;

use crate::metrics::StepMetrics;

pub(crate) use continuous::ContinuousRule;
pub(crate) use probabilistic::ProbabilisticRule;
pub(crate) use sweep::SweepRule;

/// How hop attempts are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpdateScheme {
    /// Continuous-time Markov jump process with per-direction clocks.
    #[default]
    ContinuousMarkovChain,
    /// Per-particle decision clocks with a Bernoulli direction choice.
    ProbabilisticAttempt,
    /// Discrete-time random-sequential sweeps, one per step.
    MonteCarloSweep,
}

impl UpdateScheme {
    /// All three schemes.
    pub const ALL: [UpdateScheme; 3] = [
        UpdateScheme::ContinuousMarkovChain,
        UpdateScheme::ProbabilisticAttempt,
        UpdateScheme::MonteCarloSweep,
    ];

    /// Whether the scheme keeps a queue of pending clocks.
    pub fn is_clock_driven(&self) -> bool {
        !matches!(self, UpdateScheme::MonteCarloSweep)
    }

    pub(crate) fn build(self) -> Box<dyn UpdateRule> {
        match self {
            UpdateScheme::ContinuousMarkovChain => Box::new(ContinuousRule::new()),
            UpdateScheme::ProbabilisticAttempt => Box::new(ProbabilisticRule::new()),
            UpdateScheme::MonteCarloSweep => Box::new(SweepRule),
        }
    }
}

/// Everything a rule may read or mutate while firing events.
///
/// Fields are public to the crate so rules can split-borrow the registry
/// and the variate source.
pub(crate) struct SchemeContext<'a> {
    pub(crate) registry: &'a mut ParticleRegistry,
    pub(crate) boundary: BoundaryPolicy,
    pub(crate) rates: &'a RatesConfig,
    pub(crate) rng: &'a mut dyn RandomVariateSource,
    pub(crate) metrics: &'a mut StepMetrics,
    /// Current virtual time. Rules move it forward as events fire.
    pub(crate) now: f64,
}

/// A running update scheme.
///
/// The controller calls [`seed`](Self::seed) after building or resuming,
/// [`advance`](Self::advance) once per step, and the particle hooks as
/// particles settle or disappear.
pub(crate) trait UpdateRule {
    /// Schedule clocks for every idle particle and entry point at `ctx.now`.
    fn seed(&mut self, ctx: &mut SchemeContext<'_>);

    /// Drop every pending clock.
    fn clear(&mut self);

    /// Fire everything due up to virtual time `until`.
    fn advance(&mut self, ctx: &mut SchemeContext<'_>, until: f64);

    /// `id` became idle (added or arrived) and needs clocks.
    fn on_idle(&mut self, ctx: &mut SchemeContext<'_>, id: ParticleId);

    /// `id` is gone; cancel its clocks.
    fn forget(&mut self, id: ParticleId);

    /// Number of pending clocks.
    fn pending(&self) -> usize;
}
