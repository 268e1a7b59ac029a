//! The simulation controller: lifecycle, stepping and interactive mutation.
//!
//! [`SimulationController`] is the single owner of the lattice, the particle
//! registry and the pending-event queue. An external loop calls
//! [`step`](SimulationController::step) once per frame with the elapsed
//! wall time; everything else reads [`snapshot`](SimulationController::snapshot).
//!
//! ```text
//!                  initialize / reset
//!  Uninitialized ─────────────────────▶ Running ◀──── resume ────┐
//!        ▲                                 │                    │
//!        └──────── reset (any state) ──────┴──── pause ──▶ Paused
//! ```

use std::fmt;
use std::time::Instant;

use asep_core::{
    InvariantViolation, MutationError, ParticleId, RandomVariateSource, RatesConfig, SeededSource,
    TickId,
};
use asep_lattice::{Arrival, ParticleRegistry};
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, ParameterUpdate, SimConfig, UpdateEffect};
use crate::metrics::StepMetrics;
use crate::scheme::{SchemeContext, UpdateRule};
use crate::snapshot::{ParticleView, SiteView, Snapshot};
use crate::stats::StatisticsAggregator;

/// Lifecycle state of a [`SimulationController`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// No configuration applied yet.
    #[default]
    Uninitialized,
    /// Stepping advances time and fires events.
    Running,
    /// Time is frozen; pending events are discarded, transits are kept.
    Paused,
}

/// What a [`step`](SimulationController::step) call reports to its driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Something moved, is moving, or is scheduled to move.
    pub needs_redraw: bool,
}

/// Live simulation state that only exists once initialized.
struct World {
    registry: ParticleRegistry,
    rng: SeededSource,
    rule: Box<dyn UpdateRule>,
}

/// Split a world into its update rule and the context the rule runs in.
fn split<'a>(
    world: &'a mut World,
    config: &'a SimConfig,
    metrics: &'a mut StepMetrics,
    now: f64,
) -> (&'a mut Box<dyn UpdateRule>, SchemeContext<'a>) {
    let World {
        registry,
        rng,
        rule,
    } = world;
    let ctx = SchemeContext {
        registry,
        boundary: config.boundary,
        rates: &config.rates,
        rng,
        metrics,
        now,
    };
    (rule, ctx)
}

/// Orchestrates an ASEP simulation.
///
/// # Examples
///
/// ```
/// use asep_engine::{ControllerState, SimConfig, SimulationController};
///
/// let mut sim = SimulationController::new();
/// assert_eq!(sim.state(), ControllerState::Uninitialized);
///
/// sim.initialize(SimConfig::new(10, 3)).unwrap();
/// let free = sim.snapshot().sites.iter().position(|s| !s.is_claimed()).unwrap();
/// let id = sim.add_particle(free).unwrap();
/// assert_eq!(sim.particle_count(), 4);
/// sim.step(0.1);
/// sim.pause();
/// assert!(sim.is_paused());
/// assert!(sim.snapshot().particle(id).is_some());
/// ```
pub struct SimulationController {
    state: ControllerState,
    config: SimConfig,
    world: Option<World>,
    stats: Option<StatisticsAggregator>,
    tick: TickId,
    virtual_time: f64,
    last_metrics: StepMetrics,
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationController {
    /// An uninitialized controller.
    pub fn new() -> Self {
        Self {
            state: ControllerState::Uninitialized,
            config: SimConfig::default(),
            world: None,
            stats: None,
            tick: TickId::default(),
            virtual_time: 0.0,
            last_metrics: StepMetrics::default(),
        }
    }

    /// A controller initialized with `config`.
    pub fn with_config(config: SimConfig) -> Result<Self, ConfigError> {
        let mut controller = Self::new();
        controller.initialize(config)?;
        Ok(controller)
    }

    /// Validate `config`, build the lattice, place particles at unique
    /// random sites and seed the scheduler. On error the controller keeps
    /// its previous state.
    pub fn initialize(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        self.rebuild(config)?;
        info!(
            sites = self.config.site_count,
            particles = self.config.particle_count,
            boundary = ?self.config.boundary,
            scheme = ?self.config.scheme,
            seed = self.config.seed,
            "simulation initialized"
        );
        Ok(())
    }

    /// Rebuild from `config` in any state. Tick and virtual time return to 0.
    ///
    /// Statistics attached with [`attach_statistics`](Self::attach_statistics)
    /// stay attached, with an empty history.
    pub fn reset(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        self.rebuild(config)?;
        info!(
            sites = self.config.site_count,
            particles = self.config.particle_count,
            seed = self.config.seed,
            "simulation reset"
        );
        Ok(())
    }

    fn rebuild(&mut self, mut config: SimConfig) -> Result<(), ConfigError> {
        // An attached aggregator stays attached unless the new config
        // names its own window.
        if config.statistics_window.is_none() {
            config.statistics_window = self.config.statistics_window;
        }
        let line = config.line()?;
        let stats = config
            .statistics_window
            .map(StatisticsAggregator::new)
            .transpose()?;

        let mut rng = SeededSource::new(config.seed);
        let mut registry = ParticleRegistry::new(line);
        let sites = rng.sample_distinct(config.site_count, config.particle_count);
        let placed = sites
            .into_iter()
            .filter(|&site| registry.insert(site).is_ok())
            .count();
        debug_assert_eq!(placed, config.particle_count);

        let mut world = World {
            registry,
            rng,
            rule: config.scheme.build(),
        };
        let mut metrics = StepMetrics::default();
        {
            let (rule, mut ctx) = split(&mut world, &config, &mut metrics, 0.0);
            rule.seed(&mut ctx);
        }

        self.state = ControllerState::Running;
        self.config = config;
        self.world = Some(world);
        self.stats = stats;
        self.tick = TickId::default();
        self.virtual_time = 0.0;
        self.last_metrics = StepMetrics::default();
        Ok(())
    }

    /// Advance the simulation by `elapsed` wall seconds.
    ///
    /// Virtual time moves by `elapsed * time_scale` and due events fire in
    /// time order; transit progress moves by `elapsed * transit_speed` and
    /// completed jumps settle. A no-op unless running. Negative or
    /// non-finite `elapsed` counts as 0.
    pub fn step(&mut self, elapsed: f64) -> StepOutcome {
        if self.state != ControllerState::Running {
            return StepOutcome::default();
        }
        let Some(world) = self.world.as_mut() else {
            return StepOutcome::default();
        };
        let elapsed = if elapsed.is_finite() && elapsed >= 0.0 {
            elapsed
        } else {
            warn!(elapsed, "invalid elapsed time, treating as 0");
            0.0
        };

        let start = Instant::now();
        let mut metrics = StepMetrics::default();
        self.tick = self.tick.next();
        let until = self.virtual_time + elapsed * self.config.time_scale;
        {
            let (rule, mut ctx) = split(world, &self.config, &mut metrics, self.virtual_time);
            rule.advance(&mut ctx, until);
            ctx.now = until;

            for arrival in ctx.registry.advance(elapsed * self.config.transit_speed) {
                ctx.metrics.arrivals += 1;
                match arrival {
                    Arrival::Settled { id, site } => {
                        trace!(%id, site, "jump completed");
                        rule.on_idle(&mut ctx, id);
                    }
                    Arrival::Departed { id, edge } => {
                        trace!(%id, ?edge, "particle left the lattice");
                        rule.forget(id);
                    }
                }
            }
        }
        self.virtual_time = until;

        metrics.pending_events = world.rule.pending();
        metrics.in_transit = world.registry.in_transit_count();
        if let Some(stats) = self.stats.as_mut() {
            stats.record(
                self.tick,
                world.registry.lattice().occupancy(),
                &self.config.rates,
                self.config.boundary.wraps(),
            );
        }

        if cfg!(debug_assertions) {
            if let Err(violation) = world.registry.check_invariants() {
                panic!("invariant broken at tick {}: {violation}", self.tick.0);
            }
        }

        metrics.total_us = start.elapsed().as_micros() as u64;
        let needs_redraw =
            metrics.in_transit > 0 || metrics.pending_events > 0 || metrics.occupancy_changed();
        self.last_metrics = metrics;
        StepOutcome { needs_redraw }
    }

    /// Stop the clock. Pending events are dropped; in-flight transits keep
    /// their progress and resume moving after [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if self.state != ControllerState::Running {
            return;
        }
        if let Some(world) = self.world.as_mut() {
            world.rule.clear();
        }
        self.state = ControllerState::Paused;
        debug!(tick = self.tick.0, "simulation paused");
    }

    /// Restart the clock, drawing fresh events from the paused virtual time.
    pub fn resume(&mut self) {
        if self.state != ControllerState::Paused {
            return;
        }
        if let Some(world) = self.world.as_mut() {
            let mut scratch = StepMetrics::default();
            let (rule, mut ctx) = split(world, &self.config, &mut scratch, self.virtual_time);
            rule.seed(&mut ctx);
        }
        self.state = ControllerState::Running;
        debug!(tick = self.tick.0, "simulation resumed");
    }

    /// Whether the controller is paused.
    pub fn is_paused(&self) -> bool {
        self.state == ControllerState::Paused
    }

    /// Place a new idle particle on `site`.
    ///
    /// Fails with `Occupied` when the site is occupied or reserved by an
    /// incoming jump, `OutOfRange` past the lattice end, and `NotRunning`
    /// before initialization. While running, the particle is scheduled
    /// immediately.
    pub fn add_particle(&mut self, site: usize) -> Result<ParticleId, MutationError> {
        let world = self.world.as_mut().ok_or(MutationError::NotRunning)?;
        let id = world.registry.insert(site)?;
        if self.state == ControllerState::Running {
            let mut scratch = StepMetrics::default();
            let (rule, mut ctx) = split(world, &self.config, &mut scratch, self.virtual_time);
            rule.on_idle(&mut ctx, id);
        }
        debug!(%id, site, "particle added");
        Ok(id)
    }

    /// Remove an idle particle and cancel its pending events.
    ///
    /// Fails with `NotIdle` while the particle is in transit.
    pub fn remove_particle(&mut self, id: ParticleId) -> Result<(), MutationError> {
        let world = self.world.as_mut().ok_or(MutationError::NotRunning)?;
        let particle = world.registry.remove(id)?;
        world.rule.forget(id);
        debug!(%id, site = ?particle.current_site(), "particle removed");
        Ok(())
    }

    /// Apply a partial configuration change.
    ///
    /// Rates, time scale and transit speed are swapped in place and every
    /// pending clock is redrawn from the current virtual time. A change to
    /// any other field rebuilds the simulation from the merged config.
    /// Before initialization the merged config is only stored. A failed
    /// validation leaves everything untouched.
    pub fn update_parameters(
        &mut self,
        update: ParameterUpdate,
    ) -> Result<UpdateEffect, ConfigError> {
        let merged = update.merge(&self.config);
        merged.validate()?;

        if self.world.is_some() && update.is_structural(&self.config) {
            self.reset(merged)?;
            return Ok(UpdateEffect::Reset);
        }

        self.config = merged;
        if self.state == ControllerState::Running {
            if let Some(world) = self.world.as_mut() {
                let mut scratch = StepMetrics::default();
                let (rule, mut ctx) =
                    split(world, &self.config, &mut scratch, self.virtual_time);
                rule.clear();
                rule.seed(&mut ctx);
            }
        }
        debug!(rates = ?self.config.rates, time_scale = self.config.time_scale,
            transit_speed = self.config.transit_speed, "parameters updated");
        Ok(UpdateEffect::HotSwapped)
    }

    /// Start collecting statistics over a window of `window` steps.
    ///
    /// Replaces any attached aggregator; the setting survives resets.
    pub fn attach_statistics(&mut self, window: usize) -> Result<(), ConfigError> {
        self.stats = Some(StatisticsAggregator::new(window)?);
        self.config.statistics_window = Some(window);
        debug!(window, "statistics attached");
        Ok(())
    }

    /// Stop collecting statistics and drop the history.
    pub fn detach_statistics(&mut self) {
        self.stats = None;
        self.config.statistics_window = None;
        debug!("statistics detached");
    }

    /// An owned copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let (sites, particles) = match &self.world {
            Some(world) => (
                world
                    .registry
                    .lattice()
                    .sites()
                    .iter()
                    .map(|&s| SiteView::from(s))
                    .collect(),
                world.registry.iter().map(ParticleView::from).collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        Snapshot {
            tick: self.tick,
            virtual_time: self.virtual_time,
            state: self.state,
            sites,
            particles,
            statistics: self.stats.as_ref().map(StatisticsAggregator::view),
        }
    }

    /// Lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The active rates.
    pub fn rates(&self) -> &RatesConfig {
        &self.config.rates
    }

    /// Steps taken since the last reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Virtual time since the last reset.
    pub fn virtual_time(&self) -> f64 {
        self.virtual_time
    }

    /// Number of particles, in transit included.
    pub fn particle_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.registry.len())
    }

    /// Number of pending scheduled events.
    pub fn pending_events(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.rule.pending())
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The attached statistics aggregator.
    pub fn statistics(&self) -> Option<&StatisticsAggregator> {
        self.stats.as_ref()
    }

    /// Verify exclusion and particle ownership.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        match &self.world {
            Some(world) => world.registry.check_invariants(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for SimulationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationController")
            .field("state", &self.state)
            .field("current_tick", &self.tick)
            .field("virtual_time", &self.virtual_time)
            .field("particles", &self.particle_count())
            .field("seed", &self.config.seed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asep_lattice::TransitState;
    use asep_space::BoundaryPolicy;

    use crate::scheme::UpdateScheme;

    fn closed(sites: usize, particles: usize) -> SimConfig {
        SimConfig::new(sites, particles).with_seed(42)
    }

    /// Step until some particle is in transit, with transit slow enough
    /// that it stays there.
    fn step_until_in_transit(sim: &mut SimulationController) -> ParticleView {
        for _ in 0..10_000 {
            sim.step(0.1);
            let snap = sim.snapshot();
            if let Some(p) = snap
                .particles
                .iter()
                .find(|p| p.transit_state == TransitState::InTransit)
            {
                return *p;
            }
        }
        panic!("no particle ever entered transit");
    }

    // ── Lifecycle ────────────────────────────────────────────

    #[test]
    fn new_controller_is_uninitialized() {
        let mut sim = SimulationController::new();
        assert_eq!(sim.state(), ControllerState::Uninitialized);
        assert_eq!(sim.step(1.0), StepOutcome { needs_redraw: false });
        assert_eq!(sim.current_tick(), TickId(0));
        let snap = sim.snapshot();
        assert!(snap.sites.is_empty());
        assert!(snap.particles.is_empty());
    }

    #[test]
    fn initialize_places_distinct_particles() {
        let sim = SimulationController::with_config(closed(10, 6)).unwrap();
        assert_eq!(sim.state(), ControllerState::Running);
        assert_eq!(sim.particle_count(), 6);
        let snap = sim.snapshot();
        assert_eq!(snap.sites.len(), 10);
        assert_eq!(snap.idle_sites().len(), 6);
        assert!(sim.check_invariants().is_ok());
    }

    #[test]
    fn initialize_full_lattice() {
        let sim = SimulationController::with_config(closed(4, 4)).unwrap();
        assert_eq!(sim.snapshot().idle_sites(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn invalid_config_keeps_previous_state() {
        let mut sim = SimulationController::with_config(closed(8, 3)).unwrap();
        sim.step(0.5);
        let before = sim.snapshot();
        let err = sim.reset(SimConfig::new(2, 3)).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyParticles { .. }));
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.config().site_count, 8);
    }

    #[test]
    fn reset_returns_to_tick_zero() {
        let mut sim = SimulationController::with_config(closed(8, 3)).unwrap();
        for _ in 0..5 {
            sim.step(0.2);
        }
        assert_eq!(sim.current_tick(), TickId(5));
        sim.reset(closed(12, 2)).unwrap();
        assert_eq!(sim.current_tick(), TickId(0));
        assert_eq!(sim.virtual_time(), 0.0);
        assert_eq!(sim.snapshot().sites.len(), 12);
        assert_eq!(sim.particle_count(), 2);
    }

    // ── Stepping ─────────────────────────────────────────────

    #[test]
    fn step_scales_virtual_time() {
        let mut sim =
            SimulationController::with_config(closed(8, 2).with_time_scale(2.0)).unwrap();
        sim.step(0.5);
        assert_eq!(sim.current_tick(), TickId(1));
        assert!((sim.virtual_time() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_elapsed_counts_as_zero() {
        let mut sim = SimulationController::with_config(closed(8, 2)).unwrap();
        for bad in [f64::NAN, -1.0, f64::INFINITY] {
            sim.step(bad);
        }
        assert_eq!(sim.current_tick(), TickId(3));
        assert_eq!(sim.virtual_time(), 0.0);
    }

    #[test]
    fn step_with_scheduled_clocks_needs_redraw() {
        let mut sim = SimulationController::with_config(closed(8, 2)).unwrap();
        assert!(sim.pending_events() > 0);
        assert!(sim.step(0.0).needs_redraw);
    }

    #[test]
    fn parked_lattice_does_not_need_redraw() {
        let config = closed(5, 2).with_rates(RatesConfig {
            right_rate: 0.0,
            left_rate: 0.0,
            ..RatesConfig::default()
        });
        let mut sim = SimulationController::with_config(config).unwrap();
        assert_eq!(sim.pending_events(), 0);
        assert!(!sim.step(1.0).needs_redraw);
    }

    #[test]
    fn metrics_count_events() {
        let mut sim = SimulationController::with_config(closed(20, 5)).unwrap();
        sim.step(5.0);
        let m = sim.last_metrics();
        assert!(m.events_fired > 0);
        assert_eq!(m.in_transit, sim.snapshot().in_transit());
        assert_eq!(m.pending_events, sim.pending_events());
    }

    // ── Mutation ─────────────────────────────────────────────

    #[test]
    fn add_particle_before_initialize_fails() {
        let mut sim = SimulationController::new();
        assert_eq!(sim.add_particle(0), Err(MutationError::NotRunning));
        assert_eq!(
            sim.remove_particle(ParticleId(0)),
            Err(MutationError::NotRunning)
        );
    }

    #[test]
    fn add_particle_errors() {
        let mut sim = SimulationController::with_config(closed(5, 0)).unwrap();
        let id = sim.add_particle(2).unwrap();
        assert_eq!(sim.add_particle(2), Err(MutationError::Occupied { site: 2 }));
        assert_eq!(
            sim.add_particle(5),
            Err(MutationError::OutOfRange { site: 5, len: 5 })
        );
        assert_eq!(sim.particle_count(), 1);
        // Scheduled right away: the right clock is pending.
        assert_eq!(sim.pending_events(), 1);
        sim.remove_particle(id).unwrap();
        assert_eq!(sim.pending_events(), 0);
        assert_eq!(
            sim.remove_particle(id),
            Err(MutationError::NotFound { id })
        );
    }

    #[test]
    fn reserved_site_rejects_add_and_in_transit_rejects_remove() {
        let config = closed(5, 0).with_transit_speed(1e-9);
        let mut sim = SimulationController::with_config(config).unwrap();
        let id = sim.add_particle(0).unwrap();
        let moving = step_until_in_transit(&mut sim);
        assert_eq!(moving.id, id);
        assert_eq!(moving.target, Some(asep_lattice::Location::Site(1)));
        assert_eq!(sim.add_particle(1), Err(MutationError::Occupied { site: 1 }));
        assert_eq!(sim.remove_particle(id), Err(MutationError::NotIdle { id }));
        // The origin was released at commit time.
        assert!(sim.add_particle(0).is_ok());
    }

    // ── Pause / resume ───────────────────────────────────────

    #[test]
    fn pause_freezes_time_and_clears_events() {
        let mut sim = SimulationController::with_config(closed(10, 4)).unwrap();
        sim.step(0.3);
        sim.pause();
        assert!(sim.is_paused());
        assert_eq!(sim.pending_events(), 0);
        let frozen = sim.snapshot();
        assert!(!sim.step(1.0).needs_redraw);
        assert_eq!(sim.snapshot(), frozen);
        sim.resume();
        assert!(!sim.is_paused());
        assert!(sim.pending_events() > 0);
    }

    #[test]
    fn pause_preserves_transit_progress() {
        let config = closed(6, 0).with_transit_speed(0.01);
        let mut sim = SimulationController::with_config(config).unwrap();
        sim.add_particle(0).unwrap();
        let moving = step_until_in_transit(&mut sim);
        sim.pause();
        sim.step(10.0);
        sim.resume();
        let after = *sim.snapshot().particle(moving.id).unwrap();
        assert_eq!(after.transit_state, TransitState::InTransit);
        assert_eq!(after.progress, moving.progress);
        assert_eq!(after.target, moving.target);
    }

    #[test]
    fn pause_and_resume_outside_their_states_are_noops() {
        let mut sim = SimulationController::new();
        sim.pause();
        assert_eq!(sim.state(), ControllerState::Uninitialized);
        sim.initialize(closed(5, 1)).unwrap();
        sim.resume();
        assert_eq!(sim.state(), ControllerState::Running);
    }

    // ── Parameter updates ────────────────────────────────────

    #[test]
    fn hot_update_keeps_particles() {
        let mut sim = SimulationController::with_config(closed(10, 4)).unwrap();
        sim.step(0.5);
        let before = sim.snapshot();
        let effect = sim
            .update_parameters(ParameterUpdate::rates(RatesConfig::totally_asymmetric(4.0)))
            .unwrap();
        assert_eq!(effect, UpdateEffect::HotSwapped);
        assert_eq!(sim.rates().right_rate, 4.0);
        assert_eq!(sim.snapshot().particles, before.particles);
        assert_eq!(sim.current_tick(), before.tick);
    }

    #[test]
    fn structural_update_resets() {
        let mut sim = SimulationController::with_config(closed(10, 4)).unwrap();
        sim.step(0.5);
        let effect = sim
            .update_parameters(ParameterUpdate {
                site_count: Some(16),
                boundary: Some(BoundaryPolicy::Periodic),
                ..ParameterUpdate::default()
            })
            .unwrap();
        assert_eq!(effect, UpdateEffect::Reset);
        assert_eq!(sim.current_tick(), TickId(0));
        assert_eq!(sim.snapshot().sites.len(), 16);
        assert_eq!(sim.config().boundary, BoundaryPolicy::Periodic);
        assert_eq!(sim.particle_count(), 4);
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let mut sim = SimulationController::with_config(closed(10, 4)).unwrap();
        let before = sim.snapshot();
        let result = sim.update_parameters(ParameterUpdate {
            time_scale: Some(-1.0),
            ..ParameterUpdate::default()
        });
        assert!(matches!(result, Err(ConfigError::InvalidTimeScale { .. })));
        let result = sim.update_parameters(ParameterUpdate {
            particle_count: Some(11),
            ..ParameterUpdate::default()
        });
        assert!(matches!(result, Err(ConfigError::TooManyParticles { .. })));
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.config().time_scale, 1.0);
    }

    #[test]
    fn paused_hot_update_stays_paused() {
        let mut sim = SimulationController::with_config(closed(10, 4)).unwrap();
        sim.pause();
        sim.update_parameters(ParameterUpdate {
            transit_speed: Some(2.0),
            ..ParameterUpdate::default()
        })
        .unwrap();
        assert!(sim.is_paused());
        assert_eq!(sim.pending_events(), 0);
        assert_eq!(sim.config().transit_speed, 2.0);
    }

    // ── Statistics ───────────────────────────────────────────

    #[test]
    fn statistics_sample_once_per_step() {
        let config = closed(10, 4)
            .with_boundary(BoundaryPolicy::Periodic)
            .with_statistics(3);
        let mut sim = SimulationController::with_config(config).unwrap();
        for _ in 0..5 {
            sim.step(0.1);
        }
        let stats = sim.snapshot().statistics.unwrap();
        assert_eq!(stats.history.len(), 3);
        assert_eq!(stats.density.len(), 10);
        assert_eq!(stats.current.len(), 10);
        let total: f64 = stats.history[2].density.iter().sum();
        assert_eq!(total, 4.0);
    }

    #[test]
    fn attached_statistics_survive_reset() {
        let mut sim = SimulationController::with_config(closed(6, 2)).unwrap();
        assert!(sim.snapshot().statistics.is_none());
        assert!(matches!(
            sim.attach_statistics(1),
            Err(ConfigError::StatisticsWindowTooSmall { configured: 1 })
        ));
        sim.attach_statistics(4).unwrap();
        sim.step(0.1);
        assert_eq!(sim.statistics().unwrap().len(), 1);
        sim.reset(closed(6, 2)).unwrap();
        let stats = sim.statistics().unwrap();
        assert!(stats.is_empty());
        assert_eq!(stats.window(), 4);
        sim.detach_statistics();
        assert!(sim.snapshot().statistics.is_none());
    }

    // ── Schemes ──────────────────────────────────────────────

    #[test]
    fn every_scheme_steps_cleanly() {
        for scheme in UpdateScheme::ALL {
            for boundary in BoundaryPolicy::ALL {
                let config = closed(12, 5).with_scheme(scheme).with_boundary(boundary);
                let mut sim = SimulationController::with_config(config).unwrap();
                for _ in 0..50 {
                    sim.step(0.05);
                }
                assert!(sim.check_invariants().is_ok(), "{scheme:?} / {boundary:?}");
            }
        }
    }

    #[test]
    fn sweep_has_no_pending_events() {
        let config = closed(10, 3).with_scheme(UpdateScheme::MonteCarloSweep);
        let mut sim = SimulationController::with_config(config).unwrap();
        sim.step(0.1);
        assert_eq!(sim.pending_events(), 0);
        assert_eq!(sim.last_metrics().events_fired, 10);
    }

    // ── Debug impl ───────────────────────────────────────────

    #[test]
    fn debug_impl_doesnt_panic() {
        let sim = SimulationController::with_config(closed(5, 1)).unwrap();
        let debug = format!("{sim:?}");
        assert!(debug.contains("SimulationController"));
        assert!(debug.contains("current_tick"));
    }
}
