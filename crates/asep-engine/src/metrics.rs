//! Per-step counters for the simulation engine.
//!
//! [`StepMetrics`] captures timing and event counts for a single
//! [`step`](crate::SimulationController::step) call.

/// Timing and event counts collected during a single step.
///
/// The controller replaces these after each `step()` call; read them via
/// [`last_metrics`](crate::SimulationController::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Scheduled events popped from the queue, or sweep trials performed.
    pub events_fired: u64,
    /// Hops committed to transit, exits included.
    pub jumps_committed: u64,
    /// Hops and entries blocked by an occupied or reserved target.
    pub jumps_blocked: u64,
    /// Hops the boundary policy rejected.
    pub boundary_rejections: u64,
    /// Transits that completed this step.
    pub arrivals: u64,
    /// Particles created at a boundary.
    pub insertions: u64,
    /// Particles committed to leave the lattice.
    pub exits: u64,
    /// Events still queued after the step.
    pub pending_events: usize,
    /// Particles in transit after the step.
    pub in_transit: usize,
}

impl StepMetrics {
    /// Whether occupancy changed during the step.
    pub fn occupancy_changed(&self) -> bool {
        self.jumps_committed > 0 || self.arrivals > 0 || self.insertions > 0
    }
}
