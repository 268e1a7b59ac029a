//! Scheduling, stepping and statistics for the ASEP simulation core.
//!
//! [`SimulationController`] owns the lattice and every particle, and is
//! driven by an external loop calling [`step`](SimulationController::step)
//! once per frame. A [`BoundaryPolicy`](asep_space::BoundaryPolicy) and an
//! [`UpdateScheme`] are injected through [`SimConfig`]; any combination of
//! the two works with the same controller.
//!
//! Consumers never see live state: [`snapshot`](SimulationController::snapshot)
//! returns an owned [`Snapshot`].
//!
//! # Example
//!
//! ```
//! use asep_engine::{SimConfig, SimulationController, UpdateScheme};
//! use asep_space::BoundaryPolicy;
//!
//! let config = SimConfig::new(12, 4)
//!     .with_boundary(BoundaryPolicy::Periodic)
//!     .with_scheme(UpdateScheme::ContinuousMarkovChain)
//!     .with_seed(7);
//! let mut sim = SimulationController::with_config(config).unwrap();
//! for _ in 0..60 {
//!     sim.step(1.0 / 60.0);
//! }
//! assert_eq!(sim.snapshot().particles.len(), 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod metrics;
pub(crate) mod ring;
pub mod scheme;
pub mod snapshot;
pub mod stats;

pub use config::{ConfigError, ParameterUpdate, SimConfig, UpdateEffect};
pub use controller::{ControllerState, SimulationController, StepOutcome};
pub use metrics::StepMetrics;
pub use scheme::UpdateScheme;
pub use snapshot::{ParticleView, SiteView, Snapshot, StatisticsView};
pub use stats::{StatisticsAggregator, StatisticsSample, DEFAULT_WINDOW};
