//! ASEP: an asymmetric simple exclusion process simulation core.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all sub-crates. For most users, adding `asep` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use asep::prelude::*;
//!
//! // A 20-site open lattice fed by a reservoir on the left.
//! let config = SimConfig::new(20, 0)
//!     .with_boundary(BoundaryPolicy::OpenReservoir)
//!     .with_scheme(UpdateScheme::ContinuousMarkovChain)
//!     .with_rates(RatesConfig::totally_asymmetric(1.0).with_reservoir(0.9, 0.9))
//!     .with_statistics(50)
//!     .with_seed(42);
//! let mut sim = SimulationController::with_config(config).unwrap();
//!
//! for _ in 0..600 {
//!     sim.step(1.0 / 60.0);
//! }
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.tick, TickId(600));
//! assert_eq!(snapshot.statistics.unwrap().density.len(), 20);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `asep-core` | IDs, directions, rates, variate sources, errors |
//! | [`space`] | `asep-space` | Lattice geometry and boundary policies |
//! | [`lattice`] | `asep-lattice` | Site states, particles, the particle registry |
//! | [`engine`] | `asep-engine` | Controller, update schemes, statistics, snapshots |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`asep-core`).
///
/// Contains [`types::RatesConfig`], the [`types::RandomVariateSource`]
/// trait and its seeded implementation, and the shared error types.
pub use asep_core as types;

/// Lattice geometry and boundary policies (`asep-space`).
///
/// [`space::BoundaryPolicy`] resolves hops at the lattice ends.
pub use asep_space as space;

/// Occupancy and particle ownership (`asep-lattice`).
///
/// [`lattice::ParticleRegistry`] enforces exclusion and drives the transit
/// state machine.
pub use asep_lattice as lattice;

/// Simulation controller (`asep-engine`).
///
/// [`engine::SimulationController`] owns a simulation and is stepped by an
/// external loop.
pub use asep_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use asep::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use asep_core::{Direction, Edge, ParticleId, RatesConfig, TickId};

    // Errors
    pub use asep_core::{InvariantViolation, MutationError};
    pub use asep_engine::ConfigError;

    // Space and lattice
    pub use asep_lattice::{Location, TransitState};
    pub use asep_space::BoundaryPolicy;

    // Engine
    pub use asep_engine::{
        ControllerState, ParameterUpdate, SimConfig, SimulationController, Snapshot,
        StepMetrics, StepOutcome, UpdateEffect, UpdateScheme,
    };
}
