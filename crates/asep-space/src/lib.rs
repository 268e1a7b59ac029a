//! Lattice geometry and boundary policies for the ASEP simulation core.
//!
//! This crate answers one question: where does a hop go? [`Line`] holds the
//! 1-D geometry (closed and wrap-around neighbour arithmetic) and
//! [`BoundaryPolicy`] resolves a hop request or a boundary entry against it.
//!
//! # Policies
//!
//! - [`BoundaryPolicy::Closed`]: hops off either end are rejected
//! - [`BoundaryPolicy::Periodic`]: hops wrap around (ring)
//! - [`BoundaryPolicy::OpenReservoir`]: insertion at site 0 (alpha), removal at `N - 1` (beta)
//! - [`BoundaryPolicy::PortalExchange`]: hops off either end destroy the particle;
//!   portals create particles at both ends
//!
//! Policies are pure: they never touch lattice state. The engine checks
//! exclusion before committing whatever the policy accepts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod line;

pub use boundary::{
    BoundaryPolicy, EntryPoint, EntryResolution, HopRequest, Resolution, Target,
};
pub use error::SpaceError;
pub use line::Line;
