//! Lattice occupancy and particle ownership for the ASEP simulation core.
//!
//! [`ParticleRegistry`] exclusively owns every [`Particle`] and the
//! [`Lattice`] of site states, and is the only place either is mutated.
//! Everything else refers to particles by [`ParticleId`](asep_core::ParticleId).
//!
//! # Exclusion
//!
//! A site is claimed either by an idle particle standing on it
//! ([`SiteState::Occupied`]) or by an in-transit particle heading to it
//! ([`SiteState::Reserved`]). A jump reserves its target and releases its
//! origin at commit time, so completions can happen in any order without
//! two particles ever claiming the same site.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;
pub mod particle;
pub mod registry;

pub use error::TransitError;
pub use lattice::{Lattice, SiteState};
pub use particle::{Location, Particle, TransitState};
pub use registry::{Arrival, ParticleRegistry};
