//! Core types and traits for the ASEP simulation core.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: particle
//! and tick identifiers, hop directions, the rates configuration, the
//! [`RandomVariateSource`] trait, and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod id;
pub mod rates;
pub mod variate;

pub use direction::{Direction, Edge};
pub use error::{InvariantViolation, MutationError, RateError};
pub use id::{ParticleId, TickId};
pub use rates::RatesConfig;
pub use variate::{RandomVariateSource, SeededSource};
