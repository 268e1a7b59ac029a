//! Error types shared across the ASEP workspace.
//!
//! Organized by who sees them: [`MutationError`] is returned to callers of
//! interactive add/remove, [`RateError`] surfaces from rates validation, and
//! [`InvariantViolation`] indicates an engine bug.

use std::error::Error;
use std::fmt;

use crate::id::ParticleId;

/// Rejected interactive mutation (`add_particle` / `remove_particle`).
///
/// These are ordinary outcomes returned as `Result` values. The engine
/// state is unchanged whenever one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationError {
    /// The site already holds a particle or is reserved by one in transit.
    Occupied {
        /// The requested site.
        site: usize,
    },
    /// The site index is outside `[0, len)`.
    OutOfRange {
        /// The requested site.
        site: usize,
        /// Lattice length.
        len: usize,
    },
    /// The particle is mid-jump and cannot be removed.
    NotIdle {
        /// The particle in question.
        id: ParticleId,
    },
    /// No particle with this id exists.
    NotFound {
        /// The requested particle.
        id: ParticleId,
    },
    /// The simulation has not been initialized.
    NotRunning,
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied { site } => write!(f, "site {site} is occupied"),
            Self::OutOfRange { site, len } => {
                write!(f, "site {site} out of range [0, {len})")
            }
            Self::NotIdle { id } => write!(f, "particle {id} is in transit"),
            Self::NotFound { id } => write!(f, "particle {id} not found"),
            Self::NotRunning => write!(f, "simulation is not initialized"),
        }
    }
}

impl Error for MutationError {}

/// A rate or probability failed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum RateError {
    /// A rate is NaN, infinite, or negative.
    InvalidRate {
        /// Name of the offending field.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// A probability lies outside `[0, 1]` or is NaN.
    InvalidProbability {
        /// Name of the offending field.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { name, value } => {
                write!(f, "{name} must be finite and >= 0, got {value}")
            }
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} must be in [0.0, 1.0], got {value}")
            }
        }
    }
}

impl Error for RateError {}

/// The exclusion or ownership invariant is broken.
///
/// Unreachable in a correct engine. Produced by the registry's invariant
/// checker, which the controller runs after every step in debug builds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two particles claim the same site.
    DoubleOccupancy {
        /// The contested site.
        site: usize,
        /// The particle the site records.
        recorded: Option<ParticleId>,
        /// The particle claiming the site.
        claimant: ParticleId,
    },
    /// A site records a particle that does not claim it.
    StaleSite {
        /// The site.
        site: usize,
        /// The particle recorded on it.
        id: ParticleId,
    },
    /// A particle's transit fields disagree with its state.
    InconsistentTransit {
        /// The particle.
        id: ParticleId,
        /// What disagrees.
        reason: String,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleOccupancy {
                site,
                recorded,
                claimant,
            } => match recorded {
                Some(r) => write!(f, "site {site} records {r} but {claimant} claims it"),
                None => write!(f, "site {site} is empty but {claimant} claims it"),
            },
            Self::StaleSite { site, id } => {
                write!(f, "site {site} records {id}, which does not claim it")
            }
            Self::InconsistentTransit { id, reason } => {
                write!(f, "particle {id} has inconsistent transit state: {reason}")
            }
        }
    }
}

impl Error for InvariantViolation {}
