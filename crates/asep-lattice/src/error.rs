//! Errors from the transit state machine.

use asep_core::{MutationError, ParticleId};
use std::fmt;

/// A jump or entry could not be committed.
///
/// `Occupied` is the normal outcome of a blocked attempt: the schedulers
/// handle it by redrawing or rescheduling and never surface it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitError {
    /// The target site is occupied or reserved.
    Occupied {
        /// The contested site.
        site: usize,
    },
    /// The particle is already in transit.
    NotIdle {
        /// The particle.
        id: ParticleId,
    },
    /// No such particle.
    NotFound {
        /// The particle.
        id: ParticleId,
    },
    /// The target site is outside the lattice.
    OutOfRange {
        /// The requested site.
        site: usize,
        /// Lattice length.
        len: usize,
    },
}

impl fmt::Display for TransitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied { site } => write!(f, "target site {site} is occupied"),
            Self::NotIdle { id } => write!(f, "particle {id} is already in transit"),
            Self::NotFound { id } => write!(f, "particle {id} not found"),
            Self::OutOfRange { site, len } => {
                write!(f, "target site {site} out of range [0, {len})")
            }
        }
    }
}

impl std::error::Error for TransitError {}

impl From<TransitError> for MutationError {
    fn from(e: TransitError) -> Self {
        match e {
            TransitError::Occupied { site } => MutationError::Occupied { site },
            TransitError::NotIdle { id } => MutationError::NotIdle { id },
            TransitError::NotFound { id } => MutationError::NotFound { id },
            TransitError::OutOfRange { site, len } => MutationError::OutOfRange { site, len },
        }
    }
}
