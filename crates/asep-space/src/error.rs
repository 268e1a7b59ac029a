//! Error types for lattice geometry.

use std::fmt;

/// Errors arising from lattice construction or site lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero sites.
    EmptyLattice,
    /// The lattice length exceeds what signed site arithmetic supports.
    LatticeTooLarge {
        /// The requested length.
        value: usize,
        /// The maximum supported length.
        max: usize,
    },
    /// A site index is outside `[0, len)`.
    SiteOutOfBounds {
        /// The offending site.
        site: usize,
        /// Lattice length.
        len: usize,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLattice => write!(f, "lattice must have at least one site"),
            Self::LatticeTooLarge { value, max } => {
                write!(f, "lattice length {value} exceeds maximum {max}")
            }
            Self::SiteOutOfBounds { site, len } => {
                write!(f, "site {site} out of bounds: [0, {len})")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
