//! 1-D line lattice geometry.

use asep_core::Direction;

use crate::error::SpaceError;

/// A one-dimensional lattice of `len` sites indexed `0..len`.
///
/// Provides the two neighbour rules the boundary policies build on:
/// closed arithmetic ([`step_closed`](Line::step_closed)), which runs off
/// the ends, and periodic arithmetic ([`step_wrapped`](Line::step_wrapped)),
/// which wraps around.
///
/// # Examples
///
/// ```
/// use asep_core::Direction;
/// use asep_space::Line;
///
/// let line = Line::new(5).unwrap();
/// assert_eq!(line.step_closed(2, Direction::Right), Some(3));
/// assert_eq!(line.step_closed(4, Direction::Right), None);
/// assert_eq!(line.step_wrapped(4, Direction::Right), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    len: usize,
}

impl Line {
    /// Maximum length (2^24 sites). The lattice keeps one state per site,
    /// so larger values are rejected here rather than failing to allocate.
    pub const MAX_LEN: usize = 1 << 24;

    /// Create a new line with `len` sites.
    ///
    /// Returns `Err(SpaceError::EmptyLattice)` if `len == 0`, or
    /// `Err(SpaceError::LatticeTooLarge)` if `len > MAX_LEN`.
    pub fn new(len: usize) -> Result<Self, SpaceError> {
        if len == 0 {
            return Err(SpaceError::EmptyLattice);
        }
        if len > Self::MAX_LEN {
            return Err(SpaceError::LatticeTooLarge {
                value: len,
                max: Self::MAX_LEN,
            });
        }
        Ok(Self { len })
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always returns `false` — construction rejects `len == 0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `site` is a real site of this lattice.
    pub fn contains(&self, site: usize) -> bool {
        site < self.len
    }

    /// Check that `site` is in bounds.
    pub fn check_site(&self, site: usize) -> Result<usize, SpaceError> {
        if self.contains(site) {
            Ok(site)
        } else {
            Err(SpaceError::SiteOutOfBounds {
                site,
                len: self.len,
            })
        }
    }

    /// Neighbour of `site` in `direction`, or `None` past either end.
    pub fn step_closed(&self, site: usize, direction: Direction) -> Option<usize> {
        let target = site as i64 + direction.delta();
        if target < 0 || target >= self.len as i64 {
            None
        } else {
            Some(target as usize)
        }
    }

    /// Neighbour of `site` in `direction` with periodic wrap-around:
    /// `(site + delta + len) mod len`.
    pub fn step_wrapped(&self, site: usize, direction: Direction) -> usize {
        let n = self.len as i64;
        ((site as i64 + direction.delta() + n) % n) as usize
    }

    /// Whether a hop from `site` in `direction` leaves the lattice.
    pub fn is_exit(&self, site: usize, direction: Direction) -> bool {
        self.step_closed(site, direction).is_none()
    }
}
