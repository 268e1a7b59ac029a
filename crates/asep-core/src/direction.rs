//! Hop directions and lattice edges.

/// Direction of an attempted hop along the lattice.
///
/// `Right` increases the site index, `Left` decreases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards site `N - 1`.
    Right,
    /// Towards site `0`.
    Left,
}

impl Direction {
    /// Both directions, right first. This is the order clocks are seeded in.
    pub const ALL: [Direction; 2] = [Direction::Right, Direction::Left];

    /// Signed index offset of a hop in this direction.
    pub fn delta(self) -> i64 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    /// The lattice edge a hop in this direction eventually runs into.
    pub fn edge(self) -> Edge {
        match self {
            Direction::Right => Edge::Right,
            Direction::Left => Edge::Left,
        }
    }
}

/// One of the two ends of the lattice.
///
/// Each edge has a virtual location just outside the lattice: `-1` for
/// [`Edge::Left`] and `N` for [`Edge::Right`]. Virtual locations never hold
/// a concrete particle; they only exchange particles with the adjacent
/// real site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    /// The end next to site `0`.
    Left,
    /// The end next to site `N - 1`.
    Right,
}

impl Edge {
    /// Both edges, left first.
    pub const ALL: [Edge; 2] = [Edge::Left, Edge::Right];

    /// The real site adjacent to this edge on a lattice of `len` sites.
    pub fn adjacent_site(self, len: usize) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Right => len.saturating_sub(1),
        }
    }

    /// Signed index of the virtual location (`-1` or `len`).
    pub fn virtual_index(self, len: usize) -> i64 {
        match self {
            Edge::Left => -1,
            Edge::Right => len as i64,
        }
    }

    /// Direction a particle entering through this edge travels.
    pub fn inward(self) -> Direction {
        match self {
            Edge::Left => Direction::Right,
            Edge::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_signs() {
        assert_eq!(Direction::Right.delta(), 1);
        assert_eq!(Direction::Left.delta(), -1);
    }

    #[test]
    fn reverse_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.reverse().reverse(), d);
            assert_ne!(d.reverse(), d);
        }
    }

    #[test]
    fn edge_geometry() {
        assert_eq!(Edge::Left.adjacent_site(10), 0);
        assert_eq!(Edge::Right.adjacent_site(10), 9);
        assert_eq!(Edge::Left.virtual_index(10), -1);
        assert_eq!(Edge::Right.virtual_index(10), 10);
        assert_eq!(Edge::Left.inward(), Direction::Right);
        assert_eq!(Edge::Right.inward(), Direction::Left);
        assert_eq!(Direction::Left.edge(), Edge::Left);
    }
}
