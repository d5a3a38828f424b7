//! Undirected edges with an order-independent key.

use std::cmp::Ordering;

use globe_geo::Coord3D;

/// An undirected edge stored in canonical form: the endpoint that sorts first
/// under [`Coord3D::canonical_cmp`] is always `start`.
///
/// `Segment::new(a, b) == Segment::new(b, a)`, so the same edge seen from either
/// adjacent triangle hashes to one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    start: Coord3D,
    end: Coord3D,
}

impl Segment {
    #[must_use]
    pub fn new(a: Coord3D, b: Coord3D) -> Self {
        if a.canonical_cmp(&b) == Ordering::Greater {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    #[must_use]
    pub fn start(&self) -> Coord3D {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Coord3D {
        self.end
    }

    #[must_use]
    pub fn contains(&self, v: Coord3D) -> bool {
        self.start == v || self.end == v
    }

    /// The endpoint that is not `v`, if `v` is an endpoint.
    #[must_use]
    pub fn other(&self, v: Coord3D) -> Option<Coord3D> {
        if self.start == v {
            Some(self.end)
        } else if self.end == v {
            Some(self.start)
        } else {
            None
        }
    }

    /// The endpoint shared with `other`, if the two segments meet.
    #[must_use]
    pub fn shared(&self, other: &Segment) -> Option<Coord3D> {
        if other.contains(self.start) {
            Some(self.start)
        } else if other.contains(self.end) {
            Some(self.end)
        } else {
            None
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.dist(self.end)
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .canonical_cmp(&other.start)
            .then_with(|| self.end.canonical_cmp(&other.end))
    }
}
