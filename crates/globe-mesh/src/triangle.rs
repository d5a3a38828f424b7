//! Oriented triangles and their normals.

use std::ops::Index;

use glam::DVec3;
use globe_geo::Coord3D;

use crate::error::{MeshError, MeshResult};

/// Relative threshold on `|e1 × e2| / (|e1| |e2|)` (the sine of the corner angle at
/// `v0`) below which a triangle counts as degenerate.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Three vertices in order. The order encodes the facing direction through the
/// right-hand rule.
///
/// Equality compares vertex values. Mesh membership never uses it: the mesh
/// tracks triangles by [`TriangleId`](crate::TriangleId).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle(pub [Coord3D; 3]);

impl Triangle {
    #[must_use]
    pub fn new(a: Coord3D, b: Coord3D, c: Coord3D) -> Self {
        Self([a, b, c])
    }

    /// The vertices in winding order.
    #[must_use]
    pub fn vertices(&self) -> &[Coord3D; 3] {
        &self.0
    }

    /// Unit normal via the right-hand rule, `normalize((v1 - v0) × (v2 - v0))`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateTriangle`] when the vertices are collinear or
    /// coincident instead of producing a NaN vector.
    pub fn compute_normal(&self) -> MeshResult<Coord3D> {
        let [v0, v1, v2] = self.0.map(DVec3::from);
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let cross = edge1.cross(edge2);
        let len = cross.length();

        // Written as a negated comparison so NaN also lands in the error branch.
        if !(len > DEGENERATE_EPSILON * edge1.length() * edge2.length()) {
            return Err(MeshError::DegenerateTriangle { triangle: *self });
        }
        Ok((cross / len).into())
    }

    /// The three edges in winding order: `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
    #[must_use]
    pub fn edges(&self) -> [(Coord3D, Coord3D); 3] {
        let [a, b, c] = self.0;
        [(a, b), (b, c), (c, a)]
    }

    #[must_use]
    pub fn contains(&self, vertex: Coord3D) -> bool {
        self.0.contains(&vertex)
    }

    /// The vertex that is neither `a` nor `b`, if `(a, b)` is an edge of this triangle.
    #[must_use]
    pub fn opposite(&self, a: Coord3D, b: Coord3D) -> Option<Coord3D> {
        if !self.contains(a) || !self.contains(b) || a == b {
            return None;
        }
        self.0.iter().copied().find(|&v| v != a && v != b)
    }

    /// The same triangle facing the other way (last two vertices swapped).
    #[must_use]
    pub fn flipped(self) -> Self {
        let [a, b, c] = self.0;
        Self([a, c, b])
    }

    /// Every vertex scaled about the origin.
    #[must_use]
    pub fn scaled(self, s: f64) -> Self {
        Self(self.0.map(|v| v.scale(s)))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = self.0;
        (v1 - v0).cross(v2 - v0).norm() / 2.0
    }

    #[must_use]
    pub fn max_side_length(&self) -> f64 {
        self.edges()
            .iter()
            .map(|(a, b)| a.dist(*b))
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.0.iter().map(|v| v.y).fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.0.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Index<usize> for Triangle {
    type Output = Coord3D;

    fn index(&self, index: usize) -> &Coord3D {
        &self.0[index]
    }
}
