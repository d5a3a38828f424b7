//! Points in 3D Euclidean space.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec3;

use crate::GeoCoord;

/// Added to the norm before dividing in [`Coord3D::to_geo`], so that the origin
/// maps to `(0, 0)` instead of dividing by zero.
const NORM_EPSILON: f64 = 1e-8;

/// A coordinate in 3D Euclidean space.
///
/// The same type serves as a point on the unit sphere (see
/// [`GeoCoord::to_coord3d`]) and as a model-space vertex after scaling by a radius.
///
/// Equality is exact component-wise IEEE equality, and hashing agrees with it
/// (`-0.0` and `0.0` hash alike), so a `Coord3D` can key a vertex index. Vertices
/// that are only numerically close are distinct keys.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coord3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord3D {
    /// The origin.
    pub const ZERO: Coord3D = Coord3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    #[must_use]
    pub fn dot(self, other: Coord3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    #[must_use]
    pub fn cross(self, other: Coord3D) -> Coord3D {
        Coord3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns a copy scaled uniformly by `s`. The receiver is left untouched.
    #[inline]
    #[must_use]
    pub fn scale(self, s: f64) -> Coord3D {
        Coord3D::new(self.x * s, self.y * s, self.z * s)
    }

    /// Euclidean distance between two points.
    #[inline]
    #[must_use]
    pub fn dist(self, other: Coord3D) -> f64 {
        (self - other).norm()
    }

    /// The plain average of two points.
    #[inline]
    #[must_use]
    pub fn midpoint(self, other: Coord3D) -> Coord3D {
        Coord3D::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    /// Unit-length copy of this vector. The zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Coord3D {
        let n = self.norm();
        if n == 0.0 { self } else { self.scale(1.0 / n) }
    }

    /// Inverse of [`GeoCoord::to_coord3d`] for any non-zero point: the direction of
    /// the point is converted to latitude and longitude.
    ///
    /// The point is divided by `norm + 1e-8` first, so the origin maps to
    /// `(0, 0)`. Within [`POLE_EPSILON`](crate::POLE_EPSILON) of either pole the
    /// longitude is 0.
    #[must_use]
    pub fn to_geo(self) -> GeoCoord {
        let p = self.scale(1.0 / (self.norm() + NORM_EPSILON));
        GeoCoord::from_unit(p.x, p.y, p.z)
    }

    /// Lexicographic total order on `(x, y, z)`.
    ///
    /// Consistent with `==` for every non-NaN value (`-0.0` and `0.0` compare
    /// equal). Used to build order-independent edge keys.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Coord3D) -> Ordering {
        canonical_bits(self.x)
            .total_cmp(&canonical_bits(other.x))
            .then_with(|| canonical_bits(self.y).total_cmp(&canonical_bits(other.y)))
            .then_with(|| canonical_bits(self.z).total_cmp(&canonical_bits(other.z)))
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Narrow to `f32` for encoders.
    #[must_use]
    pub fn to_f32_array(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

/// Folds `-0.0` onto `0.0`.
#[inline]
fn canonical_bits(v: f64) -> f64 {
    v + 0.0
}

impl Eq for Coord3D {}

impl Hash for Coord3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.x).to_bits().hash(state);
        canonical_bits(self.y).to_bits().hash(state);
        canonical_bits(self.z).to_bits().hash(state);
    }
}

impl Add for Coord3D {
    type Output = Coord3D;

    fn add(self, rhs: Coord3D) -> Coord3D {
        Coord3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord3D {
    type Output = Coord3D;

    fn sub(self, rhs: Coord3D) -> Coord3D {
        Coord3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Coord3D {
    type Output = Coord3D;

    fn mul(self, rhs: f64) -> Coord3D {
        self.scale(rhs)
    }
}

impl Neg for Coord3D {
    type Output = Coord3D;

    fn neg(self) -> Coord3D {
        Coord3D::new(-self.x, -self.y, -self.z)
    }
}

impl From<DVec3> for Coord3D {
    fn from(v: DVec3) -> Self {
        Coord3D::new(v.x, v.y, v.z)
    }
}

impl From<Coord3D> for DVec3 {
    fn from(c: Coord3D) -> Self {
        DVec3::new(c.x, c.y, c.z)
    }
}
