//! Points on a flat plane.

use std::ops::{Add, Sub};

/// A coordinate in flat 2D space, as produced by the sphere-flattening mappers.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coord2D {
    pub x: f64,
    pub y: f64,
}

impl Coord2D {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Coord2D {
    type Output = Coord2D;

    fn add(self, rhs: Coord2D) -> Coord2D {
        Coord2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord2D {
    type Output = Coord2D;

    fn sub(self, rhs: Coord2D) -> Coord2D {
        Coord2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}
