//! Two-anchor trilateration from the sphere onto the plane.

use std::f64::consts::{FRAC_PI_2, PI};

use globe_geo::{Coord2D, GeoCoord};

use crate::error::FlattenError;

/// Maps one pole-to-equator strip of the sphere onto the plane.
///
/// Anchor `a` sits on the pole and maps to `(0, 0)`; anchor `b` sits on the
/// equator and maps to `(0, 1)`. Both lie on the strip's center longitude. A
/// point is placed where its angular distances to the anchors, in units of a
/// quarter great circle, become planar distances. `x` is negative west of the
/// center line.
///
/// Points outside the strip map to meaningless positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripMapper {
    a: GeoCoord,
    b: GeoCoord,
    lon_span: f64,
    distance: f64,
}

impl StripMapper {
    /// A strip `lon_span` radians wide starting at `start_lon`.
    ///
    /// The pole anchor is placed at latitude `-π/2` when `north` is set and at
    /// `π/2` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::LonSpan`] if `lon_span` is not positive and
    /// finite.
    pub fn new(north: bool, start_lon: f64, lon_span: f64) -> Result<Self, FlattenError> {
        if !(lon_span > 0.0 && lon_span.is_finite()) {
            return Err(FlattenError::LonSpan(lon_span));
        }
        let pole_lat = if north { -FRAC_PI_2 } else { FRAC_PI_2 };
        let center = start_lon + lon_span / 2.0;
        Ok(Self {
            a: GeoCoord::new(pole_lat, center),
            b: GeoCoord::new(0.0, center),
            lon_span,
            distance: FRAC_PI_2,
        })
    }

    /// A quarter-hemisphere strip, `π/2` wide.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::StartLongitude`] unless `start_lon` lies in
    /// `[-π, π/2]`.
    pub fn octant(north: bool, start_lon: f64) -> Result<Self, FlattenError> {
        if !(-PI..=FRAC_PI_2).contains(&start_lon) {
            return Err(FlattenError::StartLongitude(start_lon));
        }
        Self::new(north, start_lon, FRAC_PI_2)
    }

    #[must_use]
    pub fn min_lat(&self) -> f64 {
        self.a.lat.min(self.b.lat)
    }

    #[must_use]
    pub fn max_lat(&self) -> f64 {
        self.min_lat() + FRAC_PI_2
    }

    #[must_use]
    pub fn min_lon(&self) -> f64 {
        self.a.lon - self.lon_span / 2.0
    }

    #[must_use]
    pub fn max_lon(&self) -> f64 {
        self.a.lon + self.lon_span / 2.0
    }

    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.lon_span
    }

    /// Width of the flattened strip relative to its height, measured at the
    /// equator where it is widest.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.map(GeoCoord::new(0.0, self.max_lon())).x * 2.0
    }

    #[must_use]
    pub fn map(&self, g: GeoCoord) -> Coord2D {
        let d1 = self.a.distance(g) / self.distance;
        let d2 = self.b.distance(g) / self.distance;

        // |p| = d1 and |p - (0, 1)| = d2 give 2y - 1 = d1² - d2².
        let y = (1.0 + d1 * d1 - d2 * d2) / 2.0;
        let x = (d1 * d1 - y * y).abs().sqrt();
        if g.lon < self.a.lon {
            Coord2D::new(-x, y)
        } else {
            Coord2D::new(x, y)
        }
    }
}
