//! Geographic (latitude, longitude) coordinates on the unit sphere.

use std::f64::consts::FRAC_PI_2;

use crate::Coord3D;

/// Points whose horizontal radius (`cos(lat)` on the unit sphere) falls below this
/// value are treated as sitting on a pole. Their longitude is reported as 0.
pub const POLE_EPSILON: f64 = 1e-8;

/// A location on a sphere.
///
/// `lat` runs from `-π/2` (south pole) to `π/2` (north pole). `lon` runs from
/// `-π` to `π` in the west-east direction. Both are in radians. Values outside
/// these ranges are accepted but should be passed through [`GeoCoord::normalize`]
/// before being compared.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GeoCoord {
    /// Latitude in radians.
    pub lat: f64,
    /// Longitude in radians.
    pub lon: f64,
}

impl GeoCoord {
    /// The north pole, with the canonical longitude of 0.
    pub const NORTH_POLE: GeoCoord = GeoCoord {
        lat: FRAC_PI_2,
        lon: 0.0,
    };

    /// The south pole, with the canonical longitude of 0.
    pub const SOUTH_POLE: GeoCoord = GeoCoord {
        lat: -FRAC_PI_2,
        lon: 0.0,
    };

    /// Construct a coordinate from latitude and longitude in radians.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Embed this coordinate on the unit sphere centered at the origin.
    ///
    /// `y` is the polar axis; longitude 0 points along `+z` and longitude `π/2`
    /// along `+x`.
    #[inline]
    #[must_use]
    pub fn to_coord3d(self) -> Coord3D {
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        Coord3D::new(sin_lon * cos_lat, sin_lat, cos_lon * cos_lat)
    }

    /// Great-circle (angular) distance to `other`, in radians.
    ///
    /// The dot product of the two embeddings is clamped to `[-1, 1]` before the
    /// arccosine, so nearly identical or antipodal points never produce NaN.
    #[must_use]
    pub fn distance(self, other: GeoCoord) -> f64 {
        let dot = self.to_coord3d().dot(other.to_coord3d());
        dot.clamp(-1.0, 1.0).acos()
    }

    /// Project this coordinate back onto the canonical range through its 3D
    /// embedding. Longitude collapses to 0 at either pole.
    #[must_use]
    pub fn normalize(self) -> GeoCoord {
        self.to_coord3d().to_geo()
    }

    /// Pole-safe inverse of [`GeoCoord::to_coord3d`] for an (approximately) unit
    /// vector.
    pub(crate) fn from_unit(x: f64, y: f64, z: f64) -> GeoCoord {
        let horizontal = x.hypot(z);
        let lat = y.atan2(horizontal);
        let lon = if horizontal < POLE_EPSILON {
            0.0
        } else {
            x.atan2(z)
        };
        GeoCoord { lat, lon }
    }
}
