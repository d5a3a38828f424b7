//! Radius fields derived from a map.

use globe_geo::GeoCoord;
use globe_mesh::RadiusFn;

use crate::equirect::{Equirect, is_bright};

/// Default radius of land (bright pixels), relative to a unit sea level.
pub const LAND_RADIUS: f64 = 1.03;

/// Default radius of sea (all other pixels).
pub const SEA_RADIUS: f64 = 1.0;

/// Two-level field: `land` where the map is bright, `sea` everywhere else.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdRadius<'a> {
    pub equirect: &'a Equirect,
    pub land: f64,
    pub sea: f64,
}

impl<'a> ThresholdRadius<'a> {
    pub fn new(equirect: &'a Equirect) -> Self {
        Self {
            equirect,
            land: LAND_RADIUS,
            sea: SEA_RADIUS,
        }
    }

    #[must_use]
    pub fn with_radii(mut self, land: f64, sea: f64) -> Self {
        self.land = land;
        self.sea = sea;
        self
    }
}

impl RadiusFn for ThresholdRadius<'_> {
    fn radius(&self, g: GeoCoord) -> f64 {
        if is_bright(self.equirect.at(g)) {
            self.land
        } else {
            self.sea
        }
    }
}

/// Gaussian blur of another field over a small latitude/longitude window.
///
/// Samples a `(2·steps + 1)²` grid spaced `delta` radians apart around the query
/// point. Longitude offsets are stretched by `1 / (cos(lat) + 1e-4)` so the
/// window keeps roughly the same ground size away from the equator. Each sample
/// is weighted by `exp(-d² / stddev²)` on its angular distance `d`.
#[derive(Clone, Copy, Debug)]
pub struct SmoothRadius<R> {
    pub inner: R,
    pub delta: f64,
    pub stddev: f64,
    pub steps: u32,
}

impl<R: RadiusFn> SmoothRadius<R> {
    pub fn new(inner: R, delta: f64, stddev: f64, steps: u32) -> Self {
        Self {
            inner,
            delta,
            stddev,
            steps,
        }
    }
}

impl<R: RadiusFn> RadiusFn for SmoothRadius<R> {
    fn radius(&self, g: GeoCoord) -> f64 {
        let steps = i64::from(self.steps);
        let variance = self.stddev * self.stddev;
        let mut total_value = 0.0;
        let mut total_weight = 0.0;
        for i in -steps..=steps {
            let lat = g.lat + i as f64 * self.delta;
            let lon_delta = self.delta / (lat.cos() + 1e-4);
            for j in -steps..=steps {
                let sample = GeoCoord::new(lat, g.lon + j as f64 * lon_delta);
                let d = g.distance(sample);
                let weight = (-d * d / variance).exp();
                total_value += weight * self.inner.radius(sample);
                total_weight += weight;
            }
        }
        total_value / total_weight
    }
}
